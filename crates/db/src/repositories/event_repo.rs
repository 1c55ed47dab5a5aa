//! Repository for the `events` table.

use parish_core::calendar::{validate_publish, validate_unpublish, EventStatus};
use parish_core::error::CoreError;
use parish_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::RepoError;
use crate::models::event::{CreateEvent, Event, UpdateEvent};
use crate::models::notification::{CreateNotification, Notification};
use crate::repositories::NotificationRepo;

const COLUMNS: &str = "id, title, description, event_date, location, image_url, status, \
                       is_live, is_featured, created_at, updated_at";

/// Provides CRUD and the publish/live/featured toggles for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event. Events always start as drafts.
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (title, description, event_date, location, image_url, is_featured)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.event_date)
            .bind(&input.location)
            .bind(&input.image_url)
            .bind(input.is_featured)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List events, soonest first, optionally restricted to one status.
    pub async fn list(pool: &PgPool, status: Option<EventStatus>) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE $1::TEXT IS NULL OR status = $1
             ORDER BY event_date, id"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(status.map(EventStatus::as_str))
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                event_date = COALESCE($4, event_date),
                location = COALESCE($5, location),
                image_url = COALESCE($6, image_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.event_date)
            .bind(&input.location)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Move a draft to `PUBLISHED` and store its announcement in the same
    /// transaction. Publishing twice is a conflict.
    ///
    /// If the announcement cannot be stored the event stays a draft, so the
    /// publish can be retried.
    pub async fn publish(
        pool: &PgPool,
        id: DbId,
        announcement: impl FnOnce(&Event) -> CreateNotification,
    ) -> Result<(Event, Notification), RepoError> {
        let mut tx = pool.begin().await?;
        let event = Self::transition(&mut tx, id, EventStatus::Published).await?;
        let notification = NotificationRepo::insert(&mut *tx, &announcement(&event)).await?;
        tx.commit().await?;

        tracing::info!(event_id = id, notification_id = notification.id, "Event published");
        Ok((event, notification))
    }

    /// Move a published event back to `DRAFT`. Live events stop being live.
    pub async fn unpublish(pool: &PgPool, id: DbId) -> Result<Event, RepoError> {
        let mut tx = pool.begin().await?;
        let event = Self::transition(&mut tx, id, EventStatus::Draft).await?;
        tx.commit().await?;

        tracing::info!(event_id = id, "Event unpublished");
        Ok(event)
    }

    pub async fn set_live(pool: &PgPool, id: DbId, is_live: bool) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("UPDATE events SET is_live = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(is_live)
            .fetch_optional(pool)
            .await
    }

    pub async fn set_featured(
        pool: &PgPool,
        id: DbId,
        is_featured: bool,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("UPDATE events SET is_featured = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(is_featured)
            .fetch_optional(pool)
            .await
    }

    async fn transition(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        target: EventStatus,
    ) -> Result<Event, RepoError> {
        let current = Self::lock_status(tx, id).await?;

        match target {
            EventStatus::Published => validate_publish(current)?,
            EventStatus::Draft => validate_unpublish(current)?,
        }

        let query = format!(
            "UPDATE events SET
                status = $2,
                is_live = CASE WHEN $2 = 'DRAFT' THEN FALSE ELSE is_live END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let event = sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(target.as_str())
            .fetch_one(&mut **tx)
            .await?;
        Ok(event)
    }

    async fn lock_status(tx: &mut Transaction<'_, Postgres>, id: DbId) -> Result<EventStatus, RepoError> {
        let status: Option<String> = sqlx::query_scalar("SELECT status FROM events WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
        let status = status.ok_or_else(|| CoreError::not_found("Event", id))?;
        Ok(EventStatus::parse(&status)?)
    }
}
