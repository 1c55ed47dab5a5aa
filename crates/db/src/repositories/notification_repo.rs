//! Repository for the `notifications` table.

use parish_core::notification::DeliveryStatus;
use parish_core::roles::Role;
use parish_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::notification::{CreateNotification, Notification};

const COLUMNS: &str = "id, title, body, audience, target_role, source_type, source_id, \
                       created_by, delivery_status, created_at, updated_at";

/// Same visibility rule as `parish_core::notification::is_visible_to`:
/// `$1` is "caller is staff", `$2` the caller's role.
const VISIBLE_TO: &str = "($1 OR audience = 'ALL' OR target_role = $2)";

pub struct NotificationRepo;

impl NotificationRepo {
    /// Store a broadcast. Delivery starts as `PENDING`.
    pub async fn create(pool: &PgPool, input: &CreateNotification) -> Result<Notification, sqlx::Error> {
        Self::insert(pool, input).await
    }

    /// Insert on any executor so callers can store a broadcast inside their
    /// own transaction.
    pub(crate) async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications
                (title, body, audience, target_role, source_type, source_id, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(&input.title)
            .bind(&input.body)
            .bind(input.audience.as_str())
            .bind(input.target_role.map(Role::as_str))
            .bind(&input.source_type)
            .bind(input.source_id)
            .bind(input.created_by)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications WHERE id = $1");
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of broadcasts visible to `role`, newest first, plus the total.
    pub async fn list_visible(
        pool: &PgPool,
        role: Role,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Notification>, i64), sqlx::Error> {
        let count_query = format!("SELECT COUNT(*) FROM notifications WHERE {VISIBLE_TO}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(role.is_staff())
            .bind(role.as_str())
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE {VISIBLE_TO}
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, Notification>(&query)
            .bind(role.is_staff())
            .bind(role.as_str())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok((rows, total))
    }

    /// Record the outcome of the push attempt.
    pub async fn set_delivery_status(
        pool: &PgPool,
        id: DbId,
        status: DeliveryStatus,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE notifications SET delivery_status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(pool)
            .await?;
        Ok(())
    }
}
