//! Handlers for `/notifications`.
//!
//! Broadcasts are stored first and then announced on the event bus as
//! `notification.created`; the push dispatcher picks them up from there.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use parish_core::error::CoreError;
use parish_core::notification::{is_visible_to, validate_audience, Audience, NOTIFICATION_CREATED};
use parish_core::roles::Role;
use parish_core::types::DbId;
use parish_db::models::notification::{BroadcastRequest, CreateNotification, Notification};
use parish_db::models::page::Page;
use parish_db::repositories::NotificationRepo;
use parish_events::PlatformEvent;
use serde_json::json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Store a broadcast and announce it on the bus.
pub(crate) async fn store_and_announce(
    state: &AppState,
    input: &CreateNotification,
) -> AppResult<Notification> {
    let notification = NotificationRepo::create(&state.pool, input).await?;
    announce(state, &notification);
    Ok(notification)
}

/// Emit `notification.created` for a broadcast that is already committed.
pub(crate) fn announce(state: &AppState, notification: &Notification) {
    let mut event = PlatformEvent::new(NOTIFICATION_CREATED)
        .with_source("notification", notification.id)
        .with_payload(json!({
            "title": notification.title,
            "body": notification.body,
            "audience": notification.audience,
            "target_role": notification.target_role,
        }));
    if let Some(actor) = notification.created_by {
        event = event.with_actor(actor);
    }
    state.event_bus.publish(event);

    tracing::info!(
        notification_id = notification.id,
        audience = %notification.audience,
        "Notification broadcast stored"
    );
}

fn visible(notification: &Notification, role: Role) -> bool {
    let audience = Audience::parse(&notification.audience).unwrap_or(Audience::Role);
    let target = notification
        .target_role
        .as_deref()
        .and_then(|r| Role::parse(r).ok());
    is_visible_to(audience, target, role)
}

/// GET /api/v1/notifications?page=&limit=
pub async fn list_notifications(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Page<Notification>>> {
    let (page, limit) = params.resolve();
    let offset = parish_core::directory::page_offset(page, limit);
    let (rows, total) = NotificationRepo::list_visible(&state.pool, user.role, limit, offset).await?;
    Ok(Json(Page::new(rows, total, page, limit)))
}

/// GET /api/v1/notifications/{id}
///
/// Broadcasts addressed to another role read as not found.
pub async fn get_notification(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Notification>>> {
    let notification = NotificationRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|n| visible(n, user.role))
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }))?;
    Ok(Json(DataResponse { data: notification }))
}

/// POST /api/v1/notifications/broadcast
pub async fn broadcast(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<BroadcastRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Notification>>)> {
    input.validate()?;
    validate_audience(input.audience, input.target_role)?;

    let notification = store_and_announce(
        &state,
        &CreateNotification {
            title: input.title,
            body: input.body,
            audience: input.audience,
            target_role: input.target_role,
            source_type: None,
            source_id: None,
            created_by: Some(user.user_id),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: notification })))
}
