//! Handlers for `/admin/events`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use parish_core::calendar::{publish_announcement, EventStatus, EVENT_PUBLISHED};
use parish_core::error::CoreError;
use parish_core::notification::Audience;
use parish_core::types::DbId;
use parish_db::models::event::{CreateEvent, Event, UpdateEvent};
use parish_db::models::notification::CreateNotification;
use parish_db::repositories::EventRepo;
use parish_events::PlatformEvent;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::notifications::announce;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EventListParams {
    pub status: Option<EventStatus>,
}

#[derive(Debug, Deserialize)]
pub struct LiveRequest {
    pub is_live: bool,
}

#[derive(Debug, Deserialize)]
pub struct FeaturedRequest {
    pub is_featured: bool,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Event", id })
}

/// GET /api/v1/admin/events?status=
pub async fn list_events(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> AppResult<Json<DataResponse<Vec<Event>>>> {
    let events = EventRepo::list(&state.pool, params.status).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/admin/events/{id}
pub async fn get_event(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Event>>> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: event }))
}

/// POST /api/v1/admin/events
pub async fn create_event(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<DataResponse<Event>>)> {
    input.validate()?;
    let event = EventRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// PUT /api/v1/admin/events/{id}
pub async fn update_event(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvent>,
) -> AppResult<Json<DataResponse<Event>>> {
    input.validate()?;
    let event = EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: event }))
}

/// DELETE /api/v1/admin/events/{id}
pub async fn delete_event(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if EventRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/v1/admin/events/{id}/publish
///
/// `DRAFT -> PUBLISHED` together with an announcement broadcast for everyone,
/// then emits `notification.created` and `event.published`. Publishing twice
/// is a 409 and sends nothing.
pub async fn publish_event(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Event>>> {
    let (event, notification) = EventRepo::publish(&state.pool, id, |event| {
        let (title, body) = publish_announcement(&event.title, event.location.as_deref());
        CreateNotification {
            title,
            body,
            audience: Audience::All,
            target_role: None,
            source_type: Some("event".to_string()),
            source_id: Some(event.id),
            created_by: Some(user.user_id),
        }
    })
    .await?;

    announce(&state, &notification);
    state.event_bus.publish(
        PlatformEvent::new(EVENT_PUBLISHED)
            .with_source("event", event.id)
            .with_actor(user.user_id)
            .with_payload(json!({
                "title": event.title,
                "notification_id": notification.id,
            })),
    );

    tracing::info!(event_id = id, published_by = user.user_id, "Event published");
    Ok(Json(DataResponse { data: event }))
}

/// POST /api/v1/admin/events/{id}/unpublish
///
/// Back to `DRAFT`; also turns the live flag off.
pub async fn unpublish_event(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Event>>> {
    let event = EventRepo::unpublish(&state.pool, id).await?;
    Ok(Json(DataResponse { data: event }))
}

/// PUT /api/v1/admin/events/{id}/live
pub async fn set_live(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<LiveRequest>,
) -> AppResult<Json<DataResponse<Event>>> {
    let event = EventRepo::set_live(&state.pool, id, input.is_live)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: event }))
}

/// PUT /api/v1/admin/events/{id}/featured
pub async fn set_featured(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<FeaturedRequest>,
) -> AppResult<Json<DataResponse<Event>>> {
    let event = EventRepo::set_featured(&state.pool, id, input.is_featured)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: event }))
}
