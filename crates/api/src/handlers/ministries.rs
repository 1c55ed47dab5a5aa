//! Handlers for `/admin/ministries` and their memberships.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use parish_core::error::CoreError;
use parish_core::types::DbId;
use parish_db::models::ministry::{
    AddMinistryMember, CreateMinistry, Ministry, MinistryMember, MinistrySummary, UpdateMinistry,
};
use parish_db::repositories::MinistryRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /admin/ministries/{id}/leader`.
#[derive(Debug, Deserialize)]
pub struct SetLeaderRequest {
    pub member_id: DbId,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Ministry",
        id,
    })
}

async fn ensure_exists(state: &AppState, id: DbId) -> AppResult<Ministry> {
    MinistryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// GET /api/v1/admin/ministries
pub async fn list_ministries(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<MinistrySummary>>>> {
    let ministries = MinistryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: ministries }))
}

/// GET /api/v1/admin/ministries/{id}
pub async fn get_ministry(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Ministry>>> {
    let ministry = ensure_exists(&state, id).await?;
    Ok(Json(DataResponse { data: ministry }))
}

/// POST /api/v1/admin/ministries
pub async fn create_ministry(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateMinistry>,
) -> AppResult<(StatusCode, Json<DataResponse<Ministry>>)> {
    input.validate()?;
    let ministry = MinistryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: ministry })))
}

/// PUT /api/v1/admin/ministries/{id}
pub async fn update_ministry(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMinistry>,
) -> AppResult<Json<DataResponse<Ministry>>> {
    input.validate()?;
    let ministry = MinistryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: ministry }))
}

/// DELETE /api/v1/admin/ministries/{id}
pub async fn delete_ministry(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if MinistryRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// GET /api/v1/admin/ministries/{id}/members
pub async fn list_members(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<MinistryMember>>>> {
    ensure_exists(&state, id).await?;
    let members = MinistryRepo::list_members(&state.pool, id).await?;
    Ok(Json(DataResponse { data: members }))
}

/// POST /api/v1/admin/ministries/{id}/members
///
/// An existing membership is a 409; an unknown member a 400.
pub async fn add_member(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AddMinistryMember>,
) -> AppResult<(StatusCode, Json<DataResponse<MinistryMember>>)> {
    ensure_exists(&state, id).await?;
    let membership = MinistryRepo::add_member(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: membership })))
}

/// DELETE /api/v1/admin/ministries/{id}/members/{member_id}
pub async fn remove_member(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path((id, member_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if MinistryRepo::remove_member(&state.pool, id, member_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "MinistryMember",
            id: member_id,
        }))
    }
}

/// PUT /api/v1/admin/ministries/{id}/leader
///
/// Makes the member a leader, adding the membership when absent. Other
/// leaders keep their role.
pub async fn set_leader(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetLeaderRequest>,
) -> AppResult<Json<DataResponse<MinistryMember>>> {
    ensure_exists(&state, id).await?;
    let leader = MinistryRepo::set_leader(&state.pool, id, input.member_id).await?;
    tracing::info!(ministry_id = id, member_id = input.member_id, assigned_by = user.user_id, "Ministry leader assigned");
    Ok(Json(DataResponse { data: leader }))
}
