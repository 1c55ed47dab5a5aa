//! Handlers for `/admin/houses`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use parish_core::error::CoreError;
use parish_core::types::DbId;
use parish_db::models::house::{CreateHouse, House, UpdateHouse};
use parish_db::models::member::Member;
use parish_db::repositories::{HouseRepo, MemberRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// `member_id: null` clears the head.
#[derive(Debug, Deserialize)]
pub struct SetHeadRequest {
    pub member_id: Option<DbId>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "House", id })
}

/// POST /api/v1/admin/houses
pub async fn create_house(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateHouse>,
) -> AppResult<(StatusCode, Json<DataResponse<House>>)> {
    input.validate()?;
    let house = HouseRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: house })))
}

/// GET /api/v1/admin/houses/{id}
pub async fn get_house(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<House>>> {
    let house = HouseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: house }))
}

/// PUT /api/v1/admin/houses/{id}
pub async fn update_house(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateHouse>,
) -> AppResult<Json<DataResponse<House>>> {
    input.validate()?;
    let house = HouseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: house }))
}

/// DELETE /api/v1/admin/houses/{id}
///
/// Residents stay in the family with `house_id` cleared.
pub async fn delete_house(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if HouseRepo::delete(&state.pool, id).await? {
        tracing::info!(house_id = id, deleted_by = user.user_id, "House deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// GET /api/v1/admin/houses/{id}/members
pub async fn list_house_members(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Member>>>> {
    if HouseRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(not_found(id));
    }
    let members = MemberRepo::list_by_house(&state.pool, id).await?;
    Ok(Json(DataResponse { data: members }))
}

/// PUT /api/v1/admin/houses/{id}/head
pub async fn set_head(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetHeadRequest>,
) -> AppResult<Json<DataResponse<House>>> {
    let house = HouseRepo::set_head(&state.pool, id, input.member_id).await?;
    Ok(Json(DataResponse { data: house }))
}
