//! Handlers for `/admin/families`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use parish_core::directory::search_pattern;
use parish_core::error::CoreError;
use parish_core::types::DbId;
use parish_db::models::family::{CreateFamily, Family, FamilySummary, FamilyTree, UpdateFamily};
use parish_db::models::house::House;
use parish_db::models::member::Member;
use parish_db::repositories::{FamilyRepo, HouseRepo, MemberRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/families/{id}/related`.
#[derive(Debug, Deserialize)]
pub struct LinkRelatedRequest {
    pub related_family_id: DbId,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Family",
        id,
    })
}

async fn ensure_exists(state: &AppState, id: DbId) -> AppResult<Family> {
    FamilyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// GET /api/v1/admin/families?search=
pub async fn list_families(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<FamilySummary>>>> {
    let pattern = search_pattern(params.search.as_deref());
    let families = FamilyRepo::list(&state.pool, pattern.as_deref()).await?;
    Ok(Json(DataResponse { data: families }))
}

/// GET /api/v1/admin/families/{id}
pub async fn get_family(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Family>>> {
    let family = ensure_exists(&state, id).await?;
    Ok(Json(DataResponse { data: family }))
}

/// POST /api/v1/admin/families
pub async fn create_family(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateFamily>,
) -> AppResult<(StatusCode, Json<DataResponse<Family>>)> {
    input.validate()?;
    let family = FamilyRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: family })))
}

/// PUT /api/v1/admin/families/{id}
pub async fn update_family(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFamily>,
) -> AppResult<Json<DataResponse<Family>>> {
    input.validate()?;
    let family = FamilyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: family }))
}

/// DELETE /api/v1/admin/families/{id}
///
/// Members are unassigned, not deleted. Houses and relation links go.
pub async fn delete_family(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if FamilyRepo::delete(&state.pool, id).await? {
        tracing::info!(family_id = id, deleted_by = user.user_id, "Family deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// GET /api/v1/admin/families/{id}/tree
pub async fn family_tree(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<FamilyTree>>> {
    let tree = FamilyRepo::tree(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: tree }))
}

/// GET /api/v1/admin/families/{id}/members
pub async fn list_family_members(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Member>>>> {
    ensure_exists(&state, id).await?;
    let members = MemberRepo::list_by_family(&state.pool, id).await?;
    Ok(Json(DataResponse { data: members }))
}

/// GET /api/v1/admin/families/{id}/houses
pub async fn list_family_houses(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<House>>>> {
    ensure_exists(&state, id).await?;
    let houses = HouseRepo::list_by_family(&state.pool, id).await?;
    Ok(Json(DataResponse { data: houses }))
}

// ---------------------------------------------------------------------------
// Related families
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/families/{id}/related
pub async fn list_related(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Family>>>> {
    ensure_exists(&state, id).await?;
    let related = FamilyRepo::list_related(&state.pool, id).await?;
    Ok(Json(DataResponse { data: related }))
}

/// POST /api/v1/admin/families/{id}/related
///
/// Self-links are a 400, an existing link a 409.
pub async fn link_related(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<LinkRelatedRequest>,
) -> AppResult<StatusCode> {
    FamilyRepo::link_related(&state.pool, id, input.related_family_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/admin/families/{id}/related/{related_id}
pub async fn unlink_related(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path((id, related_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    FamilyRepo::unlink_related(&state.pool, id, related_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
