//! Handlers for `/admin/members`: directory, CRUD, approval workflow and
//! household placement.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use parish_core::error::CoreError;
use parish_core::member::{FamilyRole, MemberStatus, MEMBER_APPROVED};
use parish_core::types::DbId;
use parish_db::models::member::{
    AssignFamily, CreateMember, Member, MemberListItem, UpdateMember,
};
use parish_db::models::page::Page;
use parish_db::repositories::MemberRepo;
use parish_events::PlatformEvent;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::MemberListParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: MemberStatus,
}

#[derive(Debug, Deserialize)]
pub struct FamilyRoleRequest {
    pub family_role: FamilyRole,
}

/// `spouse_id: null` clears the link.
#[derive(Debug, Deserialize)]
pub struct SpouseRequest {
    pub spouse_id: Option<DbId>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Member",
        id,
    })
}

/// GET /api/v1/admin/members
///
/// Paginated directory. Returns `{ data, total, page, limit, total_pages }`.
pub async fn list_members(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<MemberListParams>,
) -> AppResult<Json<Page<MemberListItem>>> {
    let query = params.into_query()?;
    let (rows, total) = MemberRepo::search(&state.pool, &query).await?;
    Ok(Json(Page::new(rows, total, query.page, query.limit)))
}

/// GET /api/v1/admin/members/{id}
pub async fn get_member(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Member>>> {
    let member = MemberRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: member }))
}

/// POST /api/v1/admin/members
pub async fn create_member(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateMember>,
) -> AppResult<(StatusCode, Json<DataResponse<Member>>)> {
    input.validate()?;
    let member = MemberRepo::create(&state.pool, &input).await?;
    tracing::info!(member_id = member.id, created_by = user.user_id, "Member created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: member })))
}

/// PUT /api/v1/admin/members/{id}
pub async fn update_member(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMember>,
) -> AppResult<Json<DataResponse<Member>>> {
    input.validate()?;
    let member = MemberRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: member }))
}

/// DELETE /api/v1/admin/members/{id}
pub async fn delete_member(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if MemberRepo::delete(&state.pool, id).await? {
        tracing::info!(member_id = id, deleted_by = user.user_id, "Member deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Approval workflow
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/members/{id}/approve
///
/// `PENDING_APPROVAL -> ACTIVE`. Approving anyone else is a 409.
pub async fn approve_member(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Member>>> {
    let member = MemberRepo::approve(&state.pool, id).await?;

    state.event_bus.publish(
        PlatformEvent::new(MEMBER_APPROVED)
            .with_source("member", id)
            .with_actor(user.user_id),
    );

    Ok(Json(DataResponse { data: member }))
}

/// PUT /api/v1/admin/members/{id}/status
pub async fn change_status(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<StatusRequest>,
) -> AppResult<Json<DataResponse<Member>>> {
    let member = MemberRepo::change_status(&state.pool, id, input.status).await?;
    tracing::info!(member_id = id, status = %input.status, changed_by = user.user_id, "Member status changed");
    Ok(Json(DataResponse { data: member }))
}

// ---------------------------------------------------------------------------
// Household placement
// ---------------------------------------------------------------------------

/// PUT /api/v1/admin/members/{id}/family
///
/// Body: `{ family_id, house_id?, family_role? }`. A house outside the
/// family is a 400.
pub async fn assign_family(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AssignFamily>,
) -> AppResult<Json<DataResponse<Member>>> {
    let member = MemberRepo::assign_to_family(&state.pool, id, &input).await?;
    Ok(Json(DataResponse { data: member }))
}

/// DELETE /api/v1/admin/members/{id}/family
///
/// Clears family, house and role. The member itself is kept.
pub async fn remove_from_family(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Member>>> {
    let member = MemberRepo::remove_from_family(&state.pool, id).await?;
    Ok(Json(DataResponse { data: member }))
}

/// PUT /api/v1/admin/members/{id}/family-role
pub async fn change_family_role(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<FamilyRoleRequest>,
) -> AppResult<Json<DataResponse<Member>>> {
    let member = MemberRepo::change_family_role(&state.pool, id, input.family_role)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: member }))
}

/// PUT /api/v1/admin/members/{id}/spouse
pub async fn set_spouse(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SpouseRequest>,
) -> AppResult<Json<DataResponse<Member>>> {
    let member = MemberRepo::set_spouse(&state.pool, id, input.spouse_id).await?;
    Ok(Json(DataResponse { data: member }))
}
