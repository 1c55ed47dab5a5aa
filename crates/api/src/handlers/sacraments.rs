//! Handlers for `/admin/sacraments`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use parish_core::error::CoreError;
use parish_core::sacrament::SacramentType;
use parish_core::types::DbId;
use parish_db::models::sacrament::{CreateSacrament, Sacrament, UpdateSacrament};
use parish_db::repositories::SacramentRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SacramentListParams {
    pub member_id: Option<DbId>,
    pub sacrament_type: Option<SacramentType>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Sacrament",
        id,
    })
}

/// GET /api/v1/admin/sacraments?member_id=&sacrament_type=
pub async fn list_sacraments(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<SacramentListParams>,
) -> AppResult<Json<DataResponse<Vec<Sacrament>>>> {
    let records = SacramentRepo::list(&state.pool, params.member_id, params.sacrament_type).await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/admin/sacraments/{id}
pub async fn get_sacrament(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Sacrament>>> {
    let record = SacramentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: record }))
}

/// POST /api/v1/admin/sacraments
///
/// An unknown `member_id` is rejected by the foreign key as a 400.
pub async fn create_sacrament(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateSacrament>,
) -> AppResult<(StatusCode, Json<DataResponse<Sacrament>>)> {
    let record = SacramentRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// PUT /api/v1/admin/sacraments/{id}
pub async fn update_sacrament(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSacrament>,
) -> AppResult<Json<DataResponse<Sacrament>>> {
    let record = SacramentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: record }))
}

/// DELETE /api/v1/admin/sacraments/{id}
pub async fn delete_sacrament(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if SacramentRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
