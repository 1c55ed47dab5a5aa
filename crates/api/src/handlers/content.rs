//! Handlers for `/admin/content`, editable site text addressed by slug.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use parish_core::content::validate_key;
use parish_db::models::content::{ContentBlock, UpsertContentBlock};
use parish_db::repositories::ContentRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Unknown slugs map to the generic row-not-found 404.
fn not_found() -> AppError {
    AppError::Database(sqlx::Error::RowNotFound)
}

/// GET /api/v1/admin/content
pub async fn list_content(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ContentBlock>>>> {
    let blocks = ContentRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: blocks }))
}

/// GET /api/v1/admin/content/{slug}
pub async fn get_content(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<ContentBlock>>> {
    validate_key("Slug", &slug)?;
    let block = ContentRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(DataResponse { data: block }))
}

/// PUT /api/v1/admin/content/{slug}
///
/// Creates the block or replaces its title and body.
pub async fn upsert_content(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<UpsertContentBlock>,
) -> AppResult<Json<DataResponse<ContentBlock>>> {
    validate_key("Slug", &slug)?;
    input.validate()?;
    let block = ContentRepo::upsert(&state.pool, &slug, &input).await?;
    tracing::info!(slug = %slug, updated_by = user.user_id, "Content block saved");
    Ok(Json(DataResponse { data: block }))
}

/// DELETE /api/v1/admin/content/{slug}
pub async fn delete_content(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<StatusCode> {
    validate_key("Slug", &slug)?;
    if ContentRepo::delete(&state.pool, &slug).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}
