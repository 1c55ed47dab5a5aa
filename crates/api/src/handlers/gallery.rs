//! Handlers for `/admin/gallery`: categories, albums and album images.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use parish_core::error::CoreError;
use parish_core::types::DbId;
use parish_db::models::gallery::{
    CreateGalleryAlbum, CreateGalleryCategory, GalleryAlbum, GalleryCategory, GalleryImage,
    LinkAlbumImages, UpdateGalleryAlbum, UpdateGalleryCategory,
};
use parish_db::repositories::GalleryRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AlbumListParams {
    pub category_id: Option<DbId>,
}

fn album_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "GalleryAlbum",
        id,
    })
}

fn category_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "GalleryCategory",
        id,
    })
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/gallery/categories
pub async fn list_categories(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<GalleryCategory>>>> {
    let categories = GalleryRepo::list_categories(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/admin/gallery/categories
pub async fn create_category(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateGalleryCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<GalleryCategory>>)> {
    input.validate()?;
    let category = GalleryRepo::create_category(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/v1/admin/gallery/categories/{id}
pub async fn update_category(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGalleryCategory>,
) -> AppResult<Json<DataResponse<GalleryCategory>>> {
    input.validate()?;
    let category = GalleryRepo::update_category(&state.pool, id, &input)
        .await?
        .ok_or_else(|| category_not_found(id))?;
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/admin/gallery/categories/{id}
///
/// Albums in the category become uncategorised.
pub async fn delete_category(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if GalleryRepo::delete_category(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(category_not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Albums
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/gallery/albums?category_id=
pub async fn list_albums(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<AlbumListParams>,
) -> AppResult<Json<DataResponse<Vec<GalleryAlbum>>>> {
    let albums = GalleryRepo::list_albums(&state.pool, params.category_id).await?;
    Ok(Json(DataResponse { data: albums }))
}

/// GET /api/v1/admin/gallery/albums/{id}
pub async fn get_album(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GalleryAlbum>>> {
    let album = GalleryRepo::find_album(&state.pool, id)
        .await?
        .ok_or_else(|| album_not_found(id))?;
    Ok(Json(DataResponse { data: album }))
}

/// POST /api/v1/admin/gallery/albums
pub async fn create_album(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateGalleryAlbum>,
) -> AppResult<(StatusCode, Json<DataResponse<GalleryAlbum>>)> {
    input.validate()?;
    let album = GalleryRepo::create_album(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: album })))
}

/// PUT /api/v1/admin/gallery/albums/{id}
pub async fn update_album(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGalleryAlbum>,
) -> AppResult<Json<DataResponse<GalleryAlbum>>> {
    input.validate()?;
    let album = GalleryRepo::update_album(&state.pool, id, &input)
        .await?
        .ok_or_else(|| album_not_found(id))?;
    Ok(Json(DataResponse { data: album }))
}

/// DELETE /api/v1/admin/gallery/albums/{id}
pub async fn delete_album(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if GalleryRepo::delete_album(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(album_not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/gallery/albums/{id}/images
pub async fn list_images(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<GalleryImage>>>> {
    if GalleryRepo::find_album(&state.pool, id).await?.is_none() {
        return Err(album_not_found(id));
    }
    let images = GalleryRepo::list_images(&state.pool, id).await?;
    Ok(Json(DataResponse { data: images }))
}

/// POST /api/v1/admin/gallery/albums/{id}/images
///
/// Body: `{ "urls": [...] }` of files already stored via `/common/upload`.
/// All URLs are linked in one statement.
pub async fn link_images(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<LinkAlbumImages>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<GalleryImage>>>)> {
    input.validate()?;
    if input.urls.iter().any(|url| url.trim().is_empty()) {
        return Err(AppError::BadRequest("Image URLs must not be empty".into()));
    }
    let images = GalleryRepo::link_images(&state.pool, id, &input.urls).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: images })))
}

/// DELETE /api/v1/admin/gallery/images/{id}
pub async fn delete_image(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if GalleryRepo::delete_image(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "GalleryImage",
            id,
        }))
    }
}
