//! Gallery categories, albums and images.

use parish_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryCategory {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGalleryCategory {
    #[validate(length(min = 1, max = 100, message = "Category name is required"))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateGalleryCategory {
    #[validate(length(min = 1, max = 100, message = "Category name cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Album row with its image count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryAlbum {
    pub id: DbId,
    pub category_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub event_date: Option<Date>,
    pub image_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGalleryAlbum {
    pub category_id: Option<DbId>,
    #[validate(length(min = 1, max = 200, message = "Album title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub event_date: Option<Date>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGalleryAlbum {
    pub category_id: Option<DbId>,
    #[validate(length(min = 1, max = 200, message = "Album title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub event_date: Option<Date>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryImage {
    pub id: DbId,
    pub album_id: DbId,
    pub url: String,
    pub caption: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Links already-uploaded files to an album in one call.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LinkAlbumImages {
    #[validate(length(min = 1, max = 200, message = "Provide between 1 and 200 image URLs"))]
    pub urls: Vec<String>,
}
