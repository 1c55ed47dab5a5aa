//! Editable site content blocks (about page, mass timings, ...).

use parish_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentBlock {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `PUT /admin/content/{slug}`; creates or replaces the block.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertContentBlock {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub body: String,
}
