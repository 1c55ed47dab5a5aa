//! Parish event model and DTOs.

use parish_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub event_date: Timestamp,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub status: String,
    pub is_live: bool,
    pub is_featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an event. New events always start as `DRAFT`;
/// publication goes through the publish operation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEvent {
    #[validate(length(min = 1, max = 300, message = "Event title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub event_date: Timestamp,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEvent {
    #[validate(length(min = 1, max = 300, message = "Event title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<Timestamp>,
    pub location: Option<String>,
    pub image_url: Option<String>,
}
