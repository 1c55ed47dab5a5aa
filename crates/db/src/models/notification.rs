//! Notification broadcast model and DTOs.

use parish_core::notification::Audience;
use parish_core::roles::Role;
use parish_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub title: String,
    pub body: String,
    pub audience: String,
    pub target_role: Option<String>,
    pub source_type: Option<String>,
    pub source_id: Option<DbId>,
    pub created_by: Option<DbId>,
    pub delivery_status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `POST /notifications/broadcast`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BroadcastRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 4000, message = "Body is required"))]
    pub body: String,
    #[serde(default = "default_audience")]
    pub audience: Audience,
    pub target_role: Option<Role>,
}

fn default_audience() -> Audience {
    Audience::All
}

/// DTO for inserting a notification row.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub title: String,
    pub body: String,
    pub audience: Audience,
    pub target_role: Option<Role>,
    pub source_type: Option<String>,
    pub source_id: Option<DbId>,
    pub created_by: Option<DbId>,
}

