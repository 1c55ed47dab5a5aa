//! Ministry entity model and DTOs.

use parish_core::ministry::MinistryRole;
use parish_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `ministries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ministry {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Ministry row with its member count and current leader names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MinistrySummary {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub member_count: i64,
    pub leaders: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A member of a ministry, joined with the member's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MinistryMember {
    pub id: DbId,
    pub ministry_id: DbId,
    pub member_id: DbId,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMinistry {
    #[validate(length(min = 1, max = 200, message = "Ministry name is required"))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMinistry {
    #[validate(length(min = 1, max = 200, message = "Ministry name cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Request to add a member to a ministry.
#[derive(Debug, Clone, Deserialize)]
pub struct AddMinistryMember {
    pub member_id: DbId,
    #[serde(default)]
    pub role: MinistryRole,
}
