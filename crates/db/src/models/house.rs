//! House entity model and DTOs.

use parish_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `houses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct House {
    pub id: DbId,
    pub family_id: DbId,
    pub name: String,
    pub address: Option<String>,
    pub head_member_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a house. `family_id` is fixed for the life of the house.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateHouse {
    pub family_id: DbId,
    #[validate(length(min = 1, max = 200, message = "House name is required"))]
    pub name: String,
    pub address: Option<String>,
}

/// DTO for updating a house. The owning family cannot be changed.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateHouse {
    #[validate(length(min = 1, max = 200, message = "House name cannot be empty"))]
    pub name: Option<String>,
    pub address: Option<String>,
}
