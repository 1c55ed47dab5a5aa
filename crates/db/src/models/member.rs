//! Member entity model and DTOs.
//!
//! Family and house placement is deliberately absent from [`UpdateMember`]:
//! it only changes through the assignment operations on `MemberRepo`, which
//! enforce the house-in-family rule.

use parish_core::member::{FamilyRole, MemberStatus};
use parish_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Member {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub photo_url: Option<String>,
    pub status: String,
    pub family_id: Option<DbId>,
    pub house_id: Option<DbId>,
    pub family_role: Option<String>,
    pub head_of_family: bool,
    pub spouse_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Member {
    /// Current placement in the household tree.
    pub fn placement(&self) -> parish_core::household::Placement {
        parish_core::household::Placement {
            family_id: self.family_id,
            house_id: self.house_id,
            spouse_id: self.spouse_id,
        }
    }
}

/// Directory row: a member plus the names of its family and house.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MemberListItem {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    pub status: String,
    pub family_id: Option<DbId>,
    pub family_name: Option<String>,
    pub house_id: Option<DbId>,
    pub house_name: Option<String>,
    pub family_role: Option<String>,
    pub head_of_family: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a member.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMember {
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub last_name: String,
    #[validate(email(message = "Email address is not valid"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub photo_url: Option<String>,
    /// Defaults to `PENDING_APPROVAL` if omitted.
    pub status: Option<MemberStatus>,
}

/// DTO for updating a member's personal details. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMember {
    #[validate(length(min = 1, max = 100, message = "First name cannot be empty"))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(email(message = "Email address is not valid"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub photo_url: Option<String>,
}

/// Request to place a member in a family and, optionally, one of its houses.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignFamily {
    pub family_id: DbId,
    pub house_id: Option<DbId>,
    pub family_role: Option<FamilyRole>,
}
