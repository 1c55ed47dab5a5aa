//! Family entity model and DTOs.

use parish_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::house::House;
use crate::models::member::Member;

/// A row from the `families` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Family {
    pub id: DbId,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    /// Disambiguates families sharing a surname.
    pub house_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Family row enriched with member and house counts for the list view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FamilySummary {
    pub id: DbId,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub house_name: Option<String>,
    pub member_count: i64,
    pub house_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFamily {
    #[validate(length(min = 1, max = 200, message = "Family name is required"))]
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub house_name: Option<String>,
}

/// DTO for updating a family. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateFamily {
    #[validate(length(min = 1, max = 200, message = "Family name cannot be empty"))]
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub house_name: Option<String>,
}

/// A house together with the members living in it.
#[derive(Debug, Clone, Serialize)]
pub struct HouseBranch {
    #[serde(flatten)]
    pub house: House,
    pub members: Vec<Member>,
}

/// The whole household tree of one family, as rendered by the org chart.
#[derive(Debug, Clone, Serialize)]
pub struct FamilyTree {
    pub family: Family,
    pub houses: Vec<HouseBranch>,
    /// Members of the family that are not placed in any house.
    pub unhoused_members: Vec<Member>,
    pub related_families: Vec<Family>,
}
