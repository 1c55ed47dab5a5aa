//! Sacrament record model and DTOs.

use parish_core::sacrament::SacramentType;
use parish_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sacraments` table joined with the member's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sacrament {
    pub id: DbId,
    pub member_id: DbId,
    pub member_name: String,
    pub sacrament_type: String,
    pub date: Date,
    pub place: Option<String>,
    pub officiant: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSacrament {
    pub member_id: DbId,
    pub sacrament_type: SacramentType,
    pub date: Date,
    pub place: Option<String>,
    pub officiant: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating a sacrament record. The member cannot be changed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSacrament {
    pub sacrament_type: Option<SacramentType>,
    pub date: Option<Date>,
    pub place: Option<String>,
    pub officiant: Option<String>,
    pub notes: Option<String>,
}
