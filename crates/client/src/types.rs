//! Response shapes the client deserializes. Only the fields the client reads
//! are declared; unknown fields are ignored.

use parish_core::types::{DbId, Timestamp};
use serde::Deserialize;

/// `{ "data": ... }` envelope used by detail and most list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
    pub role: String,
    pub member_id: Option<DbId>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub status: String,
    pub family_id: Option<DbId>,
    pub house_id: Option<DbId>,
    pub family_role: Option<String>,
    pub head_of_family: bool,
    pub spouse_id: Option<DbId>,
}

/// Directory row with the joined family and house names.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberListItem {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: String,
    pub family_id: Option<DbId>,
    pub family_name: Option<String>,
    pub house_id: Option<DbId>,
    pub house_name: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GalleryImage {
    pub id: DbId,
    pub album_id: DbId,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadedFile {
    pub url: String,
}
