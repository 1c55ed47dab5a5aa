//! Well-known role names.
//!
//! These must match the `CHECK` constraint on `users.role` in
//! `20260101000004_create_users.sql`.

use crate::define_text_enum;

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_PASTOR: &str = "PASTOR";
pub const ROLE_STAFF: &str = "STAFF";
pub const ROLE_MEMBER: &str = "MEMBER";

define_text_enum! {
    /// Access role carried by a user and embedded in its JWT.
    Role {
        Admin = "ADMIN",
        Pastor = "PASTOR",
        Staff = "STAFF",
        Member = "MEMBER",
    }
}

impl Role {
    /// Roles allowed into the `/admin` surface.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::Pastor | Role::Staff)
    }
}

/// Whether a role name (as found in token claims) may use the admin panel.
pub fn is_staff_role(role: &str) -> bool {
    Role::parse(role).map(Role::is_staff).unwrap_or(false)
}
