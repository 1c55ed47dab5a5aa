//! Notification broadcast audiences and delivery outcomes.

use crate::define_text_enum;
use crate::error::CoreError;
use crate::roles::Role;

/// Bus event published after a broadcast row is stored.
pub const NOTIFICATION_CREATED: &str = "notification.created";

define_text_enum! {
    /// Who a broadcast is addressed to.
    Audience {
        All = "ALL",
        Role = "ROLE",
    }
}

define_text_enum! {
    /// Outcome of the single push attempt made for a broadcast.
    DeliveryStatus {
        Pending = "PENDING",
        Sent = "SENT",
        Failed = "FAILED",
        /// No push gateway configured.
        Skipped = "SKIPPED",
    }
}

/// Validate the audience/target-role pair of a new broadcast.
pub fn validate_audience(audience: Audience, target_role: Option<Role>) -> Result<(), CoreError> {
    match (audience, target_role) {
        (Audience::All, None) | (Audience::Role, Some(_)) => Ok(()),
        (Audience::All, Some(_)) => Err(CoreError::Validation(
            "target_role must be omitted when audience is ALL".to_string(),
        )),
        (Audience::Role, None) => Err(CoreError::Validation(
            "target_role is required when audience is ROLE".to_string(),
        )),
    }
}

/// Whether a broadcast is visible to a user of `role`. Staff see everything.
pub fn is_visible_to(audience: Audience, target_role: Option<Role>, role: Role) -> bool {
    role.is_staff() || audience == Audience::All || target_role == Some(role)
}
