//! Member status, family roles and the approval workflow.
//!
//! The approval workflow is a small state machine:
//!
//! ```text
//! PENDING_APPROVAL --approve--> ACTIVE
//! PENDING_APPROVAL --manual---> INACTIVE
//! ACTIVE <--------manual------> INACTIVE
//! ```
//!
//! Nothing ever moves back to `PENDING_APPROVAL`, and there are no timed
//! transitions.

use crate::define_text_enum;
use crate::error::CoreError;

/// Platform event name emitted when a pending member is approved.
pub const MEMBER_APPROVED: &str = "member.approved";

define_text_enum! {
    /// Directory status of a member.
    MemberStatus {
        Active = "ACTIVE",
        PendingApproval = "PENDING_APPROVAL",
        Inactive = "INACTIVE",
    }
}

define_text_enum! {
    /// Position of a member inside their family.
    FamilyRole {
        Head = "HEAD",
        Spouse = "SPOUSE",
        Father = "FATHER",
        Mother = "MOTHER",
        Son = "SON",
        Daughter = "DAUGHTER",
        Grandfather = "GRANDFATHER",
        Grandmother = "GRANDMOTHER",
        Member = "MEMBER",
    }
}

impl FamilyRole {
    /// The `head_of_family` flag that accompanies this role.
    pub fn is_head(self) -> bool {
        self == FamilyRole::Head
    }
}

/// Validate a manual status change.
pub fn validate_status_transition(from: MemberStatus, to: MemberStatus) -> Result<(), CoreError> {
    use MemberStatus::*;
    match (from, to) {
        (a, b) if a == b => Ok(()),
        (PendingApproval, Active) | (PendingApproval, Inactive) => Ok(()),
        (Active, Inactive) | (Inactive, Active) => Ok(()),
        (_, PendingApproval) => Err(CoreError::Conflict(format!(
            "Cannot move a member from {from} back to PENDING_APPROVAL"
        ))),
        _ => Err(CoreError::Conflict(format!(
            "Invalid status transition {from} -> {to}"
        ))),
    }
}

/// Validate the explicit approve action, which only applies to pending members.
pub fn validate_approval(current: MemberStatus) -> Result<(), CoreError> {
    if current == MemberStatus::PendingApproval {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Only members pending approval can be approved (current status: {current})"
        )))
    }
}

/// Build a display name the way the directory lists it.
pub fn full_name(first_name: &str, last_name: &str) -> String {
    match (first_name.trim(), last_name.trim()) {
        ("", last) => last.to_string(),
        (first, "") => first.to_string(),
        (first, last) => format!("{first} {last}"),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn approve_pending_member() {
        assert!(validate_approval(MemberStatus::PendingApproval).is_ok());
    }

    #[test]
    fn approve_active_member_conflicts() {
        assert_matches!(
            validate_approval(MemberStatus::Active),
            Err(CoreError::Conflict(_))
        );
        assert_matches!(
            validate_approval(MemberStatus::Inactive),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn manual_transitions() {
        use MemberStatus::*;
        assert!(validate_status_transition(PendingApproval, Inactive).is_ok());
        assert!(validate_status_transition(Active, Inactive).is_ok());
        assert!(validate_status_transition(Inactive, Active).is_ok());
        assert!(validate_status_transition(Active, Active).is_ok());
    }

    #[test]
    fn nothing_returns_to_pending() {
        use MemberStatus::*;
        assert_matches!(
            validate_status_transition(Active, PendingApproval),
            Err(CoreError::Conflict(_))
        );
        assert_matches!(
            validate_status_transition(Inactive, PendingApproval),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn head_role_sets_flag() {
        assert!(FamilyRole::Head.is_head());
        assert!(!FamilyRole::Spouse.is_head());
        assert!(!FamilyRole::Member.is_head());
    }

    #[test]
    fn full_name_handles_blank_parts() {
        assert_eq!(full_name("John", "Smith"), "John Smith");
        assert_eq!(full_name("John", ""), "John");
        assert_eq!(full_name("  ", "Smith"), "Smith");
    }
}
