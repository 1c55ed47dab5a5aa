//! Ministry membership roles.

use crate::define_text_enum;

define_text_enum! {
    /// Role of a member inside a ministry.
    MinistryRole {
        Leader = "LEADER",
        Member = "MEMBER",
    }
}

impl Default for MinistryRole {
    fn default() -> Self {
        MinistryRole::Member
    }
}
