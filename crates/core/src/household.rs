//! Family / house / member containment rules.
//!
//! A member belongs to at most one family and, inside it, to at most one
//! house. A house belongs to exactly one family and never moves. The rules
//! here are pure; the repositories apply them inside a transaction after
//! loading the rows involved.

use crate::error::CoreError;
use crate::types::DbId;

/// Where a member currently sits in the household tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    pub family_id: Option<DbId>,
    pub house_id: Option<DbId>,
    pub spouse_id: Option<DbId>,
}

/// The column values an assignment will write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentPlan {
    pub family_id: DbId,
    pub house_id: Option<DbId>,
    /// Set when the member changes family while still linked to a spouse.
    pub clear_spouse: bool,
}

/// Work out an assignment of a member to `family_id` (and optionally a house).
///
/// `house_family_id` is the family that owns the requested house, as loaded
/// from the database. The house is written exactly as requested, so omitting
/// it places the member directly under the family.
pub fn plan_assignment(
    current: &Placement,
    family_id: DbId,
    house_id: Option<DbId>,
    house_family_id: Option<DbId>,
) -> Result<AssignmentPlan, CoreError> {
    if let Some(house_id) = house_id {
        if house_family_id != Some(family_id) {
            return Err(CoreError::Validation(format!(
                "House {house_id} does not belong to family {family_id}"
            )));
        }
    }

    let family_changes = current.family_id != Some(family_id);

    Ok(AssignmentPlan {
        family_id,
        house_id,
        clear_spouse: family_changes && current.spouse_id.is_some(),
    })
}

/// Check the member/house invariant for a row about to be written.
pub fn check_house_in_family(
    family_id: Option<DbId>,
    house_id: Option<DbId>,
    house_family_id: Option<DbId>,
) -> Result<(), CoreError> {
    match (family_id, house_id) {
        (_, None) => Ok(()),
        (None, Some(house_id)) => Err(CoreError::Validation(format!(
            "Member cannot be placed in house {house_id} without a family"
        ))),
        (Some(family_id), Some(house_id)) if house_family_id == Some(family_id) => Ok(()),
        (Some(family_id), Some(house_id)) => Err(CoreError::Validation(format!(
            "House {house_id} does not belong to family {family_id}"
        ))),
    }
}

/// Validate a related-family link and return it as an ordered pair.
///
/// The relation is symmetric, so it is stored once with the smaller id first.
pub fn related_family_pair(family_id: DbId, related_family_id: DbId) -> Result<(DbId, DbId), CoreError> {
    if family_id == related_family_id {
        return Err(CoreError::Validation(
            "A family cannot be related to itself".to_string(),
        ));
    }
    Ok((family_id.min(related_family_id), family_id.max(related_family_id)))
}

/// Validate a spouse link. Reciprocity is not enforced.
pub fn validate_spouse(member_id: DbId, spouse_id: Option<DbId>) -> Result<(), CoreError> {
    if spouse_id == Some(member_id) {
        return Err(CoreError::Validation(
            "A member cannot be their own spouse".to_string(),
        ));
    }
    Ok(())
}

/// Validate that the proposed head of a house lives in that house.
pub fn validate_house_head(
    house_id: DbId,
    member_id: DbId,
    member_house_id: Option<DbId>,
) -> Result<(), CoreError> {
    if member_house_id != Some(house_id) {
        return Err(CoreError::Validation(format!(
            "Member {member_id} is not in house {house_id}"
        )));
    }
    Ok(())
}
