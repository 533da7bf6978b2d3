//! Role ranking used by the escalation guard.

use entity::sea_orm_active_enums::Role;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleError {
    /// A role was required for comparison but none was present.
    #[error("Role is missing or unset")]
    InvalidRole,
}

/// Returns the rank of a role. Ranks are strictly increasing from CUSTOMER to MASTER.
pub fn rank(role: Role) -> u8 {
    match role {
        Role::Customer => 1,
        Role::Owner => 2,
        Role::Manager => 3,
        Role::Master => 4,
    }
}

/// Returns true iff `a` strictly outranks `b`.
///
/// # Arguments
/// - `a` - Role on the left-hand side of the comparison
/// - `b` - Role on the right-hand side of the comparison
///
/// # Returns
/// - `Ok(bool)` - Whether `rank(a) > rank(b)`
/// - `Err(RoleError::InvalidRole)` - Either role is absent; a missing role never counts as
///   the lowest rank
pub fn is_strictly_higher(a: Option<Role>, b: Option<Role>) -> Result<bool, RoleError> {
    match (a, b) {
        (Some(a), Some(b)) => Ok(rank(a) > rank(b)),
        _ => Err(RoleError::InvalidRole),
    }
}
