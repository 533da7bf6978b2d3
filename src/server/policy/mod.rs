//! Authorization policy engine.
//!
//! Every guarded operation is decided here from the caller's [`Principal`] and the
//! operation's entry in the [`operation::Operation`] table. Decisions are pure; callers turn a
//! [`Decision::Deny`] into a 401 (no caller) or 403 (caller present but not allowed).

pub mod operation;
pub mod rank;

use entity::sea_orm_active_enums::Role;

use crate::server::error::auth::AuthError;

pub use operation::{Access, Operation};
pub use rank::{is_strictly_higher, rank, RoleError};

/// Identity and role of the authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: i32,
    pub username: String,
    pub role: Role,
}

impl Principal {
    pub fn from_entity(user: &entity::user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
        }
    }
}

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No caller identity was supplied.
    Unauthenticated,
    /// Caller's role is not in the allowed set.
    InsufficientRole,
    /// Caller neither owns the resource nor holds an allowed role.
    NotOwner,
    /// Target user outranks the caller.
    RankEscalation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Converts the decision into a result, mapping denials onto 401 or 403 errors.
    pub fn into_result(self) -> Result<(), AuthError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(DenyReason::Unauthenticated) => Err(AuthError::Unauthenticated),
            Decision::Deny(reason) => Err(AuthError::Forbidden(reason)),
        }
    }
}

/// Rejects an anonymous caller before any resource lookup, so a missing row never
/// answers 404 to a request that carries no identity.
pub fn authenticate(caller: Option<&Principal>) -> Result<&Principal, AuthError> {
    caller.ok_or(AuthError::Unauthenticated)
}

/// Allows the caller iff its role is a member of `required`.
///
/// `required` is a set, not a threshold: `[Owner, Master]` does not admit a MANAGER.
pub fn authorize(caller: Option<&Principal>, required: &[Role]) -> Decision {
    let Some(caller) = caller else {
        return Decision::Deny(DenyReason::Unauthenticated);
    };

    if required.contains(&caller.role) {
        Decision::Allow
    } else {
        Decision::Deny(DenyReason::InsufficientRole)
    }
}

/// Allows the caller if it owns the resource or its role is a member of `required`.
pub fn authorize_owner_or_role(
    caller: Option<&Principal>,
    resource_owner_id: i32,
    required: &[Role],
) -> Decision {
    let Some(caller) = caller else {
        return Decision::Deny(DenyReason::Unauthenticated);
    };

    if caller.id == resource_owner_id || required.contains(&caller.role) {
        Decision::Allow
    } else {
        Decision::Deny(DenyReason::NotOwner)
    }
}

/// Denies an actor modifying a user whose role outranks its own. MASTER is never denied.
pub fn guard_rank(actor: &Principal, target_role: Role) -> Result<Decision, RoleError> {
    if actor.role == Role::Master {
        return Ok(Decision::Allow);
    }

    if is_strictly_higher(Some(target_role), Some(actor.role))? {
        Ok(Decision::Deny(DenyReason::RankEscalation))
    } else {
        Ok(Decision::Allow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    fn principal(id: i32, role: Role) -> Principal {
        Principal {
            id,
            username: format!("user{}", id),
            role,
        }
    }

    #[test]
    fn anonymous_caller_is_unauthenticated() {
        assert_eq!(
            authorize(None, &[Role::Master]),
            Decision::Deny(DenyReason::Unauthenticated)
        );
        assert_eq!(
            authorize_owner_or_role(None, 1, &[Role::Master]),
            Decision::Deny(DenyReason::Unauthenticated)
        );
    }

    #[test]
    fn authenticate_rejects_only_anonymous_callers() {
        let caller = principal(7, Role::Customer);

        assert!(matches!(authenticate(None), Err(AuthError::Unauthenticated)));
        assert_eq!(authenticate(Some(&caller)).ok().map(|p| p.id), Some(7));
    }

    #[test]
    fn required_roles_are_a_set_not_a_threshold() {
        let required = [Role::Owner, Role::Master];

        assert!(authorize(Some(&principal(1, Role::Owner)), &required).is_allowed());
        assert!(authorize(Some(&principal(1, Role::Master)), &required).is_allowed());
        assert_eq!(
            authorize(Some(&principal(1, Role::Manager)), &required),
            Decision::Deny(DenyReason::InsufficientRole)
        );
        assert_eq!(
            authorize(Some(&principal(1, Role::Customer)), &required),
            Decision::Deny(DenyReason::InsufficientRole)
        );
    }

    #[test]
    fn owner_is_allowed_regardless_of_role() {
        for role in Role::iter() {
            let caller = principal(7, role);
            assert!(authorize_owner_or_role(Some(&caller), 7, &[]).is_allowed());
        }
    }

    #[test]
    fn non_owner_needs_listed_role() {
        let manager = principal(1, Role::Manager);
        let customer = principal(2, Role::Customer);

        assert!(authorize_owner_or_role(Some(&manager), 9, &[Role::Manager]).is_allowed());
        assert_eq!(
            authorize_owner_or_role(Some(&customer), 9, &[Role::Manager]),
            Decision::Deny(DenyReason::NotOwner)
        );
    }

    #[test]
    fn rank_guard_blocks_outranked_targets_except_for_master() {
        for actor_role in Role::iter() {
            for target_role in Role::iter() {
                let actor = principal(1, actor_role);
                let decision = guard_rank(&actor, target_role).unwrap();

                if actor_role != Role::Master && rank(target_role) > rank(actor_role) {
                    assert_eq!(decision, Decision::Deny(DenyReason::RankEscalation));
                } else {
                    assert_eq!(decision, Decision::Allow);
                }
            }
        }
    }

    #[test]
    fn denial_maps_to_status_specific_errors() {
        assert!(matches!(
            Decision::Deny(DenyReason::Unauthenticated).into_result(),
            Err(AuthError::Unauthenticated)
        ));
        assert!(matches!(
            Decision::Deny(DenyReason::NotOwner).into_result(),
            Err(AuthError::Forbidden(DenyReason::NotOwner))
        ));
        assert!(Decision::Allow.into_result().is_ok());
    }
}
