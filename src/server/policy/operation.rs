//! Per-operation access table.
//!
//! Each guarded operation maps to exactly one [`Access`] rule in [`Operation::access`]; the
//! table is the only place where "who may do what" is written down.

use entity::sea_orm_active_enums::Role;

use super::{authorize, authorize_owner_or_role, Decision, DenyReason, Principal};
use crate::server::error::auth::AuthError;

const MASTER: &[Role] = &[Role::Master];
const CUSTOMER: &[Role] = &[Role::Customer];
const OWNER: &[Role] = &[Role::Owner];
const OWNER_MASTER: &[Role] = &[Role::Owner, Role::Master];
const MANAGER_MASTER: &[Role] = &[Role::Manager, Role::Master];
const NONE: &[Role] = &[];

/// Access rule attached to an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any authenticated caller.
    Authenticated,
    /// Caller's role must be in the set.
    Roles(&'static [Role]),
    /// Caller must own the resource or hold a role in the set.
    OwnerOrRoles(&'static [Role]),
    /// Caller must own the resource while holding one of `owner` roles, or hold one of
    /// `roles`. A non-owner with an `owner` role is denied.
    OwnerHoldingOrRoles {
        owner: &'static [Role],
        roles: &'static [Role],
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateCategory,
    UpdateCategory,
    DeleteCategory,
    CreateMenu,
    UpdateMenu,
    DeleteMenu,
    CreateOrder,
    GetOrder,
    UpdateOrder,
    DeleteOrder,
    ListOrders,
    CreateStore,
    UpdateStore,
    DeleteStore,
    CreateDeliveryAddress,
    ReadDeliveryAddress,
    UpdateDeliveryAddress,
    DeleteDeliveryAddress,
    CreateReview,
    UpdateReview,
    DeleteReview,
    GetUser,
    SearchUsers,
    UpdateUser,
    DeleteUser,
    CreateAiSuggestion,
    ReadAiSuggestion,
    DeleteAiSuggestion,
}

impl Operation {
    pub fn access(self) -> Access {
        use Operation::*;

        match self {
            CreateCategory | UpdateCategory | DeleteCategory => Access::Roles(MASTER),
            CreateMenu | UpdateMenu | DeleteMenu => Access::OwnerHoldingOrRoles {
                owner: OWNER,
                roles: MASTER,
            },
            CreateOrder => Access::OwnerOrRoles(MANAGER_MASTER),
            GetOrder => Access::Authenticated,
            UpdateOrder | DeleteOrder | ListOrders => Access::Roles(MANAGER_MASTER),
            CreateStore => Access::Roles(MASTER),
            UpdateStore | DeleteStore => Access::OwnerHoldingOrRoles {
                owner: OWNER,
                roles: MASTER,
            },
            CreateDeliveryAddress
            | ReadDeliveryAddress
            | UpdateDeliveryAddress
            | DeleteDeliveryAddress => Access::OwnerHoldingOrRoles {
                owner: CUSTOMER,
                roles: NONE,
            },
            CreateReview => Access::Roles(CUSTOMER),
            UpdateReview => Access::OwnerHoldingOrRoles {
                owner: CUSTOMER,
                roles: NONE,
            },
            DeleteReview => Access::OwnerHoldingOrRoles {
                owner: CUSTOMER,
                roles: MASTER,
            },
            GetUser | UpdateUser => Access::OwnerOrRoles(MANAGER_MASTER),
            SearchUsers => Access::Roles(MANAGER_MASTER),
            DeleteUser => Access::OwnerOrRoles(MASTER),
            CreateAiSuggestion => Access::Roles(OWNER_MASTER),
            ReadAiSuggestion | DeleteAiSuggestion => Access::Roles(MASTER),
        }
    }

    /// Decides whether `caller` may perform this operation.
    ///
    /// # Arguments
    /// - `caller` - Authenticated principal, if any
    /// - `owner_id` - Owning user of the target resource; ownership rules fall back to their
    ///   role set when the resource has no owner
    pub fn authorize(self, caller: Option<&Principal>, owner_id: Option<i32>) -> Decision {
        match (self.access(), owner_id) {
            (Access::Authenticated, _) => match caller {
                Some(_) => Decision::Allow,
                None => Decision::Deny(DenyReason::Unauthenticated),
            },
            (Access::Roles(roles), _) => authorize(caller, roles),
            (Access::OwnerOrRoles(roles), Some(owner_id)) => {
                authorize_owner_or_role(caller, owner_id, roles)
            }
            (Access::OwnerOrRoles(roles), None) => authorize(caller, roles),
            (Access::OwnerHoldingOrRoles { owner, roles }, owner_id) => {
                let Some(principal) = caller else {
                    return Decision::Deny(DenyReason::Unauthenticated);
                };

                let owns = owner_id == Some(principal.id);
                if (owns && authorize(caller, owner).is_allowed())
                    || authorize(caller, roles).is_allowed()
                {
                    Decision::Allow
                } else if owns {
                    Decision::Deny(DenyReason::InsufficientRole)
                } else {
                    Decision::Deny(DenyReason::NotOwner)
                }
            }
        }
    }

    /// Like [`Operation::authorize`] but returns the authenticated principal on success.
    pub fn require<'a>(
        self,
        caller: Option<&'a Principal>,
        owner_id: Option<i32>,
    ) -> Result<&'a Principal, AuthError> {
        self.authorize(caller, owner_id).into_result()?;

        caller.ok_or(AuthError::Unauthenticated)
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
    fn category_mutations_are_master_only() {
        for op in [
            Operation::CreateCategory,
            Operation::UpdateCategory,
            Operation::DeleteCategory,
        ] {
            for role in Role::iter() {
                let allowed = op.authorize(Some(&principal(1, role)), None).is_allowed();
                assert_eq!(allowed, role == Role::Master, "{:?} as {:?}", op, role);
            }
        }
    }

    #[test]
    fn order_mutations_need_manager_or_master() {
        for op in [
            Operation::UpdateOrder,
            Operation::DeleteOrder,
            Operation::ListOrders,
        ] {
            assert!(op.authorize(Some(&principal(1, Role::Manager)), None).is_allowed());
            assert!(op.authorize(Some(&principal(1, Role::Master)), None).is_allowed());
            assert_eq!(
                op.authorize(Some(&principal(1, Role::Customer)), Some(1)),
                Decision::Deny(DenyReason::InsufficientRole)
            );
            assert_eq!(
                op.authorize(Some(&principal(1, Role::Owner)), None),
                Decision::Deny(DenyReason::InsufficientRole)
            );
        }
    }

    #[test]
    fn store_create_is_master_only_but_owner_may_edit_own_store() {
        let owner = principal(3, Role::Owner);

        assert!(!Operation::CreateStore
            .authorize(Some(&owner), None)
            .is_allowed());
        assert!(Operation::UpdateStore
            .authorize(Some(&owner), Some(3))
            .is_allowed());
        assert_eq!(
            Operation::DeleteStore.authorize(Some(&owner), Some(4)),
            Decision::Deny(DenyReason::NotOwner)
        );
        assert!(Operation::DeleteStore
            .authorize(Some(&principal(9, Role::Master)), Some(4))
            .is_allowed());
    }

    #[test]
    fn customer_may_always_act_on_own_address_and_review() {
        let customer = principal(5, Role::Customer);

        for op in [
            Operation::CreateDeliveryAddress,
            Operation::ReadDeliveryAddress,
            Operation::UpdateDeliveryAddress,
            Operation::DeleteDeliveryAddress,
            Operation::UpdateReview,
            Operation::DeleteReview,
        ] {
            assert!(op.authorize(Some(&customer), Some(5)).is_allowed(), "{:?}", op);
        }
    }

    #[test]
    fn other_customer_is_always_denied() {
        let other = principal(6, Role::Customer);

        for op in [
            Operation::CreateDeliveryAddress,
            Operation::ReadDeliveryAddress,
            Operation::UpdateDeliveryAddress,
            Operation::DeleteDeliveryAddress,
            Operation::UpdateReview,
            Operation::DeleteReview,
        ] {
            assert_eq!(
                op.authorize(Some(&other), Some(5)),
                Decision::Deny(DenyReason::NotOwner),
                "{:?}",
                op
            );
        }
    }

    #[test]
    fn master_may_delete_any_review_but_not_edit_it() {
        let master = principal(1, Role::Master);

        assert!(Operation::DeleteReview
            .authorize(Some(&master), Some(5))
            .is_allowed());
        assert!(!Operation::UpdateReview
            .authorize(Some(&master), Some(5))
            .is_allowed());
    }

    #[test]
    fn review_create_is_customer_only() {
        for role in Role::iter() {
            let allowed = Operation::CreateReview
                .authorize(Some(&principal(1, role)), None)
                .is_allowed();
            assert_eq!(allowed, role == Role::Customer);
        }
    }

    #[test]
    fn user_delete_is_self_or_master() {
        assert!(Operation::DeleteUser
            .authorize(Some(&principal(2, Role::Customer)), Some(2))
            .is_allowed());
        assert!(Operation::DeleteUser
            .authorize(Some(&principal(1, Role::Master)), Some(2))
            .is_allowed());
        assert!(!Operation::DeleteUser
            .authorize(Some(&principal(1, Role::Manager)), Some(2))
            .is_allowed());
    }

    #[test]
    fn user_update_is_self_manager_or_master() {
        assert!(Operation::UpdateUser
            .authorize(Some(&principal(2, Role::Customer)), Some(2))
            .is_allowed());
        assert!(Operation::UpdateUser
            .authorize(Some(&principal(1, Role::Manager)), Some(2))
            .is_allowed());
        assert!(!Operation::UpdateUser
            .authorize(Some(&principal(1, Role::Owner)), Some(2))
            .is_allowed());
    }

    #[test]
    fn anonymous_caller_is_denied() {
        for op in [
            Operation::CreateOrder,
            Operation::GetOrder,
            Operation::UpdateOrder,
            Operation::CreateDeliveryAddress,
            Operation::DeleteUser,
        ] {
            assert_eq!(
                op.authorize(None, Some(1)),
                Decision::Deny(DenyReason::Unauthenticated)
            );
        }
    }

    #[test]
    fn require_returns_the_principal() {
        let manager = principal(4, Role::Manager);

        let actor = Operation::UpdateOrder.require(Some(&manager), None).unwrap();
        assert_eq!(actor.id, 4);

        assert!(matches!(
            Operation::UpdateOrder.require(None, None),
            Err(AuthError::Unauthenticated)
        ));
    }
}
