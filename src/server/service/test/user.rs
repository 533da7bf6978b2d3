use super::*;
use crate::server::{
    error::{auth::AuthError, lifecycle::LifecycleError},
    model::{
        pagination::PageRequest,
        user::{SignupParams, UpdateUserParams},
    },
    policy::{rank, DenyReason},
    service::{auth::AuthService, user::UserService},
};

const ADMIN_TOKEN: &str = "provisioned-secret";

fn signup(username: &str, role: Role, admin_token: Option<&str>) -> SignupParams {
    SignupParams {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        role,
        admin_token: admin_token.map(str::to_string),
    }
}

/// Tests signing up a customer.
///
/// Expected: Ok with the stored user, readable back through the user service
#[tokio::test]
async fn signs_up_customer() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = AuthService::new(db);
    let user = service
        .signup(signup("alice", Role::Customer, None), ADMIN_TOKEN)
        .await?;

    assert_eq!(user.role, Role::Customer);
    let stored = UserService::new(db)
        .get(Some(&principal_with_role(db, Role::Master).await?), user.id)
        .await?;
    assert_eq!(stored.username, "alice");

    Ok(())
}

/// Tests that elevated roles need the provisioned admin token.
///
/// Expected: InvalidAdminToken without or with a wrong token, Ok with the right one
#[tokio::test]
async fn elevated_signup_requires_admin_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = AuthService::new(db);

    let missing = service
        .signup(signup("boss", Role::Manager, None), ADMIN_TOKEN)
        .await;
    assert!(matches!(
        missing,
        Err(AppError::AuthErr(AuthError::InvalidAdminToken))
    ));

    let wrong = service
        .signup(signup("boss", Role::Master, Some("guess")), ADMIN_TOKEN)
        .await;
    assert!(matches!(
        wrong,
        Err(AppError::AuthErr(AuthError::InvalidAdminToken))
    ));

    let manager = service
        .signup(signup("boss", Role::Manager, Some(ADMIN_TOKEN)), ADMIN_TOKEN)
        .await?;
    assert_eq!(manager.role, Role::Manager);

    Ok(())
}

/// Tests that a username held by a tombstoned user cannot be reused.
///
/// Expected: Conflict for the duplicate username and for the duplicate email
#[tokio::test]
async fn signup_rejects_duplicate_username_and_email() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .username("taken")
        .email("taken@example.com")
        .deleted()
        .build()
        .await?;

    let service = AuthService::new(db);

    let by_name = service
        .signup(signup("taken", Role::Customer, None), ADMIN_TOKEN)
        .await;
    assert!(matches!(by_name, Err(AppError::Conflict(_))));

    let mut params = signup("fresh", Role::Customer, None);
    params.email = "taken@example.com".to_string();
    let by_email = service.signup(params, ADMIN_TOKEN).await;
    assert!(matches!(by_email, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests that signup rejects malformed usernames and emails before touching the database.
///
/// Expected: BadRequest for each malformed input and no user row stored
#[tokio::test]
async fn signup_rejects_malformed_username_and_email() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = AuthService::new(db);

    for username in ["abc", "waytoolongname", "Alice", "bob_1"] {
        let result = service
            .signup(signup(username, Role::Customer, None), ADMIN_TOKEN)
            .await;
        assert!(
            matches!(result, Err(AppError::BadRequest(_))),
            "{username} should be rejected"
        );
    }

    for email in ["not-an-email", "carol@", "carol@localhost"] {
        let mut params = signup("carol", Role::Customer, None);
        params.email = email.to_string();
        let result = service.signup(params, ADMIN_TOKEN).await;
        assert!(
            matches!(result, Err(AppError::BadRequest(_))),
            "{email} should be rejected"
        );
    }

    assert_eq!(entity::prelude::User::find().count(db).await?, 0);

    Ok(())
}

/// Tests that an update applies the signup format rules to a changed username or email.
///
/// Expected: BadRequest for both, stored user unchanged
#[tokio::test]
async fn update_rejects_malformed_username_and_email() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let customer = factory::create_user(db).await?;
    let caller = principal(&customer);
    let service = UserService::new(db);

    let bad_name = service
        .update(
            Some(&caller),
            customer.id,
            UpdateUserParams {
                username: Some("No Spaces".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(bad_name, Err(AppError::BadRequest(_))));

    let bad_email = service
        .update(
            Some(&caller),
            customer.id,
            UpdateUserParams {
                email: Some("nobody".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(bad_email, Err(AppError::BadRequest(_))));

    let stored = service.get(Some(&caller), customer.id).await?;
    assert_eq!(stored.username, customer.username);
    assert_eq!(stored.email, customer.email);

    Ok(())
}

/// Tests the rank escalation guard over every (actor, target) role pair.
///
/// An actor allowed by the self-or-staff rule is still denied when the target outranks it,
/// unless the actor is MASTER.
///
/// Expected: RankEscalation exactly where the target outranks a non-MASTER actor
#[tokio::test]
async fn update_denies_targets_that_outrank_the_actor() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let roles = [Role::Customer, Role::Owner, Role::Manager, Role::Master];

    for actor_role in [Role::Manager, Role::Master] {
        let actor = principal_with_role(db, actor_role).await?;

        for target_role in roles {
            let target = factory::create_user_with_role(db, target_role).await?;
            let params = UpdateUserParams {
                email: Some(format!("renamed{}@example.com", target.id)),
                ..Default::default()
            };

            let result = UserService::new(db)
                .update(Some(&actor), target.id, params)
                .await;

            let outranked = rank(target_role) > rank(actor_role);
            if outranked && actor_role != Role::Master {
                assert!(
                    matches!(
                        result,
                        Err(AppError::AuthErr(AuthError::Forbidden(
                            DenyReason::RankEscalation
                        )))
                    ),
                    "{:?} -> {:?}",
                    actor_role,
                    target_role
                );
            } else {
                assert!(result.is_ok(), "{:?} -> {:?}", actor_role, target_role);
            }
        }
    }

    Ok(())
}

/// Tests that a customer may edit itself but not another customer, nor change its role.
///
/// Expected: Ok for self, NotOwner for another user, InsufficientRole for a role change
#[tokio::test]
async fn customer_updates_only_itself_without_role_changes() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let customer = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let caller = principal(&customer);
    let service = UserService::new(db);

    let updated = service
        .update(
            Some(&caller),
            customer.id,
            UpdateUserParams {
                username: Some("renamed".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.username, "renamed");

    let other_result = service
        .update(
            Some(&caller),
            other.id,
            UpdateUserParams {
                username: Some("hijacked".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(
        other_result,
        Err(AppError::AuthErr(AuthError::Forbidden(DenyReason::NotOwner)))
    ));

    let promote = service
        .update(
            Some(&caller),
            customer.id,
            UpdateUserParams {
                role: Some(Role::Manager),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(
        promote,
        Err(AppError::AuthErr(AuthError::Forbidden(
            DenyReason::InsufficientRole
        )))
    ));

    Ok(())
}

/// Tests that a MANAGER cannot grant MASTER.
///
/// Expected: RankEscalation
#[tokio::test]
async fn manager_cannot_grant_a_role_above_its_own() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let manager = principal_with_role(db, Role::Manager).await?;
    let customer = factory::create_user(db).await?;

    let result = UserService::new(db)
        .update(
            Some(&manager),
            customer.id,
            UpdateUserParams {
                role: Some(Role::Master),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::Forbidden(
            DenyReason::RankEscalation
        )))
    ));

    Ok(())
}

/// Tests that deleting a user twice fails and keeps the first tombstone.
///
/// Expected: AlreadyDeleted on the second call, deleted_at unchanged, get returns NotFound
#[tokio::test]
async fn repeated_delete_is_rejected_without_restamping() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let customer = factory::create_user(db).await?;
    let caller = principal(&customer);
    let master = principal_with_role(db, Role::Master).await?;
    let service = UserService::new(db);

    service.delete(Some(&caller), customer.id).await?;
    let first = entity::prelude::User::find_by_id(customer.id)
        .one(db)
        .await?
        .unwrap();
    assert!(first.deleted_at.is_some());
    assert_eq!(first.deleted_by.as_deref(), Some(customer.username.as_str()));

    let again = service.delete(Some(&master), customer.id).await;
    assert!(matches!(
        again,
        Err(AppError::LifecycleErr(LifecycleError::AlreadyDeleted { .. }))
    ));

    let second = entity::prelude::User::find_by_id(customer.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(second.deleted_at, first.deleted_at);
    assert_eq!(second.deleted_by, first.deleted_by);

    let get = service.get(Some(&master), customer.id).await;
    assert!(matches!(
        get,
        Err(AppError::LifecycleErr(LifecycleError::NotFound { .. }))
    ));

    Ok(())
}

/// Tests that only MANAGER and MASTER may search users.
///
/// Expected: InsufficientRole for a customer, Ok with live matches for a manager
#[tokio::test]
async fn search_is_staff_only() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .username("searchable")
        .build()
        .await?;
    let customer = principal_with_role(db, Role::Customer).await?;
    let manager = principal_with_role(db, Role::Manager).await?;
    let service = UserService::new(db);

    let denied = service
        .search(Some(&customer), Some("search"), PageRequest::default())
        .await;
    assert!(matches!(
        denied,
        Err(AppError::AuthErr(AuthError::Forbidden(
            DenyReason::InsufficientRole
        )))
    ));

    let page = service
        .search(Some(&manager), Some("search"), PageRequest::default())
        .await?;
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].username, "searchable");

    Ok(())
}
