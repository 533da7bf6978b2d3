use super::*;
use crate::server::{data::user::UserRepository, model::pagination::PageRequest};

/// Tests that usernames of tombstoned users stay reserved.
///
/// Verifies that the availability check covers every row, matching the UNIQUE column, and
/// that a user's own username is ignored when `excluding` is set.
///
/// Expected: Ok with taken usernames detected
#[tokio::test]
async fn username_taken_covers_tombstoned_users() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let live = factory::user::UserFactory::new(db)
        .username("alice")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .username("bob")
        .deleted()
        .build()
        .await?;

    let repo = UserRepository::new(db);

    assert!(repo.username_taken("alice", None).await?);
    assert!(repo.username_taken("bob", None).await?);
    assert!(!repo.username_taken("alice", Some(live.id)).await?);
    assert!(!repo.username_taken("carol", None).await?);

    Ok(())
}

/// Tests searching live users by username fragment.
///
/// Expected: Ok with only the matching live user returned
#[tokio::test]
async fn search_filters_live_users_by_fragment() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let matching = factory::user::UserFactory::new(db)
        .username("pizza-lover")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .username("pizza-hater")
        .deleted()
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .username("sushi-fan")
        .build()
        .await?;

    let (users, total) = UserRepository::new(db)
        .search(Some("pizza"), &PageRequest::default())
        .await?;

    assert_eq!(total, 1);
    assert_eq!(users, vec![matching]);

    Ok(())
}
