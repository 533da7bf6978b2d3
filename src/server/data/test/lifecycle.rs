use super::*;
use crate::server::data::lifecycle::LiveScope;
use chrono::Duration;
use sea_orm::{ColumnTrait, QueryFilter};

/// Tests that the live scope hides tombstoned rows.
///
/// Verifies that `find_live` and `find_live_by_id` filter in SQL while the tombstoned row
/// still exists for an unscoped `find_by_id`.
///
/// Expected: Ok with only the live category returned
#[tokio::test]
async fn live_scope_excludes_tombstoned_rows() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Category)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let live = factory::create_category(db).await?;
    let deleted = factory::category::CategoryFactory::new(db)
        .deleted()
        .build()
        .await?;

    let all_live = entity::prelude::Category::find_live().all(db).await?;
    assert_eq!(all_live, vec![live]);

    assert!(entity::prelude::Category::find_live_by_id(deleted.id)
        .one(db)
        .await?
        .is_none());
    assert!(entity::prelude::Category::find_by_id(deleted.id)
        .one(db)
        .await?
        .is_some());

    Ok(())
}

/// Tests that bulk tombstoning never re-stamps an existing tombstone.
///
/// Verifies that `tombstone_many` only touches live rows, so a row deleted earlier keeps its
/// original `deleted_at` and `deleted_by`.
///
/// Expected: Ok with one row affected and the earlier stamp preserved
#[tokio::test]
async fn tombstone_many_preserves_existing_tombstones() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, store, _) = factory::helpers::create_menu_with_dependencies(db).await?;
    let old = factory::menu::MenuFactory::new(db, store.id)
        .deleted()
        .build()
        .await?;
    let old_deleted_at = old.deleted_at;

    let later = Utc::now() + Duration::minutes(5);
    let result = entity::prelude::Menu::tombstone_many(later, "master")
        .filter(entity::menu::Column::StoreId.eq(store.id))
        .exec(db)
        .await?;
    assert_eq!(result.rows_affected, 1);

    let old = entity::prelude::Menu::find_by_id(old.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(old.deleted_at, old_deleted_at);
    assert_eq!(old.deleted_by.as_deref(), Some("factory"));

    Ok(())
}
