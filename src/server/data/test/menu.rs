use super::*;
use crate::server::{data::menu::MenuRepository, model::pagination::PageRequest};

/// Tests that hidden and tombstoned menus are not orderable.
///
/// Verifies that `find_visible_by_id` only returns menus that are both live and publicly
/// visible, while `find_live_by_id` still sees a hidden live menu.
///
/// Expected: Ok with only the public menu visible
#[tokio::test]
async fn visible_lookup_requires_live_and_public() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, store, public) = factory::helpers::create_menu_with_dependencies(db).await?;
    let hidden = factory::menu::MenuFactory::new(db, store.id)
        .public_status(false)
        .build()
        .await?;
    let deleted = factory::menu::MenuFactory::new(db, store.id)
        .deleted()
        .build()
        .await?;

    let repo = MenuRepository::new(db);

    assert!(repo.find_visible_by_id(public.id).await?.is_some());
    assert!(repo.find_visible_by_id(hidden.id).await?.is_none());
    assert!(repo.find_visible_by_id(deleted.id).await?.is_none());

    assert!(repo.find_live_by_id(hidden.id).await?.is_some());
    assert!(repo.find_live_by_id(deleted.id).await?.is_none());

    Ok(())
}

/// Tests that a store's menu listing only contains visible menus.
///
/// Verifies that the tombstoned row is still in the table but neither counted nor returned.
///
/// Expected: Ok with one menu and a total of one
#[tokio::test]
async fn store_listing_excludes_deleted_menus() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, store, public) = factory::helpers::create_menu_with_dependencies(db).await?;
    factory::menu::MenuFactory::new(db, store.id)
        .deleted()
        .build()
        .await?;

    let (menus, total) = MenuRepository::new(db)
        .get_visible_by_store(store.id, &PageRequest::default())
        .await?;

    assert_eq!(total, 1);
    assert_eq!(menus, vec![public]);
    assert_eq!(entity::prelude::Menu::find().all(db).await?.len(), 2);

    Ok(())
}
