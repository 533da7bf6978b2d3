//! Shared helper utilities for factory methods.
//!
//! Provides unique id generation and convenience methods for creating entities together
//! with the rows they depend on.

use entity::sea_orm_active_enums::Role;
use sea_orm::{DatabaseConnection, DbErr};

/// Actor name recorded in the audit columns of factory-created rows.
pub const FACTORY_ACTOR: &str = "factory";

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a store owner, a store and one public menu.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((owner, store, menu))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_menu_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::store::Model,
        entity::menu::Model,
    ),
    DbErr,
> {
    let owner = crate::factory::user::create_user_with_role(db, Role::Owner).await?;
    let store = crate::factory::store::create_store(db, owner.id).await?;
    let menu = crate::factory::menu::create_menu(db, store.id).await?;

    Ok((owner, store, menu))
}

/// Creates a customer and a one-line order against a fresh store and menu.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((customer, menu, order))` - Tuple of the created customer, menu and order
/// - `Err(DbErr)` - Database error during creation
pub async fn create_order_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::menu::Model,
        entity::order::Model,
    ),
    DbErr,
> {
    let (_, _, menu) = create_menu_with_dependencies(db).await?;
    let customer = crate::factory::user::create_user(db).await?;
    let order = crate::factory::order::OrderFactory::new(db, customer.id)
        .line_item(&menu, 1)
        .build()
        .await?;

    Ok((customer, menu, order))
}
