//! Menu factory for creating test menu entities.

use crate::factory::helpers::{next_id, FACTORY_ACTOR};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test menus belonging to a store.
pub struct MenuFactory<'a> {
    db: &'a DatabaseConnection,
    store_id: i32,
    name: String,
    price: i64,
    public_status: bool,
    deleted: bool,
}

impl<'a> MenuFactory<'a> {
    /// Creates a new MenuFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Menu {id}"`
    /// - price: `10000`
    /// - publicly visible, live
    pub fn new(db: &'a DatabaseConnection, store_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            store_id,
            name: format!("Menu {}", id),
            price: 10_000,
            public_status: true,
            deleted: false,
        }
    }

    /// Sets the menu name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the unit price.
    pub fn price(mut self, price: i64) -> Self {
        self.price = price;
        self
    }

    /// Sets the visibility flag without tombstoning.
    pub fn public_status(mut self, public_status: bool) -> Self {
        self.public_status = public_status;
        self
    }

    /// Inserts the menu already tombstoned and hidden.
    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self.public_status = false;
        self
    }

    /// Builds and inserts the menu entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::menu::Model)` - Created menu entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::menu::Model, DbErr> {
        let now = Utc::now();
        entity::menu::ActiveModel {
            store_id: ActiveValue::Set(self.store_id),
            name: ActiveValue::Set(self.name),
            price: ActiveValue::Set(self.price),
            description: ActiveValue::Set(None),
            public_status: ActiveValue::Set(self.public_status),
            menu_image: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            created_by: ActiveValue::Set(FACTORY_ACTOR.to_string()),
            updated_at: ActiveValue::Set(now),
            updated_by: ActiveValue::Set(FACTORY_ACTOR.to_string()),
            deleted_at: ActiveValue::Set(self.deleted.then_some(now)),
            deleted_by: ActiveValue::Set(self.deleted.then(|| FACTORY_ACTOR.to_string())),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a live, public menu for the given store.
pub async fn create_menu(
    db: &DatabaseConnection,
    store_id: i32,
) -> Result<entity::menu::Model, DbErr> {
    MenuFactory::new(db, store_id).build().await
}
