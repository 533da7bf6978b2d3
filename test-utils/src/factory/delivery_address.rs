//! Delivery address factory for creating test address entities.

use crate::factory::helpers::{next_id, FACTORY_ACTOR};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating delivery addresses belonging to a user.
pub struct DeliveryAddressFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    address: String,
    deleted: bool,
}

impl<'a> DeliveryAddressFactory<'a> {
    /// Creates a new factory with a unique default address (`"{id} Main Street"`).
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            user_id,
            address: format!("{} Main Street", id),
            deleted: false,
        }
    }

    /// Sets the address line.
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Inserts the address already tombstoned.
    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    /// Builds and inserts the delivery address into the database.
    ///
    /// # Returns
    /// - `Ok(entity::delivery_address::Model)` - Created address entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::delivery_address::Model, DbErr> {
        let now = Utc::now();
        entity::delivery_address::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            address: ActiveValue::Set(self.address),
            request: ActiveValue::Set(None),
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

/// Creates a live delivery address with default values.
pub async fn create_delivery_address(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::delivery_address::Model, DbErr> {
    DeliveryAddressFactory::new(db, user_id).build().await
}
