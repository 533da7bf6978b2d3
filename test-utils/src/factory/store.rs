//! Store factory for creating test store entities.

use crate::factory::helpers::{next_id, FACTORY_ACTOR};
use chrono::{NaiveTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test stores owned by a given user.
///
/// # Example
///
/// ```rust,ignore
/// let store = StoreFactory::new(&db, owner.id)
///     .name("Noodle House")
///     .category(category.id)
///     .build()
///     .await?;
/// ```
pub struct StoreFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    name: String,
    categories: Vec<i32>,
    deleted: bool,
}

impl<'a> StoreFactory<'a> {
    /// Creates a new StoreFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Store {id}"`
    /// - open, 09:00 to 21:00
    /// - no category links
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            user_id,
            name: format!("Store {}", id),
            categories: Vec::new(),
            deleted: false,
        }
    }

    /// Sets the store name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Links the store to a category.
    pub fn category(mut self, category_id: i32) -> Self {
        self.categories.push(category_id);
        self
    }

    /// Inserts the store already tombstoned.
    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    /// Builds and inserts the store and its category links.
    ///
    /// # Returns
    /// - `Ok(entity::store::Model)` - Created store entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::store::Model, DbErr> {
        let now = Utc::now();
        let store = entity::store::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            name: ActiveValue::Set(self.name),
            address: ActiveValue::Set("1 Market Street".to_string()),
            tel: ActiveValue::Set("010-0000-0000".to_string()),
            open_status: ActiveValue::Set(true),
            start_time: ActiveValue::Set(NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default()),
            end_time: ActiveValue::Set(NaiveTime::from_hms_opt(21, 0, 0).unwrap_or_default()),
            created_at: ActiveValue::Set(now),
            created_by: ActiveValue::Set(FACTORY_ACTOR.to_string()),
            updated_at: ActiveValue::Set(now),
            updated_by: ActiveValue::Set(FACTORY_ACTOR.to_string()),
            deleted_at: ActiveValue::Set(self.deleted.then_some(now)),
            deleted_by: ActiveValue::Set(self.deleted.then(|| FACTORY_ACTOR.to_string())),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for category_id in self.categories {
            entity::store_category::ActiveModel {
                store_id: ActiveValue::Set(store.id),
                category_id: ActiveValue::Set(category_id),
                created_at: ActiveValue::Set(now),
                created_by: ActiveValue::Set(FACTORY_ACTOR.to_string()),
                updated_at: ActiveValue::Set(now),
                updated_by: ActiveValue::Set(FACTORY_ACTOR.to_string()),
                deleted_at: ActiveValue::Set(None),
                deleted_by: ActiveValue::Set(None),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(store)
    }
}

/// Creates a live store for the given owner with default values.
pub async fn create_store(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::store::Model, DbErr> {
    StoreFactory::new(db, user_id).build().await
}
