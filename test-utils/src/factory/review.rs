//! Review factory for creating test review entities.

use crate::factory::helpers::FACTORY_ACTOR;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test reviews written by a user about a store.
pub struct ReviewFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    store_id: i32,
    contents: String,
    score: f64,
    deleted: bool,
}

impl<'a> ReviewFactory<'a> {
    /// Creates a new ReviewFactory with a score of `4.0`.
    pub fn new(db: &'a DatabaseConnection, user_id: i32, store_id: i32) -> Self {
        Self {
            db,
            user_id,
            store_id,
            contents: "Tasty".to_string(),
            score: 4.0,
            deleted: false,
        }
    }

    /// Sets the score.
    pub fn score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    /// Sets the review text.
    pub fn contents(mut self, contents: impl Into<String>) -> Self {
        self.contents = contents.into();
        self
    }

    /// Inserts the review already tombstoned.
    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    /// Builds and inserts the review entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::review::Model)` - Created review entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::review::Model, DbErr> {
        let now = Utc::now();
        entity::review::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            store_id: ActiveValue::Set(self.store_id),
            order_id: ActiveValue::Set(None),
            contents: ActiveValue::Set(self.contents),
            score: ActiveValue::Set(self.score),
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

/// Creates a live review with default values.
pub async fn create_review(
    db: &DatabaseConnection,
    user_id: i32,
    store_id: i32,
) -> Result<entity::review::Model, DbErr> {
    ReviewFactory::new(db, user_id, store_id).build().await
}
