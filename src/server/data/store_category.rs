use std::collections::HashMap;

use sea_orm::{
    prelude::DateTimeUtc, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::data::lifecycle::{self, LiveScope};

/// Links between stores and categories.
pub struct StoreCategoryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StoreCategoryRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn link(
        &self,
        store_id: i32,
        category_id: i32,
        at: DateTimeUtc,
        actor: &str,
    ) -> Result<entity::store_category::Model, DbErr> {
        let active = entity::store_category::ActiveModel {
            store_id: ActiveValue::Set(store_id),
            category_id: ActiveValue::Set(category_id),
            ..Default::default()
        };

        lifecycle::create(active, at, actor).insert(self.db).await
    }

    /// Gets the live category ids linked to a store.
    pub async fn live_category_ids(&self, store_id: i32) -> Result<Vec<i32>, DbErr> {
        let links = entity::prelude::StoreCategory::find_live()
            .filter(entity::store_category::Column::StoreId.eq(store_id))
            .order_by_asc(entity::store_category::Column::CategoryId)
            .all(self.db)
            .await?;

        Ok(links.into_iter().map(|link| link.category_id).collect())
    }

    /// Gets live category ids for several stores in one query.
    pub async fn live_category_ids_for(
        &self,
        store_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<i32>>, DbErr> {
        if store_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let links = entity::prelude::StoreCategory::find_live()
            .filter(entity::store_category::Column::StoreId.is_in(store_ids.to_vec()))
            .order_by_asc(entity::store_category::Column::CategoryId)
            .all(self.db)
            .await?;

        let mut by_store: HashMap<i32, Vec<i32>> = HashMap::new();
        for link in links {
            by_store
                .entry(link.store_id)
                .or_default()
                .push(link.category_id);
        }

        Ok(by_store)
    }

    /// Tombstones the live links from `store_id` to any of `category_ids`.
    pub async fn unlink(
        &self,
        store_id: i32,
        category_ids: &[i32],
        at: DateTimeUtc,
        actor: &str,
    ) -> Result<u64, DbErr> {
        if category_ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::StoreCategory::tombstone_many(at, actor)
            .filter(entity::store_category::Column::StoreId.eq(store_id))
            .filter(entity::store_category::Column::CategoryId.is_in(category_ids.to_vec()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Tombstones every live link of a store.
    pub async fn unlink_all(&self, store_id: i32, at: DateTimeUtc, actor: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::StoreCategory::tombstone_many(at, actor)
            .filter(entity::store_category::Column::StoreId.eq(store_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
