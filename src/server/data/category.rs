use sea_orm::{
    prelude::DateTimeUtc, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::lifecycle::{self, LiveScope},
    model::pagination::PageRequest,
};

pub struct CategoryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CategoryRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        name: String,
        at: DateTimeUtc,
        actor: &str,
    ) -> Result<entity::category::Model, DbErr> {
        let active = entity::category::ActiveModel {
            name: ActiveValue::Set(name),
            ..Default::default()
        };

        lifecycle::create(active, at, actor).insert(self.db).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::category::Model>, DbErr> {
        entity::prelude::Category::find_by_id(id).one(self.db).await
    }

    pub async fn find_live_by_id(
        &self,
        id: i32,
    ) -> Result<Option<entity::category::Model>, DbErr> {
        entity::prelude::Category::find_live_by_id(id)
            .one(self.db)
            .await
    }

    /// Checks whether a category other than `excluding` already uses `name`.
    pub async fn name_taken(&self, name: &str, excluding: Option<i32>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::Category::find().filter(entity::category::Column::Name.eq(name));
        if let Some(id) = excluding {
            query = query.filter(entity::category::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Counts how many of `ids` are live categories.
    pub async fn count_live_in(&self, ids: &[i32]) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        entity::prelude::Category::find_live()
            .filter(entity::category::Column::Id.is_in(ids.to_vec()))
            .count(self.db)
            .await
    }

    /// Gets live categories ordered by name.
    pub async fn get_paginated(
        &self,
        request: &PageRequest,
    ) -> Result<(Vec<entity::category::Model>, u64), DbErr> {
        let paginator = entity::prelude::Category::find_live()
            .order_by_asc(entity::category::Column::Name)
            .paginate(self.db, request.per_page);

        let total = paginator.num_items().await?;
        let categories = paginator.fetch_page(request.page).await?;

        Ok((categories, total))
    }

    pub async fn update(
        &self,
        active: entity::category::ActiveModel,
    ) -> Result<entity::category::Model, DbErr> {
        active.update(self.db).await
    }
}
