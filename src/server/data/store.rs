use sea_orm::{
    prelude::DateTimeUtc, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use crate::server::{
    data::lifecycle::{self, LiveScope},
    model::{
        pagination::{PageRequest, SortField},
        store::CreateStoreParams,
    },
};

pub struct StoreRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StoreRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts the store row; category links are written separately.
    pub async fn create(
        &self,
        params: &CreateStoreParams,
        at: DateTimeUtc,
        actor: &str,
    ) -> Result<entity::store::Model, DbErr> {
        let active = entity::store::ActiveModel {
            user_id: ActiveValue::Set(params.owner_id),
            name: ActiveValue::Set(params.name.clone()),
            address: ActiveValue::Set(params.address.clone()),
            tel: ActiveValue::Set(params.tel.clone()),
            open_status: ActiveValue::Set(params.open_status),
            start_time: ActiveValue::Set(params.start_time),
            end_time: ActiveValue::Set(params.end_time),
            ..Default::default()
        };

        lifecycle::create(active, at, actor).insert(self.db).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::store::Model>, DbErr> {
        entity::prelude::Store::find_by_id(id).one(self.db).await
    }

    pub async fn find_live_by_id(&self, id: i32) -> Result<Option<entity::store::Model>, DbErr> {
        entity::prelude::Store::find_live_by_id(id).one(self.db).await
    }

    /// Gets live stores, optionally filtered by a name substring.
    pub async fn get_paginated(
        &self,
        name_contains: Option<&str>,
        request: &PageRequest,
    ) -> Result<(Vec<entity::store::Model>, u64), DbErr> {
        let mut query = entity::prelude::Store::find_live();
        if let Some(fragment) = name_contains.filter(|f| !f.is_empty()) {
            query = query.filter(entity::store::Column::Name.contains(fragment));
        }

        let paginator = sorted(query, request).paginate(self.db, request.per_page);

        let total = paginator.num_items().await?;
        let stores = paginator.fetch_page(request.page).await?;

        Ok((stores, total))
    }

    pub async fn update(
        &self,
        active: entity::store::ActiveModel,
    ) -> Result<entity::store::Model, DbErr> {
        active.update(self.db).await
    }
}

fn sorted(query: Select<entity::prelude::Store>, request: &PageRequest) -> Select<entity::prelude::Store> {
    let column = match request.sort {
        SortField::CreatedAt => entity::store::Column::CreatedAt,
        SortField::UpdatedAt => entity::store::Column::UpdatedAt,
    };

    query
        .order_by(column, request.direction.order())
        .order_by_asc(entity::store::Column::Id)
}
