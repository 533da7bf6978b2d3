use sea_orm::{
    prelude::DateTimeUtc, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{
    data::lifecycle::{self, LiveScope},
    model::{
        pagination::{PageRequest, SortField},
        review::CreateReviewParams,
    },
};

pub struct ReviewRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReviewRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        params: CreateReviewParams,
        at: DateTimeUtc,
        actor: &str,
    ) -> Result<entity::review::Model, DbErr> {
        let active = entity::review::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            store_id: ActiveValue::Set(params.store_id),
            order_id: ActiveValue::Set(params.order_id),
            contents: ActiveValue::Set(params.contents),
            score: ActiveValue::Set(params.score),
            ..Default::default()
        };

        lifecycle::create(active, at, actor).insert(self.db).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::review::Model>, DbErr> {
        entity::prelude::Review::find_by_id(id).one(self.db).await
    }

    pub async fn find_live_by_id(&self, id: i32) -> Result<Option<entity::review::Model>, DbErr> {
        entity::prelude::Review::find_live_by_id(id).one(self.db).await
    }

    /// Gets live reviews of a store.
    pub async fn get_by_store(
        &self,
        store_id: i32,
        request: &PageRequest,
    ) -> Result<(Vec<entity::review::Model>, u64), DbErr> {
        let column = match request.sort {
            SortField::CreatedAt => entity::review::Column::CreatedAt,
            SortField::UpdatedAt => entity::review::Column::UpdatedAt,
        };

        let paginator = entity::prelude::Review::find_live()
            .filter(entity::review::Column::StoreId.eq(store_id))
            .order_by(column, request.direction.order())
            .order_by_asc(entity::review::Column::Id)
            .paginate(self.db, request.per_page);

        let total = paginator.num_items().await?;
        let reviews = paginator.fetch_page(request.page).await?;

        Ok((reviews, total))
    }

    /// Average score over the live reviews of a store, `None` without reviews.
    pub async fn average_score(&self, store_id: i32) -> Result<Option<f64>, DbErr> {
        let scores: Vec<f64> = entity::prelude::Review::find_live()
            .select_only()
            .column(entity::review::Column::Score)
            .filter(entity::review::Column::StoreId.eq(store_id))
            .into_tuple()
            .all(self.db)
            .await?;

        if scores.is_empty() {
            return Ok(None);
        }

        Ok(Some(scores.iter().sum::<f64>() / scores.len() as f64))
    }

    pub async fn update(
        &self,
        active: entity::review::ActiveModel,
    ) -> Result<entity::review::Model, DbErr> {
        active.update(self.db).await
    }
}
