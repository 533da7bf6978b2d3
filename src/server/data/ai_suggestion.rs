use sea_orm::{
    prelude::DateTimeUtc, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::lifecycle::{self, LiveScope},
    model::{
        ai_suggestion::AiSuggestionFilter,
        pagination::{PageRequest, SortField},
    },
};

pub struct AiSuggestionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AiSuggestionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        store_id: i32,
        request_text: String,
        response_text: String,
        at: DateTimeUtc,
        actor: &str,
    ) -> Result<entity::ai_suggestion::Model, DbErr> {
        let active = entity::ai_suggestion::ActiveModel {
            store_id: ActiveValue::Set(store_id),
            request_text: ActiveValue::Set(request_text),
            response_text: ActiveValue::Set(response_text),
            ..Default::default()
        };

        lifecycle::create(active, at, actor).insert(self.db).await
    }

    pub async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<entity::ai_suggestion::Model>, DbErr> {
        entity::prelude::AiSuggestion::find_by_id(id)
            .one(self.db)
            .await
    }

    pub async fn find_live_by_id(
        &self,
        id: i32,
    ) -> Result<Option<entity::ai_suggestion::Model>, DbErr> {
        entity::prelude::AiSuggestion::find_live_by_id(id)
            .one(self.db)
            .await
    }

    /// Gets live suggestions, optionally by store and request-text keyword.
    pub async fn search(
        &self,
        filter: &AiSuggestionFilter,
        request: &PageRequest,
    ) -> Result<(Vec<entity::ai_suggestion::Model>, u64), DbErr> {
        let mut query = entity::prelude::AiSuggestion::find_live();
        if let Some(store_id) = filter.store_id {
            query = query.filter(entity::ai_suggestion::Column::StoreId.eq(store_id));
        }
        if let Some(keyword) = filter.keyword.as_deref().filter(|k| !k.is_empty()) {
            query = query.filter(entity::ai_suggestion::Column::RequestText.contains(keyword));
        }

        let column = match request.sort {
            SortField::CreatedAt => entity::ai_suggestion::Column::CreatedAt,
            SortField::UpdatedAt => entity::ai_suggestion::Column::UpdatedAt,
        };

        let paginator = query
            .order_by(column, request.direction.order())
            .order_by_asc(entity::ai_suggestion::Column::Id)
            .paginate(self.db, request.per_page);

        let total = paginator.num_items().await?;
        let suggestions = paginator.fetch_page(request.page).await?;

        Ok((suggestions, total))
    }

    pub async fn update(
        &self,
        active: entity::ai_suggestion::ActiveModel,
    ) -> Result<entity::ai_suggestion::Model, DbErr> {
        active.update(self.db).await
    }
}
