use sea_orm::{
    prelude::DateTimeUtc, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use crate::server::{
    data::lifecycle::{self, LiveScope},
    model::{menu::CreateMenuParams, pagination::PageRequest},
};

pub struct MenuRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MenuRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: CreateMenuParams,
        at: DateTimeUtc,
        actor: &str,
    ) -> Result<entity::menu::Model, DbErr> {
        let active = entity::menu::ActiveModel {
            store_id: ActiveValue::Set(params.store_id),
            name: ActiveValue::Set(params.name),
            price: ActiveValue::Set(params.price),
            description: ActiveValue::Set(params.description),
            public_status: ActiveValue::Set(params.public_status),
            menu_image: ActiveValue::Set(params.menu_image),
            ..Default::default()
        };

        lifecycle::create(active, at, actor).insert(self.db).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::menu::Model>, DbErr> {
        entity::prelude::Menu::find_by_id(id).one(self.db).await
    }

    /// Finds a live menu regardless of its visibility flag.
    pub async fn find_live_by_id(&self, id: i32) -> Result<Option<entity::menu::Model>, DbErr> {
        entity::prelude::Menu::find_live_by_id(id).one(self.db).await
    }

    /// Finds a menu that is live and publicly visible, i.e. orderable.
    pub async fn find_visible_by_id(
        &self,
        id: i32,
    ) -> Result<Option<entity::menu::Model>, DbErr> {
        visible(entity::prelude::Menu::find_live_by_id(id))
            .one(self.db)
            .await
    }

    /// Gets live menus by id, visible or not, for resolving existing order lines.
    pub async fn find_live_by_ids(&self, ids: &[i32]) -> Result<Vec<entity::menu::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Menu::find_live()
            .filter(entity::menu::Column::Id.is_in(ids.to_vec()))
            .all(self.db)
            .await
    }

    /// Gets the live, publicly visible menus of a store ordered by name.
    pub async fn get_visible_by_store(
        &self,
        store_id: i32,
        request: &PageRequest,
    ) -> Result<(Vec<entity::menu::Model>, u64), DbErr> {
        let paginator = visible(entity::prelude::Menu::find_live())
            .filter(entity::menu::Column::StoreId.eq(store_id))
            .order_by_asc(entity::menu::Column::Name)
            .order_by_asc(entity::menu::Column::Id)
            .paginate(self.db, request.per_page);

        let total = paginator.num_items().await?;
        let menus = paginator.fetch_page(request.page).await?;

        Ok((menus, total))
    }

    pub async fn update(
        &self,
        active: entity::menu::ActiveModel,
    ) -> Result<entity::menu::Model, DbErr> {
        active.update(self.db).await
    }
}

fn visible(query: Select<entity::prelude::Menu>) -> Select<entity::prelude::Menu> {
    query.filter(entity::menu::Column::PublicStatus.eq(true))
}
