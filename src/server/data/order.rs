use entity::sea_orm_active_enums::OrderStatus;
use sea_orm::{
    prelude::DateTimeUtc, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::lifecycle::{self, LiveScope},
    model::{
        order::OrderFilter,
        pagination::{PageRequest, SortField},
    },
};

pub struct OrderRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OrderRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a CREATED order with a zero total.
    ///
    /// The total is filled in once the line items are written.
    pub async fn create(
        &self,
        user_id: i32,
        address: String,
        order_type: String,
        at: DateTimeUtc,
        actor: &str,
    ) -> Result<entity::order::Model, DbErr> {
        let active = entity::order::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            order_status: ActiveValue::Set(OrderStatus::Created),
            order_type: ActiveValue::Set(order_type),
            address: ActiveValue::Set(address),
            total_price: ActiveValue::Set(0),
            ..Default::default()
        };

        lifecycle::create(active, at, actor).insert(self.db).await
    }

    /// Finds an order by id, including tombstoned orders.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::order::Model>, DbErr> {
        entity::prelude::Order::find_by_id(id).one(self.db).await
    }

    pub async fn find_live_by_id(&self, id: i32) -> Result<Option<entity::order::Model>, DbErr> {
        entity::prelude::Order::find_live_by_id(id).one(self.db).await
    }

    /// Gets live orders matching the owner and status filters.
    ///
    /// # Returns
    /// - `Ok((orders, total))` - One page of orders plus the total matching count
    pub async fn find_by_owner_and_status(
        &self,
        filter: OrderFilter,
        request: &PageRequest,
    ) -> Result<(Vec<entity::order::Model>, u64), DbErr> {
        let mut query = entity::prelude::Order::find_live();
        if let Some(user_id) = filter.user_id {
            query = query.filter(entity::order::Column::UserId.eq(user_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::order::Column::OrderStatus.eq(status));
        }

        let column = match request.sort {
            SortField::CreatedAt => entity::order::Column::CreatedAt,
            SortField::UpdatedAt => entity::order::Column::UpdatedAt,
        };

        let paginator = query
            .order_by(column, request.direction.order())
            .order_by_asc(entity::order::Column::Id)
            .paginate(self.db, request.per_page);

        let total = paginator.num_items().await?;
        let orders = paginator.fetch_page(request.page).await?;

        Ok((orders, total))
    }

    pub async fn update(
        &self,
        active: entity::order::ActiveModel,
    ) -> Result<entity::order::Model, DbErr> {
        active.update(self.db).await
    }
}
