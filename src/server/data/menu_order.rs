use sea_orm::{
    prelude::DateTimeUtc, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::data::lifecycle::{self, LiveScope};

/// Order line items.
pub struct MenuOrderRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MenuOrderRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a line item capturing the menu's price at selection time.
    pub async fn create(
        &self,
        order_id: i32,
        menu: &entity::menu::Model,
        amount: i64,
        at: DateTimeUtc,
        actor: &str,
    ) -> Result<entity::menu_order::Model, DbErr> {
        let active = entity::menu_order::ActiveModel {
            order_id: ActiveValue::Set(order_id),
            menu_id: ActiveValue::Set(menu.id),
            amount: ActiveValue::Set(amount),
            unit_price: ActiveValue::Set(menu.price),
            ..Default::default()
        };

        lifecycle::create(active, at, actor).insert(self.db).await
    }

    /// Gets the live line items of one order in insertion order.
    pub async fn find_live_by_order(
        &self,
        order_id: i32,
    ) -> Result<Vec<entity::menu_order::Model>, DbErr> {
        entity::prelude::MenuOrder::find_live()
            .filter(entity::menu_order::Column::OrderId.eq(order_id))
            .order_by_asc(entity::menu_order::Column::Id)
            .all(self.db)
            .await
    }

    /// Gets the live line items of several orders in one query.
    pub async fn find_live_by_orders(
        &self,
        order_ids: &[i32],
    ) -> Result<Vec<entity::menu_order::Model>, DbErr> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::MenuOrder::find_live()
            .filter(entity::menu_order::Column::OrderId.is_in(order_ids.to_vec()))
            .order_by_asc(entity::menu_order::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        active: entity::menu_order::ActiveModel,
    ) -> Result<entity::menu_order::Model, DbErr> {
        active.update(self.db).await
    }

    /// Tombstones every live line item of an order.
    pub async fn tombstone_by_order(
        &self,
        order_id: i32,
        at: DateTimeUtc,
        actor: &str,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::MenuOrder::tombstone_many(at, actor)
            .filter(entity::menu_order::Column::OrderId.eq(order_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
