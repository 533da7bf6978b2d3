use sea_orm::{
    prelude::DateTimeUtc, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter,
};

use crate::server::data::lifecycle::{self, LiveScope};

pub struct PaymentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PaymentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts the settled payment of an order.
    pub async fn create(
        &self,
        order_id: i32,
        card_number: String,
        at: DateTimeUtc,
        actor: &str,
    ) -> Result<entity::payment::Model, DbErr> {
        let active = entity::payment::ActiveModel {
            order_id: ActiveValue::Set(order_id),
            card_number: ActiveValue::Set(card_number),
            payment_status: ActiveValue::Set(true),
            ..Default::default()
        };

        lifecycle::create(active, at, actor).insert(self.db).await
    }

    pub async fn find_live_by_order(
        &self,
        order_id: i32,
    ) -> Result<Option<entity::payment::Model>, DbErr> {
        entity::prelude::Payment::find_live()
            .filter(entity::payment::Column::OrderId.eq(order_id))
            .one(self.db)
            .await
    }

    pub async fn find_live_by_orders(
        &self,
        order_ids: &[i32],
    ) -> Result<Vec<entity::payment::Model>, DbErr> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Payment::find_live()
            .filter(entity::payment::Column::OrderId.is_in(order_ids.to_vec()))
            .all(self.db)
            .await
    }

    /// Tombstones the live payment of an order.
    pub async fn tombstone_by_order(
        &self,
        order_id: i32,
        at: DateTimeUtc,
        actor: &str,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::Payment::tombstone_many(at, actor)
            .filter(entity::payment::Column::OrderId.eq(order_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
