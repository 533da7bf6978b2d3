//! Order factory for creating orders together with their line items and payment.

use crate::factory::helpers::FACTORY_ACTOR;
use chrono::Utc;
use entity::sea_orm_active_enums::OrderStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test orders.
///
/// Inserts the order, one line item per `line_item()` call and a settled payment, mirroring
/// what a successful checkout leaves behind. The total is derived from the line items.
///
/// # Example
///
/// ```rust,ignore
/// let order = OrderFactory::new(&db, customer.id)
///     .line_item(&menu_a, 2)
///     .line_item(&menu_b, 1)
///     .build()
///     .await?;
/// ```
pub struct OrderFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    status: OrderStatus,
    address: String,
    order_type: String,
    line_items: Vec<(i32, i64, i64)>,
    deleted: bool,
}

impl<'a> OrderFactory<'a> {
    /// Creates a new OrderFactory for the given customer with no line items.
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            status: OrderStatus::Created,
            address: "1 Delivery Road".to_string(),
            order_type: "DELIVERY".to_string(),
            line_items: Vec::new(),
            deleted: false,
        }
    }

    /// Sets the order status.
    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the delivery address.
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Adds a line item for `menu` with the given quantity at the menu's current price.
    pub fn line_item(mut self, menu: &entity::menu::Model, amount: i64) -> Self {
        self.line_items.push((menu.id, amount, menu.price));
        self
    }

    /// Inserts the order, its line items and its payment already tombstoned.
    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    /// Builds and inserts the order, its line items and its payment.
    ///
    /// # Returns
    /// - `Ok(entity::order::Model)` - Created order entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::order::Model, DbErr> {
        let now = Utc::now();
        let deleted_at = self.deleted.then_some(now);
        let deleted_by = self.deleted.then(|| FACTORY_ACTOR.to_string());
        let total: i64 = self
            .line_items
            .iter()
            .map(|(_, amount, price)| amount * price)
            .sum();

        let order = entity::order::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            order_status: ActiveValue::Set(self.status),
            order_type: ActiveValue::Set(self.order_type),
            address: ActiveValue::Set(self.address),
            total_price: ActiveValue::Set(total),
            created_at: ActiveValue::Set(now),
            created_by: ActiveValue::Set(FACTORY_ACTOR.to_string()),
            updated_at: ActiveValue::Set(now),
            updated_by: ActiveValue::Set(FACTORY_ACTOR.to_string()),
            deleted_at: ActiveValue::Set(deleted_at),
            deleted_by: ActiveValue::Set(deleted_by.clone()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for (menu_id, amount, unit_price) in self.line_items {
            entity::menu_order::ActiveModel {
                order_id: ActiveValue::Set(order.id),
                menu_id: ActiveValue::Set(menu_id),
                amount: ActiveValue::Set(amount),
                unit_price: ActiveValue::Set(unit_price),
                created_at: ActiveValue::Set(now),
                created_by: ActiveValue::Set(FACTORY_ACTOR.to_string()),
                updated_at: ActiveValue::Set(now),
                updated_by: ActiveValue::Set(FACTORY_ACTOR.to_string()),
                deleted_at: ActiveValue::Set(deleted_at),
                deleted_by: ActiveValue::Set(deleted_by.clone()),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        entity::payment::ActiveModel {
            order_id: ActiveValue::Set(order.id),
            card_number: ActiveValue::Set("4111-1111-1111-1111".to_string()),
            payment_status: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            created_by: ActiveValue::Set(FACTORY_ACTOR.to_string()),
            updated_at: ActiveValue::Set(now),
            updated_by: ActiveValue::Set(FACTORY_ACTOR.to_string()),
            deleted_at: ActiveValue::Set(deleted_at),
            deleted_by: ActiveValue::Set(deleted_by),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder::TestBuilder, factory};
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

    #[tokio::test]
    async fn creates_order_with_line_items_and_payment() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_delivery_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let (_, store, menu_a) = factory::helpers::create_menu_with_dependencies(db).await?;
        let menu_b = factory::menu::MenuFactory::new(db, store.id)
            .price(3_000)
            .build()
            .await?;
        let customer = factory::user::create_user(db).await?;

        let order = OrderFactory::new(db, customer.id)
            .line_item(&menu_a, 2)
            .line_item(&menu_b, 1)
            .build()
            .await?;

        assert_eq!(order.total_price, menu_a.price * 2 + 3_000);

        let line_items = entity::prelude::MenuOrder::find()
            .filter(entity::menu_order::Column::OrderId.eq(order.id))
            .count(db)
            .await?;
        assert_eq!(line_items, 2);

        let payments = entity::prelude::Payment::find()
            .filter(entity::payment::Column::OrderId.eq(order.id))
            .count(db)
            .await?;
        assert_eq!(payments, 1);

        Ok(())
    }
}
