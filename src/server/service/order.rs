//! Order fulfillment workflow.
//!
//! Orders are written together with their line items and their payment inside one
//! transaction. Every validation that can fail before a write does so before the transaction
//! opens; anything that fails after the first insert returns early and the dropped transaction
//! rolls back, so a failed create never leaves a partial order behind.

use std::collections::HashMap;

use chrono::Utc;
use entity::sea_orm_active_enums::OrderStatus;
use sea_orm::{ActiveValue, ConnectionTrait, DatabaseConnection, IntoActiveModel, TransactionTrait};

use crate::server::{
    data::{
        lifecycle::{self, Audited},
        menu::MenuRepository,
        menu_order::MenuOrderRepository,
        order::OrderRepository,
        payment::PaymentRepository,
        user::UserRepository,
    },
    error::{lifecycle::LifecycleError, order::OrderError, AppError},
    model::{
        menu::Menu,
        order::{
            is_terminal, next_status, CreateOrderParams, LineItem, Order, OrderFilter, Payment,
            UpdateOrderParams,
        },
        pagination::{Page, PageRequest},
    },
    policy::{Operation, Principal},
};

pub struct OrderService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OrderService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Places an order with its line items and payment.
    ///
    /// Each line item must reference a live, publicly visible menu and captures that menu's
    /// current price. The total is computed from those prices; a caller-supplied total is
    /// only compared against it.
    ///
    /// # Arguments
    /// - `caller` - Authenticated principal; must be the order's owner, a MANAGER or a MASTER
    /// - `params` - Owner, address, order type, line items and card number
    ///
    /// # Returns
    /// - `Ok(Order)` - Created order with its line items and payment
    /// - `Err(AppError::AuthErr(_))` - Caller missing or not allowed
    /// - `Err(AppError::OrderErr(_))` - Empty order, bad quantity, unavailable menu or total
    ///   mismatch; nothing is persisted
    /// - `Err(AppError::LifecycleErr(_))` - Owner is not a live user
    pub async fn create(
        &self,
        caller: Option<&Principal>,
        params: CreateOrderParams,
    ) -> Result<Order, AppError> {
        let principal = Operation::CreateOrder.require(caller, Some(params.user_id))?;
        params.validate()?;

        let now = Utc::now();
        let actor = principal.username.as_str();

        let txn = self.db.begin().await?;

        if UserRepository::new(&txn)
            .find_live_by_id(params.user_id)
            .await?
            .is_none()
        {
            return Err(LifecycleError::NotFound {
                resource: "User",
                id: params.user_id,
            }
            .into());
        }

        let order_repo = OrderRepository::new(&txn);
        let menu_repo = MenuRepository::new(&txn);
        let line_repo = MenuOrderRepository::new(&txn);

        let order = order_repo
            .create(params.user_id, params.address, params.order_type, now, actor)
            .await?;

        let mut line_items = Vec::with_capacity(params.line_items.len());
        for item in &params.line_items {
            let menu = menu_repo
                .find_visible_by_id(item.menu_id)
                .await?
                .ok_or(OrderError::MenuNotFound(item.menu_id))?;

            let line = line_repo
                .create(order.id, &menu, item.quantity, now, actor)
                .await?;

            line_items.push(LineItem::from_entity(line, Some(Menu::from_entity(menu))));
        }

        let total = compute_total(
            line_items
                .iter()
                .map(|item| (item.unit_price, item.quantity)),
        )?;

        if let Some(supplied) = params.expected_total {
            if supplied != total {
                return Err(OrderError::TotalPriceMismatch {
                    supplied,
                    computed: total,
                }
                .into());
            }
        }

        let mut active = order.into_active_model();
        active.total_price = ActiveValue::Set(total);
        let order = order_repo.update(active).await?;

        let payment = PaymentRepository::new(&txn)
            .create(order.id, params.card_number, now, actor)
            .await?;

        txn.commit().await?;

        tracing::info!(
            order_id = order.id,
            user_id = order.user_id,
            total,
            line_items = line_items.len(),
            "order placed"
        );

        Ok(Order::from_entity(
            order,
            line_items,
            Some(Payment::from_entity(payment)),
        ))
    }

    /// Amends a live order.
    ///
    /// Scalar fields change only where supplied. Line-item changes must reference live items
    /// of this order. The status follows the order transition table, and the total is
    /// recomputed from the captured unit prices.
    ///
    /// # Returns
    /// - `Ok(Order)` - Updated order
    /// - `Err(AppError::AuthErr(_))` - Caller is not a MANAGER or MASTER
    /// - `Err(AppError::LifecycleErr(_))` - Order missing or tombstoned
    /// - `Err(AppError::OrderErr(_))` - Unknown line item, bad quantity or illegal transition
    pub async fn update(
        &self,
        caller: Option<&Principal>,
        order_id: i32,
        params: UpdateOrderParams,
    ) -> Result<Order, AppError> {
        let principal = Operation::UpdateOrder.require(caller, None)?;
        params.validate()?;

        let now = Utc::now();
        let actor = principal.username.as_str();

        let txn = self.db.begin().await?;

        let order_repo = OrderRepository::new(&txn);
        let line_repo = MenuOrderRepository::new(&txn);

        let order = order_repo
            .find_live_by_id(order_id)
            .await?
            .ok_or(LifecycleError::NotFound {
                resource: "Order",
                id: order_id,
            })?;

        let status = next_status(order.order_status, params.status, params.changes_fields())?;

        let mut lines = line_repo.find_live_by_order(order.id).await?;
        for change in &params.line_items {
            let index = lines
                .iter()
                .position(|line| line.id == change.line_item_id)
                .ok_or(OrderError::LineItemNotFound(change.line_item_id))?;

            let active = lifecycle::mutate(
                lines[index].clone(),
                now,
                actor,
                |active: &mut entity::menu_order::ActiveModel| {
                    active.amount = ActiveValue::Set(change.quantity);
                },
            )?;
            lines[index] = line_repo.update(active).await?;
        }

        let total = compute_total(lines.iter().map(|line| (line.unit_price, line.amount)))?;

        let UpdateOrderParams {
            address,
            order_type,
            ..
        } = params;

        let active = lifecycle::mutate(
            order,
            now,
            actor,
            |active: &mut entity::order::ActiveModel| {
                if let Some(address) = address {
                    active.address = ActiveValue::Set(address);
                }
                if let Some(order_type) = order_type {
                    active.order_type = ActiveValue::Set(order_type);
                }
                active.order_status = ActiveValue::Set(status);
                active.total_price = ActiveValue::Set(total);
            },
        )?;
        let order = order_repo.update(active).await?;

        let mut resolved = resolve_orders(&txn, vec![order]).await?;

        txn.commit().await?;

        resolved.pop().ok_or_else(|| {
            AppError::InternalError(format!("Order {} vanished during update", order_id))
        })
    }

    /// Soft-deletes an order together with its line items and payment.
    ///
    /// All three tombstones share one timestamp and actor. An order that had not reached a
    /// terminal state is cancelled as part of the delete.
    ///
    /// # Returns
    /// - `Ok(())` - Order and its children tombstoned
    /// - `Err(AppError::AuthErr(_))` - Caller is not a MANAGER or MASTER
    /// - `Err(AppError::LifecycleErr(_))` - Order missing (404) or already deleted (400)
    pub async fn delete(&self, caller: Option<&Principal>, order_id: i32) -> Result<(), AppError> {
        let principal = Operation::DeleteOrder.require(caller, None)?;

        let now = Utc::now();
        let actor = principal.username.as_str();

        let txn = self.db.begin().await?;

        let order_repo = OrderRepository::new(&txn);
        let order = order_repo
            .find_by_id(order_id)
            .await?
            .ok_or(LifecycleError::NotFound {
                resource: "Order",
                id: order_id,
            })?;

        let cancel = !is_terminal(order.order_status);

        let mut active: entity::order::ActiveModel = lifecycle::delete(order, now, actor)?;
        if cancel {
            active.order_status = ActiveValue::Set(OrderStatus::Cancelled);
            active.stamp_updated(now, actor);
        }
        order_repo.update(active).await?;

        let line_items = MenuOrderRepository::new(&txn)
            .tombstone_by_order(order_id, now, actor)
            .await?;
        let payments = PaymentRepository::new(&txn)
            .tombstone_by_order(order_id, now, actor)
            .await?;

        txn.commit().await?;

        tracing::info!(order_id, line_items, payments, cancelled = cancel, "order deleted");

        Ok(())
    }

    /// Gets a live order with its line items, their menus and its payment.
    ///
    /// Line items whose menu no longer resolves are returned without a menu and reported in
    /// the order's warnings.
    pub async fn get(&self, caller: Option<&Principal>, order_id: i32) -> Result<Order, AppError> {
        Operation::GetOrder.require(caller, None)?;

        let order = OrderRepository::new(self.db)
            .find_live_by_id(order_id)
            .await?
            .ok_or(LifecycleError::NotFound {
                resource: "Order",
                id: order_id,
            })?;

        let mut resolved = resolve_orders(self.db, vec![order]).await?;

        resolved.pop().ok_or_else(|| {
            AppError::InternalError(format!("Order {} could not be resolved", order_id))
        })
    }

    /// Lists live orders filtered by owner and status.
    ///
    /// Line items, menus and payments for the whole page are loaded in bulk.
    pub async fn list(
        &self,
        caller: Option<&Principal>,
        filter: OrderFilter,
        request: PageRequest,
    ) -> Result<Page<Order>, AppError> {
        Operation::ListOrders.require(caller, None)?;

        let (orders, total) = OrderRepository::new(self.db)
            .find_by_owner_and_status(filter, &request)
            .await?;

        let orders = resolve_orders(self.db, orders).await?;

        Ok(Page::new(orders, total, &request))
    }
}

/// Sums `unit_price * quantity` over line items, rejecting overflow.
fn compute_total(mut lines: impl Iterator<Item = (i64, i64)>) -> Result<i64, AppError> {
    lines
        .try_fold(0i64, |total, (unit_price, quantity)| {
            unit_price
                .checked_mul(quantity)
                .and_then(|line| total.checked_add(line))
        })
        .ok_or_else(|| AppError::BadRequest("Order total is out of range".to_string()))
}

/// Loads line items, menus and payments for a batch of orders.
async fn resolve_orders<C: ConnectionTrait>(
    db: &C,
    orders: Vec<entity::order::Model>,
) -> Result<Vec<Order>, AppError> {
    let order_ids: Vec<i32> = orders.iter().map(|order| order.id).collect();

    let lines = MenuOrderRepository::new(db)
        .find_live_by_orders(&order_ids)
        .await?;
    let payments = PaymentRepository::new(db)
        .find_live_by_orders(&order_ids)
        .await?;

    let mut menu_ids: Vec<i32> = lines.iter().map(|line| line.menu_id).collect();
    menu_ids.sort_unstable();
    menu_ids.dedup();

    let menus: HashMap<i32, entity::menu::Model> = MenuRepository::new(db)
        .find_live_by_ids(&menu_ids)
        .await?
        .into_iter()
        .map(|menu| (menu.id, menu))
        .collect();

    let mut lines_by_order: HashMap<i32, Vec<LineItem>> = HashMap::new();
    for line in lines {
        let menu = menus.get(&line.menu_id).cloned().map(Menu::from_entity);
        if menu.is_none() {
            tracing::warn!(
                order_id = line.order_id,
                line_item_id = line.id,
                menu_id = line.menu_id,
                "line item references a menu that is no longer available"
            );
        }

        lines_by_order
            .entry(line.order_id)
            .or_default()
            .push(LineItem::from_entity(line, menu));
    }

    let mut payments_by_order: HashMap<i32, Payment> = payments
        .into_iter()
        .map(|payment| (payment.order_id, Payment::from_entity(payment)))
        .collect();

    Ok(orders
        .into_iter()
        .map(|order| {
            let line_items = lines_by_order.remove(&order.id).unwrap_or_default();
            let payment = payments_by_order.remove(&order.id);
            Order::from_entity(order, line_items, payment)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_line_items() {
        let total = compute_total([(10_000, 2), (3_000, 1)].into_iter()).unwrap();
        assert_eq!(total, 23_000);
    }

    #[test]
    fn rejects_overflowing_total() {
        assert!(compute_total([(i64::MAX, 2)].into_iter()).is_err());
    }
}
