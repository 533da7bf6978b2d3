use super::*;
use crate::server::{
    error::{auth::AuthError, lifecycle::LifecycleError, order::OrderError},
    model::{
        order::{CreateOrderParams, LineItemChange, NewLineItem, OrderFilter, UpdateOrderParams},
        pagination::PageRequest,
    },
    service::order::OrderService,
};
use entity::sea_orm_active_enums::OrderStatus;

fn order_params(user_id: i32, items: &[(i32, i64)]) -> CreateOrderParams {
    CreateOrderParams {
        user_id,
        address: "12 Main St".to_string(),
        order_type: "DELIVERY".to_string(),
        line_items: items
            .iter()
            .map(|(menu_id, quantity)| NewLineItem {
                menu_id: *menu_id,
                quantity: *quantity,
            })
            .collect(),
        card_number: "4111-1111-1111-1234".to_string(),
        expected_total: None,
    }
}

/// Tests placing an order with two line items.
///
/// Verifies that one order, one line item per selection with its quantity, and exactly one
/// payment referencing the order are written, and that the total is computed server-side.
///
/// Expected: Ok with the order, 2 line items and 1 payment
#[tokio::test]
async fn creates_order_with_line_items_and_payment() -> Result<(), AppError> {
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
    let customer = factory::create_user(db).await?;
    let caller = principal(&customer);

    let order = OrderService::new(db)
        .create(
            Some(&caller),
            order_params(customer.id, &[(menu_a.id, 2), (menu_b.id, 1)]),
        )
        .await?;

    assert_eq!(order.user_id, customer.id);
    assert_eq!(order.status, OrderStatus::Created);
    assert_eq!(order.total_price, menu_a.price * 2 + 3_000);

    let quantities: Vec<(i32, i64)> = order
        .line_items
        .iter()
        .map(|item| (item.menu_id, item.quantity))
        .collect();
    assert_eq!(quantities, vec![(menu_a.id, 2), (menu_b.id, 1)]);

    let payment = order.payment.as_ref().unwrap();
    assert!(payment.settled);
    let stored = entity::prelude::Payment::find_by_id(payment.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.order_id, order.id);

    assert_eq!(order_row_counts(db).await?, (1, 2, 1));

    Ok(())
}

/// Tests that a deleted menu aborts the whole order.
///
/// The first line item is written before the second one's menu fails to resolve, so this
/// exercises the rollback of rows already inserted in the transaction.
///
/// Expected: Err(MenuNotFound) and no order, line item or payment rows
#[tokio::test]
async fn rolls_back_when_a_menu_is_deleted() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, store, menu) = factory::helpers::create_menu_with_dependencies(db).await?;
    let deleted = factory::menu::MenuFactory::new(db, store.id)
        .deleted()
        .build()
        .await?;
    let customer = factory::create_user(db).await?;

    let result = OrderService::new(db)
        .create(
            Some(&principal(&customer)),
            order_params(customer.id, &[(menu.id, 1), (deleted.id, 1)]),
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::OrderErr(OrderError::MenuNotFound(id))) if id == deleted.id
    ));
    assert_eq!(order_row_counts(db).await?, (0, 0, 0));

    Ok(())
}

/// Tests that a hidden menu cannot be ordered.
///
/// Expected: Err(MenuNotFound)
#[tokio::test]
async fn rejects_hidden_menu() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, store, _) = factory::helpers::create_menu_with_dependencies(db).await?;
    let hidden = factory::menu::MenuFactory::new(db, store.id)
        .public_status(false)
        .build()
        .await?;
    let customer = factory::create_user(db).await?;

    let result = OrderService::new(db)
        .create(
            Some(&principal(&customer)),
            order_params(customer.id, &[(hidden.id, 1)]),
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::OrderErr(OrderError::MenuNotFound(_)))
    ));

    Ok(())
}

/// Tests that a failure after every line item is written still rolls back.
///
/// A wrong caller-supplied total is only detected once all line items exist.
///
/// Expected: Err(TotalPriceMismatch) and no rows persisted
#[tokio::test]
async fn rolls_back_on_total_mismatch() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, menu) = factory::helpers::create_menu_with_dependencies(db).await?;
    let customer = factory::create_user(db).await?;

    let mut params = order_params(customer.id, &[(menu.id, 3)]);
    params.expected_total = Some(1);

    let result = OrderService::new(db)
        .create(Some(&principal(&customer)), params)
        .await;

    assert!(matches!(
        result,
        Err(AppError::OrderErr(OrderError::TotalPriceMismatch { supplied: 1, computed }))
            if computed == menu.price * 3
    ));
    assert_eq!(order_row_counts(db).await?, (0, 0, 0));

    Ok(())
}

/// Tests input validation ahead of the transaction.
///
/// Expected: Err(InvalidQuantity) and Err(EmptyOrder) with nothing written
#[tokio::test]
async fn rejects_invalid_quantities_and_empty_orders() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, menu) = factory::helpers::create_menu_with_dependencies(db).await?;
    let customer = factory::create_user(db).await?;
    let caller = principal(&customer);
    let service = OrderService::new(db);

    let zero = service
        .create(Some(&caller), order_params(customer.id, &[(menu.id, 0)]))
        .await;
    assert!(matches!(
        zero,
        Err(AppError::OrderErr(OrderError::InvalidQuantity(0)))
    ));

    let empty = service
        .create(Some(&caller), order_params(customer.id, &[]))
        .await;
    assert!(matches!(empty, Err(AppError::OrderErr(OrderError::EmptyOrder))));

    assert_eq!(order_row_counts(db).await?, (0, 0, 0));

    Ok(())
}

/// Tests that a customer cannot place an order on another customer's behalf.
///
/// Expected: Err(Forbidden) for the customer, Ok for a manager
#[tokio::test]
async fn only_owner_or_staff_may_place_an_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, menu) = factory::helpers::create_menu_with_dependencies(db).await?;
    let customer = factory::create_user(db).await?;
    let stranger = principal_with_role(db, Role::Customer).await?;
    let manager = principal_with_role(db, Role::Manager).await?;
    let service = OrderService::new(db);

    let denied = service
        .create(Some(&stranger), order_params(customer.id, &[(menu.id, 1)]))
        .await;
    assert!(matches!(denied, Err(AppError::AuthErr(AuthError::Forbidden(_)))));

    let anonymous = service
        .create(None, order_params(customer.id, &[(menu.id, 1)]))
        .await;
    assert!(matches!(
        anonymous,
        Err(AppError::AuthErr(AuthError::Unauthenticated))
    ));

    let placed = service
        .create(Some(&manager), order_params(customer.id, &[(menu.id, 1)]))
        .await?;
    assert_eq!(placed.user_id, customer.id);

    Ok(())
}

/// Tests that a manager may amend an order and a customer may not.
///
/// Expected: Ok with the new address and AMENDED status for the manager; Err(Forbidden) for
/// another customer
#[tokio::test]
async fn manager_updates_address_and_customer_is_denied() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, order) = factory::helpers::create_order_with_dependencies(db).await?;
    let manager = principal_with_role(db, Role::Manager).await?;
    let other_customer = principal_with_role(db, Role::Customer).await?;
    let service = OrderService::new(db);

    let change = || UpdateOrderParams {
        address: Some("99 New Rd".to_string()),
        ..Default::default()
    };

    let updated = service.update(Some(&manager), order.id, change()).await?;
    assert_eq!(updated.address, "99 New Rd");
    assert_eq!(updated.status, OrderStatus::Amended);

    let denied = service
        .update(Some(&other_customer), order.id, change())
        .await;
    assert!(matches!(denied, Err(AppError::AuthErr(AuthError::Forbidden(_)))));

    Ok(())
}

/// Tests changing a line item's quantity.
///
/// Expected: Ok with the new quantity and a recomputed total
#[tokio::test]
async fn updates_quantity_and_recomputes_total() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, menu, order) = factory::helpers::create_order_with_dependencies(db).await?;
    let manager = principal_with_role(db, Role::Manager).await?;
    let service = OrderService::new(db);

    let line = service.get(Some(&manager), order.id).await?.line_items[0].clone();

    let updated = service
        .update(
            Some(&manager),
            order.id,
            UpdateOrderParams {
                line_items: vec![LineItemChange {
                    line_item_id: line.id,
                    quantity: 4,
                }],
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.line_items[0].quantity, 4);
    assert_eq!(updated.total_price, menu.price * 4);

    Ok(())
}

/// Tests that a line item of another order is never updated silently.
///
/// Expected: Err(LineItemNotFound) and the foreign line item untouched
#[tokio::test]
async fn rejects_line_item_of_another_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (customer, menu, order) = factory::helpers::create_order_with_dependencies(db).await?;
    let other = factory::order::OrderFactory::new(db, customer.id)
        .line_item(&menu, 1)
        .build()
        .await?;
    let manager = principal_with_role(db, Role::Manager).await?;
    let service = OrderService::new(db);

    let foreign = service.get(Some(&manager), other.id).await?.line_items[0].clone();

    let result = service
        .update(
            Some(&manager),
            order.id,
            UpdateOrderParams {
                line_items: vec![LineItemChange {
                    line_item_id: foreign.id,
                    quantity: 9,
                }],
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::OrderErr(OrderError::LineItemNotFound(id))) if id == foreign.id
    ));
    let other = service.get(Some(&manager), other.id).await?;
    assert_eq!(other.line_items[0].quantity, 1);

    Ok(())
}

/// Tests that terminal orders are immutable.
///
/// Expected: Err(TerminalState)
#[tokio::test]
async fn rejects_updates_to_completed_orders() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, menu, _) = factory::helpers::create_order_with_dependencies(db).await?;
    let customer = factory::create_user(db).await?;
    let completed = factory::order::OrderFactory::new(db, customer.id)
        .line_item(&menu, 1)
        .status(OrderStatus::Completed)
        .build()
        .await?;
    let manager = principal_with_role(db, Role::Manager).await?;

    let result = OrderService::new(db)
        .update(
            Some(&manager),
            completed.id,
            UpdateOrderParams {
                address: Some("elsewhere".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::OrderErr(OrderError::TerminalState(OrderStatus::Completed)))
    ));

    Ok(())
}

/// Tests that deleting an order cascades and cannot be repeated.
///
/// Verifies that the order, its line items and its payment share one tombstone, the order is
/// cancelled, and a second delete fails without re-stamping.
///
/// Expected: Ok on first delete, Err(AlreadyDeleted) on the second
#[tokio::test]
async fn delete_cascades_and_is_not_repeatable() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, order) = factory::helpers::create_order_with_dependencies(db).await?;
    let manager = principal_with_role(db, Role::Manager).await?;
    let service = OrderService::new(db);

    service.delete(Some(&manager), order.id).await?;

    let stored = entity::prelude::Order::find_by_id(order.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.order_status, OrderStatus::Cancelled);
    assert_eq!(stored.deleted_by.as_deref(), Some(manager.username.as_str()));

    let lines = entity::prelude::MenuOrder::find().all(db).await?;
    let payments = entity::prelude::Payment::find().all(db).await?;
    assert!(lines.iter().all(|line| line.deleted_at == stored.deleted_at));
    assert!(payments
        .iter()
        .all(|payment| payment.deleted_at == stored.deleted_at));

    let again = service.delete(Some(&manager), order.id).await;
    assert!(matches!(
        again,
        Err(AppError::LifecycleErr(LifecycleError::AlreadyDeleted { .. }))
    ));

    let restamped = entity::prelude::Order::find_by_id(order.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(restamped.deleted_at, stored.deleted_at);

    let hidden = service.get(Some(&manager), order.id).await;
    assert!(matches!(
        hidden,
        Err(AppError::LifecycleErr(LifecycleError::NotFound { .. }))
    ));

    Ok(())
}

/// Tests that only managers and masters may delete orders.
///
/// Expected: Err(Forbidden) for the owning customer
#[tokio::test]
async fn customer_cannot_delete_own_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (customer, _, order) = factory::helpers::create_order_with_dependencies(db).await?;

    let result = OrderService::new(db)
        .delete(Some(&principal(&customer)), order.id)
        .await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::Forbidden(_)))));

    Ok(())
}

/// Tests reading an order whose menu has since been deleted.
///
/// Expected: Ok with the line item lacking a menu and one warning
#[tokio::test]
async fn get_reports_missing_menu_as_warning() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, store, live_menu) = factory::helpers::create_menu_with_dependencies(db).await?;
    let doomed = factory::menu::MenuFactory::new(db, store.id).build().await?;
    let customer = factory::create_user(db).await?;
    let order = factory::order::OrderFactory::new(db, customer.id)
        .line_item(&live_menu, 1)
        .line_item(&doomed, 1)
        .build()
        .await?;

    let mut tombstoned: entity::menu::ActiveModel = doomed.into();
    tombstoned.deleted_at = sea_orm::ActiveValue::Set(Some(chrono::Utc::now()));
    tombstoned.deleted_by = sea_orm::ActiveValue::Set(Some("master".to_string()));
    tombstoned.public_status = sea_orm::ActiveValue::Set(false);
    sea_orm::ActiveModelTrait::update(tombstoned, db).await?;

    let fetched = OrderService::new(db)
        .get(Some(&principal(&customer)), order.id)
        .await?;

    assert_eq!(fetched.line_items.len(), 2);
    assert!(fetched.line_items[0].menu.is_some());
    assert!(fetched.line_items[1].menu.is_none());
    assert_eq!(fetched.warnings.len(), 1);

    Ok(())
}

/// Tests listing orders by owner with the role gate.
///
/// Expected: Ok with the customer's live orders for a manager, Err(Forbidden) for a customer
#[tokio::test]
async fn lists_orders_for_staff_only() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (customer, menu, _) = factory::helpers::create_order_with_dependencies(db).await?;
    factory::order::OrderFactory::new(db, customer.id)
        .line_item(&menu, 2)
        .build()
        .await?;
    factory::order::OrderFactory::new(db, customer.id)
        .line_item(&menu, 2)
        .deleted()
        .build()
        .await?;
    let manager = principal_with_role(db, Role::Manager).await?;
    let service = OrderService::new(db);

    let filter = OrderFilter {
        user_id: Some(customer.id),
        status: None,
    };

    let page = service
        .list(Some(&manager), filter, PageRequest::default())
        .await?;
    assert_eq!(page.total, 2);
    assert!(page
        .items
        .iter()
        .all(|order| order.line_items.len() == 1 && order.payment.is_some()));

    let denied = service
        .list(Some(&principal(&customer)), filter, PageRequest::default())
        .await;
    assert!(matches!(denied, Err(AppError::AuthErr(AuthError::Forbidden(_)))));

    Ok(())
}
