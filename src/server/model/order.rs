//! Order aggregate: the order row, its line items and its payment.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::OrderStatus;

use crate::{
    model::order::{
        CreateOrderDto, OrderDto, OrderLineItemDto, OrderStatusDto, PaymentDto, UpdateOrderDto,
    },
    server::{error::order::OrderError, model::menu::Menu},
};

impl From<OrderStatus> for OrderStatusDto {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Created => Self::Created,
            OrderStatus::Amended => Self::Amended,
            OrderStatus::Cancelled => Self::Cancelled,
            OrderStatus::Completed => Self::Completed,
        }
    }
}

impl From<OrderStatusDto> for OrderStatus {
    fn from(status: OrderStatusDto) -> Self {
        match status {
            OrderStatusDto::Created => Self::Created,
            OrderStatusDto::Amended => Self::Amended,
            OrderStatusDto::Cancelled => Self::Cancelled,
            OrderStatusDto::Completed => Self::Completed,
        }
    }
}

/// Returns true once an order can no longer change.
pub fn is_terminal(status: OrderStatus) -> bool {
    matches!(status, OrderStatus::Cancelled | OrderStatus::Completed)
}

/// Transition table for order status.
///
/// ```text
/// CREATED -> AMENDED | CANCELLED | COMPLETED
/// AMENDED -> AMENDED | CANCELLED | COMPLETED
/// ```
///
/// Terminal states accept nothing and nothing transitions back to CREATED.
pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    match from {
        OrderStatus::Created | OrderStatus::Amended => matches!(
            to,
            OrderStatus::Amended | OrderStatus::Cancelled | OrderStatus::Completed
        ),
        OrderStatus::Cancelled | OrderStatus::Completed => false,
    }
}

/// Works out the status an order ends up in after an update.
///
/// An explicit `requested` status must be a legal transition. Without one, any accepted
/// change moves a CREATED order to AMENDED; an update that changes nothing keeps the current
/// status. Terminal orders reject every update.
pub fn next_status(
    current: OrderStatus,
    requested: Option<OrderStatus>,
    changed: bool,
) -> Result<OrderStatus, OrderError> {
    if is_terminal(current) {
        return Err(OrderError::TerminalState(current));
    }

    match requested {
        Some(to) if can_transition(current, to) => Ok(to),
        Some(to) => Err(OrderError::InvalidTransition { from: current, to }),
        None if changed => Ok(OrderStatus::Amended),
        None => Ok(current),
    }
}

/// Masks all but the last four characters of a card number.
pub fn mask_card_number(card_number: &str) -> String {
    let chars: Vec<char> = card_number.chars().collect();
    let visible = chars.len().saturating_sub(4);

    chars
        .iter()
        .enumerate()
        .map(|(i, c)| if i < visible && c.is_ascii_digit() { '*' } else { *c })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub id: i32,
    pub menu_id: i32,
    pub quantity: i64,
    pub unit_price: i64,
    /// Live menu the line item points at, if it still exists.
    pub menu: Option<Menu>,
}

impl LineItem {
    pub fn from_entity(entity: entity::menu_order::Model, menu: Option<Menu>) -> Self {
        Self {
            id: entity.id,
            menu_id: entity.menu_id,
            quantity: entity.amount,
            unit_price: entity.unit_price,
            menu,
        }
    }

    pub fn into_dto(self) -> OrderLineItemDto {
        OrderLineItemDto {
            id: self.id,
            menu_id: self.menu_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
            menu: self.menu.map(Menu::into_dto),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub id: i32,
    pub card_number: String,
    pub settled: bool,
}

impl Payment {
    pub fn from_entity(entity: entity::payment::Model) -> Self {
        Self {
            id: entity.id,
            card_number: entity.card_number,
            settled: entity.payment_status,
        }
    }

    pub fn into_dto(self) -> PaymentDto {
        PaymentDto {
            id: self.id,
            card_number: mask_card_number(&self.card_number),
            settled: self.settled,
        }
    }
}

/// Order together with its resolved line items and payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub status: OrderStatus,
    pub order_type: String,
    pub address: String,
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub line_items: Vec<LineItem>,
    pub payment: Option<Payment>,
    /// Line items whose menu could not be resolved.
    pub warnings: Vec<String>,
}

impl Order {
    pub fn from_entity(
        entity: entity::order::Model,
        line_items: Vec<LineItem>,
        payment: Option<Payment>,
    ) -> Self {
        let warnings = line_items
            .iter()
            .filter(|item| item.menu.is_none())
            .map(|item| {
                format!(
                    "Menu {} for line item {} is no longer available",
                    item.menu_id, item.id
                )
            })
            .collect();

        Self {
            id: entity.id,
            user_id: entity.user_id,
            status: entity.order_status,
            order_type: entity.order_type,
            address: entity.address,
            total_price: entity.total_price,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            line_items,
            payment,
            warnings,
        }
    }

    pub fn into_dto(self) -> OrderDto {
        OrderDto {
            id: self.id,
            user_id: self.user_id,
            status: self.status.into(),
            order_type: self.order_type,
            address: self.address,
            total_price: self.total_price,
            created_at: self.created_at,
            updated_at: self.updated_at,
            line_items: self.line_items.into_iter().map(LineItem::into_dto).collect(),
            payment: self.payment.map(Payment::into_dto),
            warnings: self.warnings,
        }
    }
}

/// One (menu, quantity) selection on a new order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewLineItem {
    pub menu_id: i32,
    pub quantity: i64,
}

#[derive(Debug, Clone)]
pub struct CreateOrderParams {
    pub user_id: i32,
    pub address: String,
    pub order_type: String,
    pub line_items: Vec<NewLineItem>,
    pub card_number: String,
    /// Caller's expected total, checked against the computed one.
    pub expected_total: Option<i64>,
}

impl CreateOrderParams {
    /// Builds params, defaulting the order's owner to the caller.
    pub fn from_dto(caller_id: i32, dto: CreateOrderDto) -> Self {
        Self {
            user_id: dto.user_id.unwrap_or(caller_id),
            address: dto.address,
            order_type: dto.order_type,
            line_items: dto
                .line_items
                .into_iter()
                .map(|item| NewLineItem {
                    menu_id: item.menu_id,
                    quantity: item.quantity,
                })
                .collect(),
            card_number: dto.card_number,
            expected_total: dto.total_price,
        }
    }

    /// Checks input that can be rejected before touching the database.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.line_items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        validate_quantities(self.line_items.iter().map(|item| item.quantity))
    }
}

/// New quantity for an existing line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItemChange {
    pub line_item_id: i32,
    pub quantity: i64,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateOrderParams {
    pub address: Option<String>,
    pub order_type: Option<String>,
    pub status: Option<OrderStatus>,
    pub line_items: Vec<LineItemChange>,
}

impl UpdateOrderParams {
    pub fn from_dto(dto: UpdateOrderDto) -> Self {
        Self {
            address: dto.address,
            order_type: dto.order_type,
            status: dto.status.map(Into::into),
            line_items: dto
                .line_items
                .into_iter()
                .map(|change| LineItemChange {
                    line_item_id: change.line_item_id,
                    quantity: change.quantity,
                })
                .collect(),
        }
    }

    pub fn validate(&self) -> Result<(), OrderError> {
        validate_quantities(self.line_items.iter().map(|change| change.quantity))
    }

    /// True when the update touches anything other than the status.
    pub fn changes_fields(&self) -> bool {
        self.address.is_some() || self.order_type.is_some() || !self.line_items.is_empty()
    }
}

fn validate_quantities(mut quantities: impl Iterator<Item = i64>) -> Result<(), OrderError> {
    match quantities.find(|quantity| *quantity <= 0) {
        Some(quantity) => Err(OrderError::InvalidQuantity(quantity)),
        None => Ok(()),
    }
}

/// Filter for listing orders.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderFilter {
    pub user_id: Option<i32>,
    pub status: Option<OrderStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_orders_move_to_amended_on_change() {
        assert_eq!(
            next_status(OrderStatus::Created, None, true),
            Ok(OrderStatus::Amended)
        );
        assert_eq!(
            next_status(OrderStatus::Amended, None, true),
            Ok(OrderStatus::Amended)
        );
        assert_eq!(
            next_status(OrderStatus::Created, None, false),
            Ok(OrderStatus::Created)
        );
    }

    #[test]
    fn explicit_status_follows_transition_table() {
        assert_eq!(
            next_status(OrderStatus::Created, Some(OrderStatus::Completed), false),
            Ok(OrderStatus::Completed)
        );
        assert_eq!(
            next_status(OrderStatus::Amended, Some(OrderStatus::Created), false),
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Amended,
                to: OrderStatus::Created
            })
        );
    }

    #[test]
    fn terminal_orders_reject_every_change() {
        for status in [OrderStatus::Cancelled, OrderStatus::Completed] {
            assert_eq!(
                next_status(status, Some(OrderStatus::Amended), true),
                Err(OrderError::TerminalState(status))
            );
            assert_eq!(
                next_status(status, None, false),
                Err(OrderError::TerminalState(status))
            );
        }
    }

    #[test]
    fn rejects_non_positive_quantities() {
        let params = CreateOrderParams {
            user_id: 1,
            address: "1 Road".to_string(),
            order_type: "DELIVERY".to_string(),
            line_items: vec![
                NewLineItem {
                    menu_id: 1,
                    quantity: 2,
                },
                NewLineItem {
                    menu_id: 2,
                    quantity: 0,
                },
            ],
            card_number: "4111".to_string(),
            expected_total: None,
        };

        assert_eq!(params.validate(), Err(OrderError::InvalidQuantity(0)));
    }

    #[test]
    fn rejects_empty_order() {
        let params = CreateOrderParams {
            user_id: 1,
            address: "1 Road".to_string(),
            order_type: "DELIVERY".to_string(),
            line_items: vec![],
            card_number: "4111".to_string(),
            expected_total: None,
        };

        assert_eq!(params.validate(), Err(OrderError::EmptyOrder));
    }

    #[test]
    fn masks_all_but_last_four_digits() {
        assert_eq!(mask_card_number("4111-1111-1111-1234"), "****-****-****-1234");
        assert_eq!(mask_card_number("123"), "123");
    }
}
