use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::menu::MenuDto;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatusDto {
    Created,
    Amended,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LineItemDto {
    pub menu_id: i32,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderDto {
    /// Customer the order is placed for. Defaults to the caller.
    #[serde(default)]
    pub user_id: Option<i32>,
    pub address: String,
    pub order_type: String,
    pub line_items: Vec<LineItemDto>,
    pub card_number: String,
    /// Optional cross-check against the server-computed total.
    #[serde(default)]
    pub total_price: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LineItemChangeDto {
    pub line_item_id: i32,
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderDto {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub order_type: Option<String>,
    #[serde(default)]
    pub status: Option<OrderStatusDto>,
    #[serde(default)]
    pub line_items: Vec<LineItemChangeDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLineItemDto {
    pub id: i32,
    pub menu_id: i32,
    pub quantity: i64,
    pub unit_price: i64,
    /// Resolved menu, absent when the menu has since been removed.
    pub menu: Option<MenuDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentDto {
    pub id: i32,
    /// Card number with everything but the last four digits masked.
    pub card_number: String,
    pub settled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDto {
    pub id: i32,
    pub user_id: i32,
    pub status: OrderStatusDto,
    pub order_type: String,
    pub address: String,
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub line_items: Vec<OrderLineItemDto>,
    pub payment: Option<PaymentDto>,
    /// Non-fatal problems found while resolving line items.
    pub warnings: Vec<String>,
}
