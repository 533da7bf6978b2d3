use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use entity::sea_orm_active_enums::OrderStatus;
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Order workflow failures.
///
/// Every variant is raised before the transaction commits, so none of them leaves partial
/// order rows behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// A line item references a menu that is missing, tombstoned or hidden.
    #[error("Menu {0} is not available")]
    MenuNotFound(i32),

    /// A line item change references a line item that is not a live item of the order.
    #[error("Line item {0} not found on this order")]
    LineItemNotFound(i32),

    #[error("Order must contain at least one line item")]
    EmptyOrder,

    #[error("Quantity must be greater than zero, got {0}")]
    InvalidQuantity(i64),

    /// Caller-supplied total disagrees with the server-computed total.
    #[error("Total price {supplied} does not match computed total {computed}")]
    TotalPriceMismatch { supplied: i64, computed: i64 },

    #[error("Cannot move order from {from:?} to {to:?}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Terminal orders are immutable apart from soft-delete bookkeeping.
    #[error("Order is {0:?} and can no longer be changed")]
    TerminalState(OrderStatus),
}

/// Converts order errors into HTTP responses.
///
/// # Returns
/// - 404 Not Found - For `LineItemNotFound`
/// - 400 Bad Request - For every other variant
impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::LineItemNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
