use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        order::{CreateOrderDto, OrderDto, OrderStatusDto, UpdateOrderDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            order::{CreateOrderParams, OrderFilter, UpdateOrderParams},
            pagination::PaginationParams,
        },
        service::order::OrderService,
        state::AppState,
    },
};

/// Tag for grouping order endpoints in OpenAPI documentation
pub static ORDER_TAG: &str = "order";

#[derive(Deserialize)]
pub struct OrderFilterParams {
    #[serde(default)]
    pub user_id: Option<i32>,
    #[serde(default)]
    pub status: Option<OrderStatusDto>,
}

/// Place an order with its line items and payment.
///
/// Menu prices are captured at placement and the total is computed server-side. A supplied
/// `total_price` is only cross-checked against it. The whole order rolls back if any line
/// item cannot be resolved.
///
/// # Access Control
/// - The ordering user
/// - `MANAGER`, `MASTER` - May place orders on behalf of another user
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Order data, line items and card number
///
/// # Returns
/// - `201 Created` - Created order
/// - `400 Bad Request` - Empty order, bad quantity, unknown menu or total mismatch
/// - `401 Unauthorized` - Not logged in
/// - `403 Forbidden` - Ordering on behalf of someone else without a staff role
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = ORDER_TAG,
    request_body = CreateOrderDto,
    responses(
        (status = 201, description = "Successfully created order", body = OrderDto),
        (status = 400, description = "Invalid order data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_order(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateOrderDto>,
) -> Result<impl IntoResponse, AppError> {
    let principal = AuthGuard::new(&state.db, &session).require().await?;

    let order = OrderService::new(&state.db)
        .create(
            Some(&principal),
            CreateOrderParams::from_dto(principal.id, payload),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(order.into_dto())))
}

/// Get paginated orders, optionally filtered by user and status.
///
/// # Access Control
/// - `MANAGER`, `MASTER`
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = ORDER_TAG,
    params(
        ("user_id" = Option<i32>, Query, description = "Only orders of this user"),
        ("status" = Option<OrderStatusDto>, Query, description = "Only orders in this status"),
        ("page" = Option<u64>, Query, description = "Zero-based page"),
        ("entries" = Option<u64>, Query, description = "Page size"),
        ("sort" = Option<String>, Query, description = "created_at or updated_at"),
        ("direction" = Option<String>, Query, description = "asc or desc")
    ),
    responses(
        (status = 200, description = "Page of orders", body = PaginatedDto<OrderDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient role", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_orders(
    State(state): State<AppState>,
    session: Session,
    Query(filter): Query<OrderFilterParams>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    let filter = OrderFilter {
        user_id: filter.user_id,
        status: filter.status.map(Into::into),
    };

    let orders = OrderService::new(&state.db)
        .list(caller.as_ref(), filter, params.into_request())
        .await?;

    Ok((StatusCode::OK, Json(orders.into_dto(|order| order.into_dto()))))
}

/// Get an order with its line items and payment.
///
/// # Access Control
/// - Any logged in user
#[utoipa::path(
    get,
    path = "/api/orders/{order_id}",
    tag = ORDER_TAG,
    params(
        ("order_id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order", body = OrderDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_order(
    State(state): State<AppState>,
    session: Session,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    let order = OrderService::new(&state.db)
        .get(caller.as_ref(), order_id)
        .await?;

    Ok((StatusCode::OK, Json(order.into_dto())))
}

/// Update an order's fields, line item quantities or status.
///
/// The total is recomputed from the captured unit prices. Terminal orders reject every change.
///
/// # Access Control
/// - `MANAGER`, `MASTER`
///
/// # Returns
/// - `200 OK` - Updated order
/// - `400 Bad Request` - Bad quantity, invalid transition or terminal order
/// - `404 Not Found` - Order or line item missing
#[utoipa::path(
    patch,
    path = "/api/orders/{order_id}",
    tag = ORDER_TAG,
    params(
        ("order_id" = i32, Path, description = "Order ID")
    ),
    request_body = UpdateOrderDto,
    responses(
        (status = 200, description = "Successfully updated order", body = OrderDto),
        (status = 400, description = "Invalid order update", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient role", body = ErrorDto),
        (status = 404, description = "Order or line item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_order(
    State(state): State<AppState>,
    session: Session,
    Path(order_id): Path<i32>,
    Json(payload): Json<UpdateOrderDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    let order = OrderService::new(&state.db)
        .update(caller.as_ref(), order_id, UpdateOrderParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(order.into_dto())))
}

/// Tombstone an order together with its line items and payment.
///
/// # Access Control
/// - `MANAGER`, `MASTER`
#[utoipa::path(
    delete,
    path = "/api/orders/{order_id}",
    tag = ORDER_TAG,
    params(
        ("order_id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted order"),
        (status = 400, description = "Order already deleted", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient role", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_order(
    State(state): State<AppState>,
    session: Session,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    OrderService::new(&state.db)
        .delete(caller.as_ref(), order_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
