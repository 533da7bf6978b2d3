use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        delivery_address::{
            CreateDeliveryAddressDto, DeliveryAddressDto, UpdateDeliveryAddressDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::delivery_address::{CreateDeliveryAddressParams, UpdateDeliveryAddressParams},
        service::delivery_address::DeliveryAddressService,
        state::AppState,
    },
};

/// Tag for grouping delivery address endpoints in OpenAPI documentation
pub static DELIVERY_ADDRESS_TAG: &str = "delivery_address";

/// Save a delivery address for the caller.
///
/// # Access Control
/// - `CUSTOMER` - Addresses always belong to the caller
///
/// # Returns
/// - `201 Created` - Saved address
/// - `400 Bad Request` - Empty address, duplicate, or three addresses already saved
#[utoipa::path(
    post,
    path = "/api/delivery-addresses",
    tag = DELIVERY_ADDRESS_TAG,
    request_body = CreateDeliveryAddressDto,
    responses(
        (status = 201, description = "Successfully saved address", body = DeliveryAddressDto),
        (status = 400, description = "Invalid or duplicate address", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient role", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_delivery_address(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateDeliveryAddressDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    let address = DeliveryAddressService::new(&state.db)
        .create(
            caller.as_ref(),
            CreateDeliveryAddressParams::from_dto(payload),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(address.into_dto())))
}

/// Get the caller's live delivery addresses.
#[utoipa::path(
    get,
    path = "/api/delivery-addresses",
    tag = DELIVERY_ADDRESS_TAG,
    responses(
        (status = 200, description = "Saved addresses", body = Vec<DeliveryAddressDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient role", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_delivery_addresses(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    let addresses = DeliveryAddressService::new(&state.db)
        .list(caller.as_ref())
        .await?;

    let addresses_dto: Vec<_> = addresses.into_iter().map(|a| a.into_dto()).collect();

    Ok((StatusCode::OK, Json(addresses_dto)))
}

#[utoipa::path(
    get,
    path = "/api/delivery-addresses/{address_id}",
    tag = DELIVERY_ADDRESS_TAG,
    params(
        ("address_id" = i32, Path, description = "Delivery address ID")
    ),
    responses(
        (status = 200, description = "Saved address", body = DeliveryAddressDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Address not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_delivery_address(
    State(state): State<AppState>,
    session: Session,
    Path(address_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    let address = DeliveryAddressService::new(&state.db)
        .get(caller.as_ref(), address_id)
        .await?;

    Ok((StatusCode::OK, Json(address.into_dto())))
}

/// Change a saved address or its delivery request.
///
/// # Returns
/// - `200 OK` - Updated address
/// - `400 Bad Request` - Address unchanged or duplicates another saved address
/// - `403 Forbidden` - Another user's address
/// - `404 Not Found` - Address missing or deleted
#[utoipa::path(
    patch,
    path = "/api/delivery-addresses/{address_id}",
    tag = DELIVERY_ADDRESS_TAG,
    params(
        ("address_id" = i32, Path, description = "Delivery address ID")
    ),
    request_body = UpdateDeliveryAddressDto,
    responses(
        (status = 200, description = "Successfully updated address", body = DeliveryAddressDto),
        (status = 400, description = "Invalid or duplicate address", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Address not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_delivery_address(
    State(state): State<AppState>,
    session: Session,
    Path(address_id): Path<i32>,
    Json(payload): Json<UpdateDeliveryAddressDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    let address = DeliveryAddressService::new(&state.db)
        .update(
            caller.as_ref(),
            address_id,
            UpdateDeliveryAddressParams::from_dto(payload),
        )
        .await?;

    Ok((StatusCode::OK, Json(address.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/delivery-addresses/{address_id}",
    tag = DELIVERY_ADDRESS_TAG,
    params(
        ("address_id" = i32, Path, description = "Delivery address ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted address"),
        (status = 400, description = "Address already deleted", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Address not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_delivery_address(
    State(state): State<AppState>,
    session: Session,
    Path(address_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    DeliveryAddressService::new(&state.db)
        .delete(caller.as_ref(), address_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
