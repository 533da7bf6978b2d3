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
        store::{CreateStoreDto, StoreDto, UpdateStoreDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            pagination::PaginationParams,
            store::{CreateStoreParams, UpdateStoreParams},
        },
        service::store::StoreService,
        state::AppState,
    },
};

/// Tag for grouping store endpoints in OpenAPI documentation
pub static STORE_TAG: &str = "store";

#[derive(Deserialize)]
pub struct StoreSearchParams {
    #[serde(default)]
    pub name: Option<String>,
}

/// Create a store for an OWNER account.
///
/// # Access Control
/// - `MASTER` - Only masters open stores
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Store data including owner and category ids
///
/// # Returns
/// - `201 Created` - Created store
/// - `400 Bad Request` - Owner is not an OWNER, or a category is missing
/// - `403 Forbidden` - Caller is not a master
/// - `404 Not Found` - Owner missing or deleted
#[utoipa::path(
    post,
    path = "/api/stores",
    tag = STORE_TAG,
    request_body = CreateStoreDto,
    responses(
        (status = 201, description = "Successfully created store", body = StoreDto),
        (status = 400, description = "Invalid store data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient role", body = ErrorDto),
        (status = 404, description = "Owner not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_store(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateStoreDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    let store = StoreService::new(&state.db)
        .create(caller.as_ref(), CreateStoreParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(store.into_dto())))
}

/// Get paginated live stores. Public.
#[utoipa::path(
    get,
    path = "/api/stores",
    tag = STORE_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Zero-based page"),
        ("entries" = Option<u64>, Query, description = "Page size"),
        ("sort" = Option<String>, Query, description = "created_at or updated_at"),
        ("direction" = Option<String>, Query, description = "asc or desc")
    ),
    responses(
        (status = 200, description = "Page of stores", body = PaginatedDto<StoreDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_stores(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let stores = StoreService::new(&state.db)
        .list(None, params.into_request())
        .await?;

    Ok((StatusCode::OK, Json(stores.into_dto(|store| store.into_dto()))))
}

/// Search live stores by name. Public.
///
/// Page size is restricted to 10, 30 or 50; anything else falls back to 10.
#[utoipa::path(
    get,
    path = "/api/stores/search",
    tag = STORE_TAG,
    params(
        ("name" = Option<String>, Query, description = "Store name substring"),
        ("page" = Option<u64>, Query, description = "Zero-based page"),
        ("entries" = Option<u64>, Query, description = "Page size: 10, 30 or 50")
    ),
    responses(
        (status = 200, description = "Matching stores", body = PaginatedDto<StoreDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_stores(
    State(state): State<AppState>,
    Query(search): Query<StoreSearchParams>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let stores = StoreService::new(&state.db)
        .list(search.name.as_deref(), params.into_search_request())
        .await?;

    Ok((StatusCode::OK, Json(stores.into_dto(|store| store.into_dto()))))
}

/// Get a live store. Public.
#[utoipa::path(
    get,
    path = "/api/stores/{store_id}",
    tag = STORE_TAG,
    params(
        ("store_id" = i32, Path, description = "Store ID")
    ),
    responses(
        (status = 200, description = "Store", body = StoreDto),
        (status = 404, description = "Store not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_store(
    State(state): State<AppState>,
    Path(store_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let store = StoreService::new(&state.db).get(store_id).await?;

    Ok((StatusCode::OK, Json(store.into_dto())))
}

/// Update a store, optionally replacing its category links.
///
/// # Access Control
/// - `OWNER` - Only the store's own owner
/// - `MASTER`
///
/// # Returns
/// - `200 OK` - Updated store
/// - `400 Bad Request` - A category is missing
/// - `403 Forbidden` - Another owner's store
/// - `404 Not Found` - Store missing or deleted
#[utoipa::path(
    patch,
    path = "/api/stores/{store_id}",
    tag = STORE_TAG,
    params(
        ("store_id" = i32, Path, description = "Store ID")
    ),
    request_body = UpdateStoreDto,
    responses(
        (status = 200, description = "Successfully updated store", body = StoreDto),
        (status = 400, description = "Invalid store data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Store not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_store(
    State(state): State<AppState>,
    session: Session,
    Path(store_id): Path<i32>,
    Json(payload): Json<UpdateStoreDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    let store = StoreService::new(&state.db)
        .update(caller.as_ref(), store_id, UpdateStoreParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(store.into_dto())))
}

/// Tombstone a store and its category links.
///
/// # Access Control
/// - `OWNER` - Only the store's own owner
/// - `MASTER`
///
/// # Returns
/// - `204 No Content` - Store deleted
/// - `403 Forbidden` - Another owner's store
/// - `404 Not Found` - Store missing or deleted
#[utoipa::path(
    delete,
    path = "/api/stores/{store_id}",
    tag = STORE_TAG,
    params(
        ("store_id" = i32, Path, description = "Store ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted store"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Store not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_store(
    State(state): State<AppState>,
    session: Session,
    Path(store_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    StoreService::new(&state.db)
        .delete(caller.as_ref(), store_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
