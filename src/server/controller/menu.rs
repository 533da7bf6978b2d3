use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        menu::{CreateMenuDto, MenuDto, UpdateMenuDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            menu::{CreateMenuParams, UpdateMenuParams},
            pagination::PaginationParams,
        },
        service::menu::MenuService,
        state::AppState,
    },
};

/// Tag for grouping menu endpoints in OpenAPI documentation
pub static MENU_TAG: &str = "menu";

/// Add a menu to a store.
///
/// # Access Control
/// - `OWNER` - Only the store's own owner
/// - `MASTER`
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `store_id` - Store receiving the menu
/// - `payload` - Menu data
///
/// # Returns
/// - `201 Created` - Created menu
/// - `400 Bad Request` - Negative price
/// - `403 Forbidden` - Another owner's store
/// - `404 Not Found` - Store missing or deleted
#[utoipa::path(
    post,
    path = "/api/stores/{store_id}/menus",
    tag = MENU_TAG,
    params(
        ("store_id" = i32, Path, description = "Store ID")
    ),
    request_body = CreateMenuDto,
    responses(
        (status = 201, description = "Successfully created menu", body = MenuDto),
        (status = 400, description = "Invalid menu data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Store not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_menu(
    State(state): State<AppState>,
    session: Session,
    Path(store_id): Path<i32>,
    Json(payload): Json<CreateMenuDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    let menu = MenuService::new(&state.db)
        .create(caller.as_ref(), CreateMenuParams::from_dto(store_id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(menu.into_dto())))
}

/// Get a store's publicly visible menus. Public.
#[utoipa::path(
    get,
    path = "/api/stores/{store_id}/menus",
    tag = MENU_TAG,
    params(
        ("store_id" = i32, Path, description = "Store ID"),
        ("page" = Option<u64>, Query, description = "Zero-based page"),
        ("entries" = Option<u64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Page of menus", body = PaginatedDto<MenuDto>),
        (status = 404, description = "Store not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_store_menus(
    State(state): State<AppState>,
    Path(store_id): Path<i32>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let menus = MenuService::new(&state.db)
        .find_live_menus_by_store(store_id, params.into_request())
        .await?;

    Ok((StatusCode::OK, Json(menus.into_dto(|menu| menu.into_dto()))))
}

/// Get a publicly visible menu. Public.
#[utoipa::path(
    get,
    path = "/api/menus/{menu_id}",
    tag = MENU_TAG,
    params(
        ("menu_id" = i32, Path, description = "Menu ID")
    ),
    responses(
        (status = 200, description = "Menu", body = MenuDto),
        (status = 404, description = "Menu not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_menu(
    State(state): State<AppState>,
    Path(menu_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let menu = MenuService::new(&state.db)
        .find_live_menu_by_id(menu_id)
        .await?;

    Ok((StatusCode::OK, Json(menu.into_dto())))
}

/// Update a menu.
///
/// # Access Control
/// - `OWNER` - Only the owner of the menu's store
/// - `MASTER`
#[utoipa::path(
    patch,
    path = "/api/menus/{menu_id}",
    tag = MENU_TAG,
    params(
        ("menu_id" = i32, Path, description = "Menu ID")
    ),
    request_body = UpdateMenuDto,
    responses(
        (status = 200, description = "Successfully updated menu", body = MenuDto),
        (status = 400, description = "Invalid menu data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Menu not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_menu(
    State(state): State<AppState>,
    session: Session,
    Path(menu_id): Path<i32>,
    Json(payload): Json<UpdateMenuDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    let menu = MenuService::new(&state.db)
        .update(caller.as_ref(), menu_id, UpdateMenuParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(menu.into_dto())))
}

/// Tombstone a menu and hide it from the public listing.
///
/// # Access Control
/// - `OWNER` - Only the owner of the menu's store
/// - `MASTER`
#[utoipa::path(
    delete,
    path = "/api/menus/{menu_id}",
    tag = MENU_TAG,
    params(
        ("menu_id" = i32, Path, description = "Menu ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted menu"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Menu not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_menu(
    State(state): State<AppState>,
    session: Session,
    Path(menu_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    MenuService::new(&state.db)
        .delete(caller.as_ref(), menu_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
