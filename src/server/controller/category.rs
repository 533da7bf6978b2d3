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
        category::{CategoryDto, CreateCategoryDto, UpdateCategoryDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, model::pagination::PaginationParams,
        service::category::CategoryService, state::AppState,
    },
};

/// Tag for grouping category endpoints in OpenAPI documentation
pub static CATEGORY_TAG: &str = "category";

/// Create a store category.
///
/// # Access Control
/// - `MASTER` - Only masters manage categories
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Category name
///
/// # Returns
/// - `201 Created` - Created category
/// - `400 Bad Request` - Empty or duplicate name
/// - `401 Unauthorized` - Not logged in
/// - `403 Forbidden` - Caller is not a master
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = CATEGORY_TAG,
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Successfully created category", body = CategoryDto),
        (status = 400, description = "Invalid or duplicate category name", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient role", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_category(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateCategoryDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    let category = CategoryService::new(&state.db)
        .create(caller.as_ref(), payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(category.into_dto())))
}

/// Get paginated live categories. Public.
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = CATEGORY_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Zero-based page"),
        ("entries" = Option<u64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Page of categories", body = PaginatedDto<CategoryDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_categories(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let categories = CategoryService::new(&state.db)
        .list(params.into_request())
        .await?;

    Ok((
        StatusCode::OK,
        Json(categories.into_dto(|category| category.into_dto())),
    ))
}

/// Rename a category.
///
/// # Access Control
/// - `MASTER`
///
/// # Returns
/// - `200 OK` - Renamed category
/// - `400 Bad Request` - Empty or duplicate name
/// - `404 Not Found` - Category missing or deleted
#[utoipa::path(
    patch,
    path = "/api/categories/{category_id}",
    tag = CATEGORY_TAG,
    params(
        ("category_id" = i32, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Successfully updated category", body = CategoryDto),
        (status = 400, description = "Invalid or duplicate category name", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient role", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_category(
    State(state): State<AppState>,
    session: Session,
    Path(category_id): Path<i32>,
    Json(payload): Json<UpdateCategoryDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    let category = CategoryService::new(&state.db)
        .update(caller.as_ref(), category_id, payload.name)
        .await?;

    Ok((StatusCode::OK, Json(category.into_dto())))
}

/// Tombstone a category.
///
/// # Access Control
/// - `MASTER`
///
/// # Returns
/// - `204 No Content` - Category deleted
/// - `400 Bad Request` - Category already deleted
/// - `404 Not Found` - Category missing
#[utoipa::path(
    delete,
    path = "/api/categories/{category_id}",
    tag = CATEGORY_TAG,
    params(
        ("category_id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted category"),
        (status = 400, description = "Category already deleted", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient role", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_category(
    State(state): State<AppState>,
    session: Session,
    Path(category_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    CategoryService::new(&state.db)
        .delete(caller.as_ref(), category_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
