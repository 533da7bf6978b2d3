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
        user::{UpdateUserDto, UserDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{pagination::PaginationParams, user::UpdateUserParams},
        service::user::UserService,
        state::AppState,
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

#[derive(Deserialize)]
pub struct UserSearchParams {
    #[serde(default)]
    pub username: Option<String>,
}

/// Search live users by username.
///
/// # Access Control
/// - `MANAGER`, `MASTER`
///
/// # Arguments
/// - `search` - Optional username substring
/// - `params` - Pagination and sort parameters
///
/// # Returns
/// - `200 OK` - Page of matching users
/// - `401 Unauthorized` - Not logged in
/// - `403 Forbidden` - Caller is not staff
#[utoipa::path(
    get,
    path = "/api/users",
    tag = USER_TAG,
    params(
        ("username" = Option<String>, Query, description = "Username substring"),
        ("page" = Option<u64>, Query, description = "Zero-based page"),
        ("entries" = Option<u64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Matching users", body = PaginatedDto<UserDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient role", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_users(
    State(state): State<AppState>,
    session: Session,
    Query(search): Query<UserSearchParams>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    let users = UserService::new(&state.db)
        .search(
            caller.as_ref(),
            search.username.as_deref(),
            params.into_request(),
        )
        .await?;

    Ok((StatusCode::OK, Json(users.into_dto(|user| user.into_dto()))))
}

/// Get a live user.
///
/// # Access Control
/// - The user themself, `MANAGER`, `MASTER`
///
/// # Returns
/// - `200 OK` - User
/// - `403 Forbidden` - Another customer's or owner's account
/// - `404 Not Found` - User missing or deleted
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    tag = USER_TAG,
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User", body = UserDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    let user = UserService::new(&state.db)
        .get(caller.as_ref(), user_id)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Update a user's username, email or role.
///
/// # Access Control
/// - The user themself, `MANAGER`, `MASTER`
/// - Only staff may change roles, and never above their own rank unless `MASTER`
///
/// # Returns
/// - `200 OK` - Updated user
/// - `400 Bad Request` - Malformed username or email, or either already taken
/// - `403 Forbidden` - Not allowed to modify this user or grant this role
/// - `404 Not Found` - User missing or deleted
#[utoipa::path(
    patch,
    path = "/api/users/{user_id}",
    tag = USER_TAG,
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 400, description = "Invalid user data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Json(payload): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    let user = UserService::new(&state.db)
        .update(caller.as_ref(), user_id, UpdateUserParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Tombstone a user.
///
/// # Access Control
/// - The user themself, `MASTER`
///
/// # Returns
/// - `204 No Content` - User deleted
/// - `400 Bad Request` - User already deleted
/// - `403 Forbidden` - Not allowed to delete this user
#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    tag = USER_TAG,
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "User already deleted", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    UserService::new(&state.db)
        .delete(caller.as_ref(), user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
