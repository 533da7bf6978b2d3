use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        review::{CreateReviewDto, ReviewDto, StoreReviewsDto, UpdateReviewDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            pagination::PaginationParams,
            review::{CreateReviewParams, UpdateReviewParams},
        },
        service::review::ReviewService,
        state::AppState,
    },
};

/// Tag for grouping review endpoints in OpenAPI documentation
pub static REVIEW_TAG: &str = "review";

/// Review a store, optionally referencing one of the caller's orders.
///
/// # Access Control
/// - `CUSTOMER`
///
/// # Returns
/// - `201 Created` - Created review
/// - `400 Bad Request` - Score outside 0.0 to 5.0, or order not the caller's
/// - `404 Not Found` - Store missing or deleted
#[utoipa::path(
    post,
    path = "/api/reviews",
    tag = REVIEW_TAG,
    request_body = CreateReviewDto,
    responses(
        (status = 201, description = "Successfully created review", body = ReviewDto),
        (status = 400, description = "Invalid review data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient role", body = ErrorDto),
        (status = 404, description = "Store not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_review(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    let review = ReviewService::new(&state.db)
        .create(caller.as_ref(), CreateReviewParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(review.into_dto())))
}

/// Get a store's reviews and its average rating. Public.
#[utoipa::path(
    get,
    path = "/api/stores/{store_id}/reviews",
    tag = REVIEW_TAG,
    params(
        ("store_id" = i32, Path, description = "Store ID"),
        ("page" = Option<u64>, Query, description = "Zero-based page"),
        ("entries" = Option<u64>, Query, description = "Page size"),
        ("sort" = Option<String>, Query, description = "created_at or updated_at"),
        ("direction" = Option<String>, Query, description = "asc or desc")
    ),
    responses(
        (status = 200, description = "Reviews with average rating", body = StoreReviewsDto),
        (status = 404, description = "Store not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_store_reviews(
    State(state): State<AppState>,
    Path(store_id): Path<i32>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let store_reviews = ReviewService::new(&state.db)
        .get_by_store(store_id, params.into_request())
        .await?;

    let dto = StoreReviewsDto {
        average_rating: store_reviews.average_rating,
        reviews: store_reviews.reviews.into_dto(|review| review.into_dto()),
    };

    Ok((StatusCode::OK, Json(dto)))
}

/// Edit a review.
///
/// # Access Control
/// - `CUSTOMER` - Only the review's author
#[utoipa::path(
    patch,
    path = "/api/reviews/{review_id}",
    tag = REVIEW_TAG,
    params(
        ("review_id" = i32, Path, description = "Review ID")
    ),
    request_body = UpdateReviewDto,
    responses(
        (status = 200, description = "Successfully updated review", body = ReviewDto),
        (status = 400, description = "Invalid review data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_review(
    State(state): State<AppState>,
    session: Session,
    Path(review_id): Path<i32>,
    Json(payload): Json<UpdateReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    let review = ReviewService::new(&state.db)
        .update(caller.as_ref(), review_id, UpdateReviewParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(review.into_dto())))
}

/// Tombstone a review.
///
/// # Access Control
/// - `CUSTOMER` - Only the review's author
/// - `MASTER`
#[utoipa::path(
    delete,
    path = "/api/reviews/{review_id}",
    tag = REVIEW_TAG,
    params(
        ("review_id" = i32, Path, description = "Review ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted review"),
        (status = 400, description = "Review already deleted", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_review(
    State(state): State<AppState>,
    session: Session,
    Path(review_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    ReviewService::new(&state.db)
        .delete(caller.as_ref(), review_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
