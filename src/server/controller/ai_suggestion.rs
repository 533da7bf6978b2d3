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
        ai_suggestion::{AiSuggestionDto, CreateAiSuggestionDto},
        api::{ErrorDto, PaginatedDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{ai_suggestion::AiSuggestionFilter, pagination::PaginationParams},
        service::ai_suggestion::AiSuggestionService,
        state::AppState,
    },
};

/// Tag for grouping AI suggestion endpoints in OpenAPI documentation
pub static AI_SUGGESTION_TAG: &str = "ai_suggestion";

#[derive(Deserialize)]
pub struct AiSuggestionSearchParams {
    #[serde(default)]
    pub store_id: Option<i32>,
    #[serde(default)]
    pub keyword: Option<String>,
}

/// Ask the AI upstream for a menu suggestion and store the exchange.
///
/// Rate limited per client IP.
///
/// # Access Control
/// - `OWNER`, `MASTER`
///
/// # Arguments
/// - `state` - Application state containing the database connection and AI client
/// - `session` - User's session for authentication
/// - `payload` - Store the suggestion is for and the request text
///
/// # Returns
/// - `201 Created` - Stored suggestion
/// - `400 Bad Request` - Empty request text
/// - `404 Not Found` - Store missing or deleted
/// - `429 Too Many Requests` - Rate limit exceeded
/// - `500 Internal Server Error` - Upstream rejected the request or replied malformed
/// - `503 Service Unavailable` - Upstream server error
/// - `504 Gateway Timeout` - Upstream did not answer in time
#[utoipa::path(
    post,
    path = "/api/ai-suggestions",
    tag = AI_SUGGESTION_TAG,
    request_body = CreateAiSuggestionDto,
    responses(
        (status = 201, description = "Successfully created suggestion", body = AiSuggestionDto),
        (status = 400, description = "Invalid request text", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient role", body = ErrorDto),
        (status = 404, description = "Store not found", body = ErrorDto),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Upstream or internal error", body = ErrorDto),
        (status = 503, description = "AI service unavailable", body = ErrorDto),
        (status = 504, description = "AI service timed out", body = ErrorDto)
    ),
)]
pub async fn create_ai_suggestion(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateAiSuggestionDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    let suggestion = AiSuggestionService::new(&state.db, state.suggestion_generator.as_ref())
        .create(caller.as_ref(), payload.store_id, payload.request_text)
        .await?;

    Ok((StatusCode::CREATED, Json(suggestion.into_dto())))
}

/// Get or search stored suggestions.
///
/// Without a keyword this lists every live suggestion, optionally for one store.
///
/// # Access Control
/// - `MASTER`
#[utoipa::path(
    get,
    path = "/api/ai-suggestions",
    tag = AI_SUGGESTION_TAG,
    params(
        ("store_id" = Option<i32>, Query, description = "Only suggestions for this store"),
        ("keyword" = Option<String>, Query, description = "Request text substring"),
        ("page" = Option<u64>, Query, description = "Zero-based page"),
        ("entries" = Option<u64>, Query, description = "Page size"),
        ("sort" = Option<String>, Query, description = "created_at or updated_at"),
        ("direction" = Option<String>, Query, description = "asc or desc")
    ),
    responses(
        (status = 200, description = "Page of suggestions", body = PaginatedDto<AiSuggestionDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient role", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_ai_suggestions(
    State(state): State<AppState>,
    session: Session,
    Query(search): Query<AiSuggestionSearchParams>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    let filter = AiSuggestionFilter {
        store_id: search.store_id,
        keyword: search.keyword,
    };

    let suggestions = AiSuggestionService::new(&state.db, state.suggestion_generator.as_ref())
        .search(caller.as_ref(), filter, params.into_request())
        .await?;

    Ok((
        StatusCode::OK,
        Json(suggestions.into_dto(|suggestion| suggestion.into_dto())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/ai-suggestions/{suggestion_id}",
    tag = AI_SUGGESTION_TAG,
    params(
        ("suggestion_id" = i32, Path, description = "AI suggestion ID")
    ),
    responses(
        (status = 200, description = "Suggestion", body = AiSuggestionDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient role", body = ErrorDto),
        (status = 404, description = "Suggestion not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_ai_suggestion(
    State(state): State<AppState>,
    session: Session,
    Path(suggestion_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    let suggestion = AiSuggestionService::new(&state.db, state.suggestion_generator.as_ref())
        .get(caller.as_ref(), suggestion_id)
        .await?;

    Ok((StatusCode::OK, Json(suggestion.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/ai-suggestions/{suggestion_id}",
    tag = AI_SUGGESTION_TAG,
    params(
        ("suggestion_id" = i32, Path, description = "AI suggestion ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted suggestion"),
        (status = 400, description = "Suggestion already deleted", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient role", body = ErrorDto),
        (status = 404, description = "Suggestion not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_ai_suggestion(
    State(state): State<AppState>,
    session: Session,
    Path(suggestion_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).principal().await?;

    AiSuggestionService::new(&state.db, state.suggestion_generator.as_ref())
        .delete(caller.as_ref(), suggestion_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
