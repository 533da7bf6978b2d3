//! Error types and HTTP response handling.
//!
//! `AppError` is the top-level error type. It wraps the domain-specific errors (auth,
//! lifecycle, order workflow, AI upstream) and implements `IntoResponse` so handlers can
//! return `Result<_, AppError>` and have every failure rendered as a JSON `ErrorDto`.

pub mod ai;
pub mod auth;
pub mod config;
pub mod lifecycle;
pub mod order;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::SqlErr;
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::{
        error::{
            ai::AiError, auth::AuthError, config::ConfigError, lifecycle::LifecycleError,
            order::OrderError,
        },
        policy::RoleError,
    },
};

/// Top-level application error type.
///
/// Domain errors delegate to their own `IntoResponse`; infrastructure errors become a
/// generic 500 with details logged server-side.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error (401 / 403).
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Soft-delete lifecycle violation (404 / 400).
    #[error(transparent)]
    LifecycleErr(#[from] LifecycleError),

    /// Order workflow validation failure (400 / 404).
    #[error(transparent)]
    OrderErr(#[from] OrderError),

    /// Classified AI upstream failure (504 / 503 / 500).
    #[error(transparent)]
    AiErr(#[from] AiError),

    /// A principal without a role reached a rank comparison.
    ///
    /// Results in 500 Internal Server Error since stored users always carry a role.
    #[error(transparent)]
    RoleErr(#[from] RoleError),

    /// Database operation error from SeaORM.
    ///
    /// Unique constraint violations become 400 Bad Request; everything else is a 500.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Session store operation error.
    #[error(transparent)]
    SessionErr(#[from] tower_sessions::session::Error),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    #[error("{0}")]
    BadRequest(String),

    /// Duplicate unique key (username, email, category name, delivery address).
    ///
    /// Results in 400 Bad Request with the provided error message.
    #[error("{0}")]
    Conflict(String),

    /// Internal server error with custom message.
    ///
    /// The message is logged; a generic message is returned to the client.
    #[error("{0}")]
    InternalError(String),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest`, `Conflict` and unique constraint violations
/// - 404 Not Found - For `NotFound`
/// - 500 Internal Server Error - For infrastructure errors
/// - Variable - For domain errors, delegated to their own `into_response()`
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::LifecycleErr(err) => err.into_response(),
            Self::OrderErr(err) => err.into_response(),
            Self::AiErr(err) => err.into_response(),
            Self::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorDto { error: msg })).into_response()
            }
            Self::BadRequest(msg) | Self::Conflict(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto { error: msg })).into_response()
            }
            Self::DbErr(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => {
                    tracing::debug!("Unique constraint violation: {}", detail);
                    (
                        StatusCode::BAD_REQUEST,
                        Json(ErrorDto {
                            error: "Resource already exists".to_string(),
                        }),
                    )
                        .into_response()
                }
                _ => InternalServerError(err).into_response(),
            },
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorDto {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error and returns a generic message so implementation details don't leak.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}

/// Maps a unique constraint violation to `Conflict`, passing every other error through.
///
/// Used after inserts whose duplicate check ran in the same transaction: the constraint is
/// the last line against a concurrent insert that slipped past the check.
pub fn conflict_on_unique(err: sea_orm::DbErr, message: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(message.to_string()),
        _ => AppError::DbErr(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn maps_domain_errors_to_status_codes() {
        let cases: Vec<(AppError, StatusCode)> = vec![
            (AuthError::Unauthenticated.into(), StatusCode::UNAUTHORIZED),
            (
                AuthError::Forbidden(crate::server::policy::DenyReason::NotOwner).into(),
                StatusCode::FORBIDDEN,
            ),
            (
                LifecycleError::NotFound {
                    resource: "Order",
                    id: 1,
                }
                .into(),
                StatusCode::NOT_FOUND,
            ),
            (
                LifecycleError::AlreadyDeleted {
                    resource: "Order",
                    id: 1,
                }
                .into(),
                StatusCode::BAD_REQUEST,
            ),
            (OrderError::MenuNotFound(3).into(), StatusCode::BAD_REQUEST),
            (OrderError::LineItemNotFound(3).into(), StatusCode::NOT_FOUND),
            (OrderError::InvalidQuantity(0).into(), StatusCode::BAD_REQUEST),
            (AiError::Timeout.into(), StatusCode::GATEWAY_TIMEOUT),
            (AiError::Unavailable(502).into(), StatusCode::SERVICE_UNAVAILABLE),
            (
                AiError::Upstream("bad body".to_string()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Conflict("duplicate".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::InternalError("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
