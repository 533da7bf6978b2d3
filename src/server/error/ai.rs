use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Classified failures of the external AI suggestion call.
#[derive(Error, Debug)]
pub enum AiError {
    /// The call did not complete within the configured timeout.
    #[error("AI upstream timed out")]
    Timeout,

    /// The upstream answered with a 5xx status.
    #[error("AI upstream unavailable: status {0}")]
    Unavailable(u16),

    /// Any other failure: 4xx status, connection error, malformed body.
    #[error("AI upstream error: {0}")]
    Upstream(String),
}

/// Converts AI errors into HTTP responses with messages that tell callers whether to retry.
///
/// # Returns
/// - 504 Gateway Timeout - For `Timeout`
/// - 503 Service Unavailable - For `Unavailable`
/// - 500 Internal Server Error - For `Upstream`
impl IntoResponse for AiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Timeout => {
                tracing::warn!("{}", self);
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "AI suggestion service timed out, please try again shortly",
                )
            }
            Self::Unavailable(_) => {
                tracing::warn!("{}", self);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "AI suggestion service is currently unavailable",
                )
            }
            Self::Upstream(_) => {
                tracing::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AI suggestion request failed unexpectedly",
                )
            }
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
