use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{model::api::ErrorDto, server::policy::DenyReason};

#[derive(Error, Debug)]
pub enum AuthError {
    /// No authenticated user in the session, or the session user no longer exists.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Authentication required")]
    Unauthenticated,

    /// The caller is authenticated but the policy denied the operation.
    ///
    /// Results in a 403 Forbidden response. The reason is logged, not returned.
    #[error("Access denied: {0:?}")]
    Forbidden(DenyReason),

    /// Elevated signup attempted with a missing or wrong admin token.
    ///
    /// Results in a 403 Forbidden response.
    #[error("Invalid admin token")]
    InvalidAdminToken,
}

/// Converts authentication errors into HTTP responses.
///
/// # Returns
/// - 401 Unauthorized - For `Unauthenticated`
/// - 403 Forbidden - For `Forbidden` and `InvalidAdminToken`
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Authentication required".to_string(),
                }),
            )
                .into_response(),
            Self::Forbidden(reason) => {
                tracing::debug!("Request denied by policy: {:?}", reason);
                (
                    StatusCode::FORBIDDEN,
                    Json(ErrorDto {
                        error: "You do not have permission to perform this action".to_string(),
                    }),
                )
                    .into_response()
            }
            Self::InvalidAdminToken => (
                StatusCode::FORBIDDEN,
                Json(ErrorDto {
                    error: "Invalid admin token".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
