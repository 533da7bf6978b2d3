use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Soft-delete lifecycle violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// The row does not exist or is tombstoned.
    ///
    /// Results in a 404 Not Found response.
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i32 },

    /// A delete targeted a row that is already tombstoned.
    ///
    /// Results in a 400 Bad Request response. The existing tombstone is left untouched.
    #[error("{resource} {id} is already deleted")]
    AlreadyDeleted { resource: &'static str, id: i32 },
}

impl IntoResponse for LifecycleError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::AlreadyDeleted { .. } => StatusCode::BAD_REQUEST,
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
