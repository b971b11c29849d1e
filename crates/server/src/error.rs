//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::CustomerError;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Customer domain failure.
    #[error(transparent)]
    Customer(#[from] CustomerError),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Customer(CustomerError::Repository(_)) | Self::Database(_) | Self::Internal(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Customer(err) => match err {
                CustomerError::NotFound(_) => StatusCode::NOT_FOUND,
                CustomerError::EmailUnavailable(_) => StatusCode::CONFLICT,
                CustomerError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Customer(
                CustomerError::NotFound(message) | CustomerError::EmailUnavailable(message),
            ) => message.clone(),
            Self::BadRequest(_) => self.to_string(),
            Self::Customer(CustomerError::Repository(_))
            | Self::Database(_)
            | Self::Internal(_) => "Internal server error".to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
