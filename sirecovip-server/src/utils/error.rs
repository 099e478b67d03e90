//! Unified error handling
//!
//! Every handler returns [`AppError`] on failure; `IntoResponse` maps it
//! to the `{"error": "<message>"}` body the frontend expects. Provider
//! failures keep their own status and message (no retry, no rewording).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::provider::ProviderError;
use shared::ErrorBody;

/// Application error
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or rejected credentials (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Resource does not exist (404)
    #[error("{0}")]
    NotFound(String),

    /// Request failed validation (400)
    #[error("{0}")]
    Validation(String),

    /// Anything that is the server's own fault (500)
    #[error("{0}")]
    Internal(String),

    /// A provider call failed; surfaced with the provider's status
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl AppError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::Provider(ProviderError::Api { status, message }) => {
                // Only error statuses pass through verbatim
                let status = StatusCode::from_u16(status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, message)
            }
            AppError::Provider(e) => {
                error!(target: "provider", error = %e, "Provider call failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
