//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required or token rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Server-side error
    #[error("Server error: {0}")]
    Server(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
