//! Provider error types
//!
//! Provider failures are surfaced to callers as-is: the API layer
//! forwards the provider's status and message without retrying or
//! compensating.

use thiserror::Error;

/// Error returned by any provider call
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never got a usable answer (DNS, connect, timeout)
    #[error("Provider request failed: {0}")]
    Transport(String),

    /// The provider answered 2xx but the body did not match the contract
    #[error("Invalid provider response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Turn a non-success response into a [`ProviderError::Api`], pulling the
/// human-readable message out of the known provider body shapes
/// (PostgREST `message`, GoTrue `msg` / `error_description`).
pub(crate) async fn error_from_response(resp: reqwest::Response) -> ProviderError {
    let status = resp.status().as_u16();
    let text = resp.text().await.unwrap_or_default();

    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|body| {
            ["message", "msg", "error_description", "error"]
                .iter()
                .find_map(|key| {
                    body.get(key)
                        .and_then(|m| m.as_str())
                        .map(|m| m.to_string())
                })
        })
        .unwrap_or_else(|| {
            if text.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                text.clone()
            }
        });

    ProviderError::Api { status, message }
}
