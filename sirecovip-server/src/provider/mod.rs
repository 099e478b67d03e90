//! Provider client
//!
//! Single client handle for the hosted backend-as-a-service that supplies
//! authentication, relational storage and object storage. One shared
//! `reqwest::Client` backs the three sub-APIs:
//!
//! - [`AuthApi`] — password sign-in and token verification (`/auth/v1`)
//! - [`TableQuery`] — relational CRUD over the REST interface (`/rest/v1`)
//! - [`StorageApi`] — object uploads and public URLs (`/storage/v1`)
//!
//! The handle is constructed once at startup and injected into
//! [`ServerState`](crate::core::ServerState); nothing here is a global.

pub mod auth;
pub mod database;
pub mod error;
pub mod storage;

pub use auth::{AuthApi, AuthSession, AuthUser};
pub use database::TableQuery;
pub use error::{ProviderError, ProviderResult};
pub use storage::StorageApi;

use std::time::Duration;

/// Request timeout for all provider calls
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client handle for the hosted provider
#[derive(Debug, Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl ProviderClient {
    /// Build a client for the provider at `base_url`, authenticating every
    /// call with the service-role key.
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> ProviderResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProviderError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
        })
    }

    /// Authentication sub-API
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// Start a relational query against `table`
    pub fn from(&self, table: impl Into<String>) -> TableQuery<'_> {
        TableQuery::new(self, table.into())
    }

    /// Object storage sub-API
    pub fn storage(&self) -> StorageApi<'_> {
        StorageApi::new(self)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn service_key(&self) -> &str {
        &self.service_key
    }

    /// Apply the service-role headers (`apikey` + bearer) to a request
    pub(crate) fn service_headers(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }
}
