//! Server state
//!
//! [`ServerState`] holds the configuration and the single provider client
//! handle. It is cheap to clone (`Arc` inside) and is the axum state for
//! every route; handlers never reach for a global.

use std::sync::Arc;

use crate::core::Config;
use crate::provider::{ProviderClient, ProviderError};

#[derive(Debug, Clone)]
pub struct ServerState {
    pub config: Config,
    provider: Arc<ProviderClient>,
}

impl ServerState {
    /// Build the state from configuration, constructing the provider client
    pub fn initialize(config: &Config) -> Result<Self, ProviderError> {
        let provider = ProviderClient::new(&config.provider_url, &config.service_key)?;
        Ok(Self {
            config: config.clone(),
            provider: Arc::new(provider),
        })
    }

    /// Build the state around an existing provider client (tests)
    pub fn with_provider(config: Config, provider: ProviderClient) -> Self {
        Self {
            config,
            provider: Arc::new(provider),
        }
    }

    /// The shared provider client handle
    pub fn provider(&self) -> &ProviderClient {
        &self.provider
    }
}
