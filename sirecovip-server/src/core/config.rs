//! Server configuration
//!
//! All configuration comes from environment variables (a `.env` file is
//! loaded by the binaries before this runs):
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | SUPABASE_URL | — (required) | Provider base URL |
//! | SUPABASE_SERVICE_ROLE | — (required) | Provider service-role key |
//! | PORT | 3000 | HTTP listen port |
//! | FRONTEND_URL | http://localhost:5173 | Allowed CORS origin |
//! | ENVIRONMENT | development | development \| staging \| production |

/// Configuration error: the provider credentials are mandatory
#[derive(Debug, thiserror::Error)]
#[error("❌ Faltan credenciales del proveedor: {0}")]
pub struct MissingCredential(pub &'static str);

#[derive(Debug, Clone)]
pub struct Config {
    /// Provider base URL
    pub provider_url: String,
    /// Provider service-role key (server-side only, never sent to clients)
    pub service_key: String,
    /// HTTP API port
    pub http_port: u16,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fails fast when the provider credentials are absent; everything
    /// else falls back to defaults.
    pub fn from_env() -> Result<Self, MissingCredential> {
        let provider_url = std::env::var("SUPABASE_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or(MissingCredential("SUPABASE_URL"))?;
        let service_key = std::env::var("SUPABASE_SERVICE_ROLE")
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or(MissingCredential("SUPABASE_SERVICE_ROLE"))?;

        Ok(Self {
            provider_url,
            service_key,
            http_port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            frontend_url: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        })
    }

    /// Build a config with explicit values, used in tests
    pub fn with_overrides(
        provider_url: impl Into<String>,
        service_key: impl Into<String>,
        http_port: u16,
    ) -> Self {
        Self {
            provider_url: provider_url.into(),
            service_key: service_key.into(),
            http_port,
            frontend_url: "http://localhost:5173".into(),
            environment: "development".into(),
        }
    }
}
