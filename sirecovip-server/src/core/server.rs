//! Server Implementation
//!
//! Router assembly and HTTP server startup.

use axum::{Router, extract::DefaultBodyLimit, middleware};
use http::{HeaderValue, Method, header};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api;
use crate::auth;
use crate::core::{Config, ServerState};

/// Request body cap: a 5MB stall photo plus several documents
const MAX_REQUEST_BODY: usize = 25 * 1024 * 1024;

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (tests, embedded runs)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config)?,
        };

        let app = build_router(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(
            environment = %self.config.environment,
            "🚀 Servidor corriendo en http://localhost:{}",
            self.config.http_port
        );

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}

/// Assemble the full application router
///
/// Public for integration tests, which drive it with `tower::ServiceExt`.
pub fn build_router(state: ServerState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .merge(api::health::router())
        .merge(api::auth::router())
        .merge(api::merchants::router())
        .merge(api::organizations::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY))
        .with_state(state)
}

/// CORS restricted to the configured frontend origin, credentials allowed
fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    match config.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            tracing::warn!(
                frontend_url = %config.frontend_url,
                "Invalid FRONTEND_URL, CORS will reject cross-origin requests"
            );
            layer
        }
    }
}
