//! Health routes - public (no auth)
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /  | GET | API banner, used by uptime checks |
//! | /health | GET | status + version |

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(root_status))
        .route("/health", get(health))
}

#[derive(Serialize)]
pub struct RootStatus {
    status: &'static str,
}

async fn root_status() -> Json<RootStatus> {
    Json(RootStatus {
        status: "API SIRECOVIP Online 🚀",
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
