//! Organization API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Organization router (catalog reads only; rows are managed by seeding)
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/organizations", get(handler::list))
}
