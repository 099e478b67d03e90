//! Organization API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::Organization;

/// List all organizations for the registration form catalog
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Organization>>> {
    let organizations: Vec<Organization> = state
        .provider()
        .from("organizations")
        .select("*")
        .order("name.asc")
        .fetch()
        .await?;
    Ok(Json(organizations))
}
