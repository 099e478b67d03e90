//! Authentication Handlers
//!
//! Login delegates credential checking to the provider, then enriches the
//! session with the role and name kept in the `users` table.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::core::ServerState;
use crate::utils::AppError;
use shared::{LoginRequest, LoginResponse, Role, UserInfo};

/// Row shape of the `users` table lookup
#[derive(Debug, Deserialize)]
struct UserRow {
    role: Role,
    name: String,
}

/// Login handler
///
/// | Outcome | Status |
/// |---------|--------|
/// | missing email/password | 400 |
/// | provider rejects credentials | 401, provider message verbatim |
/// | `users` lookup fails | 500 |
/// | no `users` row for the auth id | 404 |
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::validation("Email y contraseña son obligatorios"));
    }

    let session = state
        .provider()
        .auth()
        .sign_in_with_password(&req.email, &req.password)
        .await
        .map_err(|e| {
            tracing::warn!(target: "security", email = %req.email, error = %e, "Login failed");
            AppError::unauthorized(e.to_string())
        })?;

    // The role claim lives in public.users, keyed by the auth id
    let user_row: Option<UserRow> = state
        .provider()
        .from("users")
        .select("role,name")
        .eq("id", &session.user.id)
        .fetch_one()
        .await
        .map_err(|e| {
            AppError::internal(format!("Error al obtener datos del usuario: {e}"))
        })?;

    let user_row = user_row
        .ok_or_else(|| AppError::not_found("Usuario no encontrado en la base de datos"))?;

    tracing::info!(
        user_id = %session.user.id,
        role = user_row.role.as_str(),
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        message: "✅ Login exitoso".into(),
        token: session.access_token,
        user: UserInfo {
            id: session.user.id,
            email: session.user.email.unwrap_or(req.email),
            role: user_row.role,
            name: user_row.name,
        },
    }))
}
