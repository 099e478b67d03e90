//! CurrentUser extractor
//!
//! Lets handlers take `user: CurrentUser` directly. When the middleware
//! already verified the token, the extension is reused; otherwise the
//! token is verified here (same provider round-trip).

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{CurrentUser, middleware::extract_bearer};
use crate::core::ServerState;
use crate::utils::AppError;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let token = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(extract_bearer)
            .ok_or_else(|| {
                AppError::unauthorized("⛔ Acceso denegado: Falta el token de autenticación")
            })?;

        let user = state
            .provider()
            .auth()
            .get_user(token)
            .await
            .map_err(|e| {
                tracing::warn!(target: "security", error = %e, "Token rejected by provider");
                AppError::unauthorized("⛔ Token inválido o expirado")
            })?;

        let current = CurrentUser {
            id: user.id,
            email: user.email.unwrap_or_default(),
        };
        parts.extensions.insert(current.clone());

        Ok(current)
    }
}
