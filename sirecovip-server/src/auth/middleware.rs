//! Authentication middleware
//!
//! Requires a bearer token on every `/api/` route except login, and
//! delegates verification to the provider's identity service.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppError;

const MISSING_TOKEN: &str = "⛔ Acceso denegado: Falta el token de autenticación";
const INVALID_TOKEN: &str = "⛔ Token inválido o expirado";

/// Authentication middleware
///
/// Skipped for:
/// - `OPTIONS *` (CORS preflight)
/// - non-`/api/` paths (root status, health)
/// - `POST /api/auth/login`
///
/// On success the verified [`CurrentUser`] is inserted into the request
/// extensions for handlers to pick up.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path();
    if !path.starts_with("/api/") || path == "/api/auth/login" {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header.and_then(extract_bearer) {
        Some(token) => token.to_string(),
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "Request without bearer token");
            return Err(AppError::unauthorized(MISSING_TOKEN));
        }
    };

    match state.provider().auth().get_user(&token).await {
        Ok(user) => {
            req.extensions_mut().insert(CurrentUser {
                id: user.id,
                email: user.email.unwrap_or_default(),
            });
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(target: "security", error = %e, uri = %req.uri(), "Token rejected by provider");
            Err(AppError::unauthorized(INVALID_TOKEN))
        }
    }
}

/// Strip the `Bearer ` prefix from an Authorization header value
pub fn extract_bearer(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
