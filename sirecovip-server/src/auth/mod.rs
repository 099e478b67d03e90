//! Authentication
//!
//! Token verification is delegated to the provider: the middleware sends
//! the bearer token back to the identity service and trusts its answer.
//! Nothing here decodes or signs tokens locally.

pub mod extractor;
pub mod middleware;

pub use middleware::require_auth;

/// Authenticated user attached to the request after token verification
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Provider auth id (also the `registered_by` value on merchants)
    pub id: String,
    pub email: String,
}
