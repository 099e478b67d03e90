//! Client-related types shared between server and client
//!
//! Common request/response types used in API communication.

use serde::{Deserialize, Serialize};

use crate::models::{Merchant, UserInfo};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    /// Provider-issued access token, sent back as `Authorization: Bearer`
    pub token: String,
    pub user: UserInfo,
}

// =============================================================================
// Merchant API DTOs
// =============================================================================

/// Response for merchant create/update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantResponse {
    pub message: String,
    pub merchant: Merchant,
}

/// Generic confirmation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body, `{"error": "..."}` on every 4xx/5xx
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
