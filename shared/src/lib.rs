//! Shared types for SIRECOVIP
//!
//! Domain models and API request/response types used by both the
//! API server and the frontend client crate.

pub mod client;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{ErrorBody, LoginRequest, LoginResponse, MerchantResponse, MessageResponse};
pub use models::{Document, Merchant, MerchantStatus, Organization, Role, StandType, UserInfo};
