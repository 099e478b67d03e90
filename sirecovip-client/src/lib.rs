//! SIRECOVIP Client - typed HTTP client for the SIRECOVIP API
//!
//! Carries the single-page frontend's moving parts: the API calls, the
//! role-keyed route guard, and the dashboard metrics computed
//! client-side over the full fetched merchant set.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod http;
pub mod routes;

pub use config::ClientConfig;
pub use dashboard::DashboardMetrics;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use routes::landing_route;

// Re-export shared types for convenience
pub use shared::{
    Document, LoginResponse, Merchant, MerchantResponse, MessageResponse, Organization, Role,
    UserInfo,
};
