//! API route modules
//!
//! One module per resource, each exposing a `router()`:
//!
//! - [`health`] - root status and health check (public)
//! - [`auth`] - login (public)
//! - [`merchants`] - merchant CRUD with photo/document uploads
//! - [`organizations`] - organization catalog for the form

pub mod auth;
pub mod health;
pub mod merchants;
pub mod organizations;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
