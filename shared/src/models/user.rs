//! User Model

use serde::{Deserialize, Serialize};

/// User role, stored in the `users` table alongside the provider's auth id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Field user: registers and inspects merchants
    Inspector,
    /// Aggregate-view user: dashboard and reporting
    Coordinator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Inspector => "inspector",
            Role::Coordinator => "coordinator",
        }
    }
}

/// User information returned by the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub name: String,
}
