//! Organization Model

use serde::{Deserialize, Serialize};

/// Merchant organization ("unión", "tianguis", market association)
///
/// Used as a catalog in the registration form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// "activa" | "inactiva"
    #[serde(default)]
    pub status: Option<String>,
}
