//! Document Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supporting document attached to a merchant (license scan, permit, etc.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub merchant_id: String,
    /// Original filename
    #[serde(default)]
    pub name: Option<String>,
    /// Public URL in the provider's object store
    pub file_url: String,
    /// "pdf" | "imagen" | "general"
    #[serde(default)]
    pub document_type: Option<String>,
    /// Size in bytes, if known
    #[serde(default)]
    pub file_size: Option<i64>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}
