//! Merchant Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Document;

/// Registration status of a merchant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MerchantStatus {
    /// Newly registered, pending review
    #[serde(rename = "en-observacion")]
    EnObservacion,
    /// Fully compliant
    #[serde(rename = "en-regla")]
    EnRegla,
    /// Non-compliant
    #[serde(rename = "irregular")]
    Irregular,
}

impl MerchantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MerchantStatus::EnObservacion => "en-observacion",
            MerchantStatus::EnRegla => "en-regla",
            MerchantStatus::Irregular => "irregular",
        }
    }
}

/// Type of stall a merchant operates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandType {
    Semifijo,
    Fijo,
    Rotativo,
}

impl Default for StandType {
    fn default() -> Self {
        StandType::Semifijo
    }
}

/// Merchant entity as stored in the `merchants` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Merchant {
    pub id: String,
    pub name: String,
    /// Line of business ("giro")
    pub business: String,
    pub address: String,
    #[serde(default)]
    pub address_references: Option<String>,
    /// Municipal delegation the stall belongs to
    pub delegation: String,

    // Location (6-decimal convention, ~0.1m precision)
    pub latitude: f64,
    pub longitude: f64,

    // Operating schedule
    pub schedule_start: String,
    pub schedule_end: String,
    /// Spanish day names, e.g. ["lunes", "martes"]
    #[serde(default)]
    pub operating_days: Vec<String>,

    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub stand_type: StandType,
    pub status: MerchantStatus,

    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub stall_photo_url: Option<String>,

    /// Inspector (auth user id) who registered this merchant
    #[serde(default)]
    pub registered_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Embedded relation, populated only by `GET /api/merchants/:id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<Document>>,
}

impl Merchant {
    /// Whether the merchant has coordinates a map view can plot
    pub fn has_valid_location(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
            && (self.latitude != 0.0 || self.longitude != 0.0)
    }
}
