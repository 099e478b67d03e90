//! Dashboard metrics
//!
//! Aggregation happens client-side: the dashboard fetches the full
//! merchant set once and derives every figure from it.

use std::collections::BTreeMap;

use shared::{Merchant, MerchantStatus};

/// Metrics shown on the coordinator dashboard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardMetrics {
    pub total: usize,
    pub en_regla: usize,
    pub en_observacion: usize,
    pub irregular: usize,
    /// Merchant count per delegation, sorted by name
    pub by_delegation: BTreeMap<String, usize>,
    /// How many merchants the map view can actually plot
    pub mappable: usize,
}

impl DashboardMetrics {
    pub fn from_merchants(merchants: &[Merchant]) -> Self {
        let mut metrics = Self {
            total: merchants.len(),
            ..Self::default()
        };

        for merchant in merchants {
            match merchant.status {
                MerchantStatus::EnRegla => metrics.en_regla += 1,
                MerchantStatus::EnObservacion => metrics.en_observacion += 1,
                MerchantStatus::Irregular => metrics.irregular += 1,
            }

            *metrics
                .by_delegation
                .entry(merchant.delegation.clone())
                .or_insert(0) += 1;

            if merchant.has_valid_location() {
                metrics.mappable += 1;
            }
        }

        metrics
    }

    /// Share of merchants in good standing, as a percentage
    pub fn compliance_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.en_regla as f64 / self.total as f64 * 100.0
    }
}
