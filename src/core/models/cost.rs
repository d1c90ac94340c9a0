use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One day's cost delta for the whole account and for each tracked service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub total: f64,
    /// `total` minus the tracked services. Can be negative when the
    /// per-service readings run ahead of the account total.
    pub other: f64,
    pub services: HashMap<String, f64>,
}

impl CostBreakdown {
    pub fn new(total: f64, services: HashMap<String, f64>) -> Self {
        let tracked: f64 = services.values().sum();
        Self {
            total,
            other: total - tracked,
            services,
        }
    }

    /// Services ordered by cost descending, ties by name ascending.
    pub fn sorted_services(&self) -> Vec<(&str, f64)> {
        let mut list: Vec<(&str, f64)> = self
            .services
            .iter()
            .map(|(name, cost)| (name.as_str(), *cost))
            .collect();
        list.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        list
    }
}
