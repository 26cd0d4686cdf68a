use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Estimated savings attributed to one activity, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImpactResult {
    pub co2_saved: f64,
    pub water_conserved: f64,
}

impl ImpactResult {
    pub const ZERO: Self = Self {
        co2_saved: 0.0,
        water_conserved: 0.0,
    };

    #[must_use]
    pub const fn new(co2_saved: f64, water_conserved: f64) -> Self {
        Self {
            co2_saved,
            water_conserved,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryTotals {
    pub activity_count: u64,
    pub co2_saved: f64,
    pub water_conserved: f64,
}

/// Dashboard totals over a set of activities.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImpactSummary {
    pub activity_count: u64,
    pub co2_saved: f64,
    pub water_conserved: f64,
    #[serde(default)]
    pub by_category: BTreeMap<String, CategoryTotals>,
}
