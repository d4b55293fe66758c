use super::metrics::YardsConversion;
use super::rules::{MonitoringCosts, OverageFrequency};
use serde::{Deserialize, Serialize};

/// Defaults applied to every analysis unless a payload overrides them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub install_cost: f64,
    pub monitoring_cost: f64,
    pub yards_conversion: YardsConversion,
    pub target_occupancy_pct: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            install_cost: 200.0,
            monitoring_cost: 50.0,
            yards_conversion: YardsConversion::Standard,
            target_occupancy_pct: 95.0,
        }
    }
}

/// Per-payload overrides. Absent fields fall back to [`AnalysisSettings`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    #[serde(default)]
    pub install_cost: Option<f64>,
    #[serde(default)]
    pub monitoring_cost: Option<f64>,
    /// Monthly cost of one permanent added service day.
    #[serde(default)]
    pub extra_service_cost: Option<f64>,
    #[serde(default)]
    pub overage_frequency: Option<OverageFrequency>,
    #[serde(default)]
    pub yards_conversion: Option<YardsConversion>,
    #[serde(default)]
    pub target_occupancy_pct: Option<f64>,
    /// Compactor haul fee before surcharges; derived from invoiced pickups when absent.
    #[serde(default)]
    pub base_haul_fee: Option<f64>,
    /// Derived from invoiced disposal and hauled tonnage when absent.
    #[serde(default)]
    pub disposal_rate_per_ton: Option<f64>,
}

/// Settings after payload overrides were applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ResolvedSettings {
    pub(crate) monitoring: MonitoringCosts,
    pub(crate) extra_service_cost: Option<f64>,
    pub(crate) overage_frequency: Option<OverageFrequency>,
    pub(crate) yards_conversion: YardsConversion,
    pub(crate) target_occupancy_pct: f64,
    pub(crate) base_haul_fee: Option<f64>,
    pub(crate) disposal_rate_per_ton: Option<f64>,
}

impl AnalysisSettings {
    pub(crate) fn resolve(&self, options: &AnalysisOptions) -> ResolvedSettings {
        ResolvedSettings {
            monitoring: MonitoringCosts {
                install_cost: options.install_cost.unwrap_or(self.install_cost),
                monitoring_cost: options.monitoring_cost.unwrap_or(self.monitoring_cost),
            },
            extra_service_cost: options.extra_service_cost,
            overage_frequency: options.overage_frequency,
            yards_conversion: options.yards_conversion.unwrap_or(self.yards_conversion),
            target_occupancy_pct: options
                .target_occupancy_pct
                .unwrap_or(self.target_occupancy_pct),
            base_haul_fee: options.base_haul_fee,
            disposal_rate_per_ton: options.disposal_rate_per_ton,
        }
    }
}
