use super::thresholds::{
    COMPACTOR_MAX_DAYS_BETWEEN_PICKUPS, COMPACTOR_MAX_TONS_PER_HAUL,
    COMPACTOR_MIN_MONTHLY_SAVINGS, TARGET_TONS_PER_HAUL,
};
use crate::analysis::domain::{EquipmentProfile, Financials, Recommendation, RecommendationKind};
use serde::{Deserialize, Serialize};

/// Monthly cost of a compactor monitoring program.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonitoringCosts {
    pub install_cost: f64,
    pub monitoring_cost: f64,
}

impl MonitoringCosts {
    pub fn monthly_total(&self) -> f64 {
        self.install_cost + self.monitoring_cost
    }
}

/// Recommends compactor monitors when hauls run light and the savings cover the program.
///
/// `monthly_pickup_savings` is the pickup-fee savings from the haul-reduction projection.
pub fn compactor_optimization(
    equipment: &EquipmentProfile,
    financials: &Financials,
    monthly_pickup_savings: f64,
    costs: MonitoringCosts,
) -> Option<Recommendation> {
    if financials.avg_tons_per_haul >= COMPACTOR_MAX_TONS_PER_HAUL {
        return None;
    }

    if equipment
        .max_days_between_pickups
        .is_some_and(|days| days > COMPACTOR_MAX_DAYS_BETWEEN_PICKUPS)
    {
        return None;
    }

    if monthly_pickup_savings < COMPACTOR_MIN_MONTHLY_SAVINGS {
        return None;
    }

    let net_monthly = monthly_pickup_savings - costs.monthly_total();
    if net_monthly <= 0.0 {
        return None;
    }

    Some(Recommendation::new(
        RecommendationKind::CompactorMonitoring,
        "Add Compactor Monitors",
        format!(
            "Average {:.2} tons/haul is below {COMPACTOR_MAX_TONS_PER_HAUL:.0} with pickups at most \
             {COMPACTOR_MAX_DAYS_BETWEEN_PICKUPS} days apart; fullness monitors target \
             {TARGET_TONS_PER_HAUL:.0}-9 tons/haul. Projected pickup savings of \
             ${monthly_pickup_savings:.2}/month less ${:.2}/month program cost.",
            financials.avg_tons_per_haul,
            costs.monthly_total(),
        ),
        net_monthly,
    ))
}
