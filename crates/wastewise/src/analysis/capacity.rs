use super::domain::{EquipmentProfile, PropertyProfile};
use super::metrics::{
    annual_haul_savings, capacity_utilization_pct, compactor_max_capacity_tons,
    optimal_pickup_frequency, DAYS_PER_YEAR, HAUL_FEE_MULTIPLIER, MONTHS_PER_YEAR,
    WEEKS_PER_YEAR,
};
use super::rules::thresholds::{
    FREQUENCY_HIGH_PRIORITY_UTILIZATION_PCT, FREQUENCY_OPTIMIZATION_MAX_UTILIZATION_PCT,
    FREQUENCY_TARGET_UTILIZATION_PCT,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityStatus {
    UnderUtilized,
    Acceptable,
    Optimal,
    OverUtilized,
}

impl CapacityStatus {
    pub fn classify(utilization_pct: f64) -> Self {
        if utilization_pct < 60.0 {
            Self::UnderUtilized
        } else if utilization_pct < 70.0 {
            Self::Acceptable
        } else if utilization_pct <= 85.0 {
            Self::Optimal
        } else {
            Self::OverUtilized
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UnderUtilized => "Under-utilized",
            Self::Acceptable => "Acceptable",
            Self::Optimal => "Optimal",
            Self::OverUtilized => "Over-utilized",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Compacted,
    Uncompacted,
}

impl ServiceType {
    /// Weekly yards-per-door benchmarks as (minimum, optimal, maximum).
    pub const fn benchmarks(self) -> (f64, f64, f64) {
        match self {
            Self::Compacted => (0.06, 0.09, 0.125),
            Self::Uncompacted => (0.25, 0.35, 0.50),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceLevelStatus {
    UnderServiced,
    Optimal,
    SlightlyOverServiced,
    OverServiced,
}

impl ServiceLevelStatus {
    pub fn classify(weekly_yards_per_door: f64, service_type: ServiceType) -> Self {
        let (min, optimal, max) = service_type.benchmarks();
        if weekly_yards_per_door < min {
            Self::UnderServiced
        } else if weekly_yards_per_door <= optimal {
            Self::Optimal
        } else if weekly_yards_per_door <= max {
            Self::SlightlyOverServiced
        } else {
            Self::OverServiced
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UnderServiced => "Under-serviced: increase frequency or container size",
            Self::Optimal => "Optimal: maintain current service",
            Self::SlightlyOverServiced => {
                "Slight over-service: consider a minor frequency reduction"
            }
            Self::OverServiced => "Over-serviced: reduce frequency or downsize containers",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationPriority {
    High,
    Medium,
}

impl OptimizationPriority {
    pub fn classify(utilization_pct: f64) -> Self {
        if utilization_pct < FREQUENCY_HIGH_PRIORITY_UTILIZATION_PCT {
            Self::High
        } else {
            Self::Medium
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
        }
    }
}

/// Per-haul and per-ton prices feeding the compactor cost breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompactorPricing {
    /// Haul fee before the standard fee multiplier.
    pub base_haul_fee: f64,
    pub disposal_rate_per_ton: f64,
}

/// Annual compactor spend at the current pickup schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrentHaulCosts {
    pub annual_haul_cost: f64,
    pub annual_disposal_cost: f64,
    pub total_annual_cost: f64,
}

impl CurrentHaulCosts {
    pub fn compute(
        annual_pickups: u32,
        avg_tons_per_haul: f64,
        pricing: CompactorPricing,
    ) -> Self {
        let pickups = f64::from(annual_pickups);
        let annual_haul_cost = pricing.base_haul_fee * pickups * HAUL_FEE_MULTIPLIER;
        let annual_disposal_cost = avg_tons_per_haul * pickups * pricing.disposal_rate_per_ton;
        Self {
            annual_haul_cost,
            annual_disposal_cost,
            total_annual_cost: annual_haul_cost + annual_disposal_cost,
        }
    }
}

/// A re-planned compactor pickup schedule for an under-utilized container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencyOptimization {
    pub current_pickups: u32,
    pub recommended_pickups: u32,
    pub pickup_reduction: u32,
    pub days_between_pickups: f64,
    pub optimized_utilization_pct: f64,
    pub annual_savings: f64,
    pub monthly_savings: f64,
    pub priority: OptimizationPriority,
}

/// Re-plans annual pickups so each haul reaches the target utilization.
///
/// Returns `None` unless the container runs below the optimization threshold.
pub fn optimize_pickup_frequency(
    container_size_yards: f64,
    annual_pickups: u32,
    avg_tons_per_haul: f64,
    base_haul_fee: f64,
) -> Option<FrequencyOptimization> {
    let max_capacity = compactor_max_capacity_tons(container_size_yards);
    let utilization = capacity_utilization_pct(avg_tons_per_haul, max_capacity);
    if annual_pickups == 0
        || avg_tons_per_haul <= 0.0
        || utilization >= FREQUENCY_OPTIMIZATION_MAX_UTILIZATION_PCT
    {
        return None;
    }

    let current = f64::from(annual_pickups);
    let recommended =
        optimal_pickup_frequency(current, utilization, FREQUENCY_TARGET_UTILIZATION_PCT).round()
            as u32;
    if recommended == 0 {
        return None;
    }

    let optimized = f64::from(recommended);
    let annual_tonnage = avg_tons_per_haul * current;
    let optimized_avg_tons = annual_tonnage / optimized;
    let annual_savings = annual_haul_savings(current, optimized, base_haul_fee);

    Some(FrequencyOptimization {
        current_pickups: annual_pickups,
        recommended_pickups: recommended,
        pickup_reduction: annual_pickups.saturating_sub(recommended),
        days_between_pickups: DAYS_PER_YEAR / optimized,
        optimized_utilization_pct: capacity_utilization_pct(optimized_avg_tons, max_capacity),
        annual_savings,
        monthly_savings: annual_savings / MONTHS_PER_YEAR,
        priority: OptimizationPriority::classify(utilization),
    })
}

/// Capacity and service-level benchmark for the property's primary equipment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityAssessment {
    pub service_type: ServiceType,
    pub container_size_yards: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_capacity_tons: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilization_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilization_status: Option<CapacityStatus>,
    pub weekly_yards_per_door: f64,
    pub service_level: ServiceLevelStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_costs: Option<CurrentHaulCosts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_optimization: Option<FrequencyOptimization>,
}

/// Benchmarks the compactor when its size is known, otherwise the dumpster service.
pub fn assess_capacity(
    property: &PropertyProfile,
    equipment: &EquipmentProfile,
    avg_tons_per_haul: f64,
    hauls_per_month: f64,
    pricing: CompactorPricing,
) -> Option<CapacityAssessment> {
    let units = f64::from(property.unit_count());
    if units == 0.0 {
        return None;
    }

    if property.has_compactor {
        let size = equipment.compactor_size_yards.filter(|size| *size > 0.0)?;
        let max_capacity = compactor_max_capacity_tons(size);
        let utilization = capacity_utilization_pct(avg_tons_per_haul, max_capacity);
        let annual_yards = size * hauls_per_month * MONTHS_PER_YEAR;
        let weekly_yards_per_door = annual_yards / units / WEEKS_PER_YEAR;
        let annual_pickups = (hauls_per_month * MONTHS_PER_YEAR).round() as u32;
        let current_costs = (annual_pickups > 0)
            .then(|| CurrentHaulCosts::compute(annual_pickups, avg_tons_per_haul, pricing));

        return Some(CapacityAssessment {
            service_type: ServiceType::Compacted,
            container_size_yards: size,
            max_capacity_tons: Some(max_capacity),
            utilization_pct: Some(utilization),
            utilization_status: Some(CapacityStatus::classify(utilization)),
            weekly_yards_per_door,
            service_level: ServiceLevelStatus::classify(
                weekly_yards_per_door,
                ServiceType::Compacted,
            ),
            current_costs,
            frequency_optimization: optimize_pickup_frequency(
                size,
                annual_pickups,
                avg_tons_per_haul,
                pricing.base_haul_fee,
            ),
        });
    }

    let qty = equipment.dumpster_qty.filter(|qty| *qty > 0)?;
    let size = equipment.dumpster_size_yards.filter(|size| *size > 0.0)?;
    let frequency = equipment.dumpster_freq_per_week.unwrap_or(0.0);
    let weekly_yards_per_door = f64::from(qty) * size * frequency / units;

    Some(CapacityAssessment {
        service_type: ServiceType::Uncompacted,
        container_size_yards: size,
        max_capacity_tons: None,
        utilization_pct: None,
        utilization_status: None,
        weekly_yards_per_door,
        service_level: ServiceLevelStatus::classify(
            weekly_yards_per_door,
            ServiceType::Uncompacted,
        ),
        current_costs: None,
        frequency_optimization: None,
    })
}

/// Minimum expected tons per haul for common compactor sizes.
const EXPECTED_MIN_TONS: [(f64, f64); 4] = [(10.0, 0.3), (20.0, 0.5), (30.0, 1.0), (40.0, 1.5)];

/// Flags compactor data whose tonnage looks like an uncompacted open top.
pub fn open_top_warning(container_size_yards: f64, avg_tons_per_haul: f64) -> Option<String> {
    let (closest_size, min_expected) = EXPECTED_MIN_TONS.iter().copied().min_by(|a, b| {
        (a.0 - container_size_yards)
            .abs()
            .total_cmp(&(b.0 - container_size_yards).abs())
    })?;

    if avg_tons_per_haul < min_expected * 0.6 {
        Some(format!(
            "Average tonnage ({avg_tons_per_haul:.2} tons/haul) is unusually low for a \
             {container_size_yards:.0}-yard compactor (nearest benchmark {closest_size:.0} yards \
             expects at least {min_expected:.1} tons); verify the data is not from an open top \
             container."
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::domain::{LifecycleStatus, PropertyType};

    fn property(has_compactor: bool) -> PropertyProfile {
        PropertyProfile {
            name: "Maple Court".to_string(),
            units: 200,
            property_type: PropertyType::MidRise,
            occupancy_pct: 94.0,
            status: LifecycleStatus::Stabilized,
            has_compactor,
            has_valet: false,
            location: None,
        }
    }

    fn pricing() -> CompactorPricing {
        CompactorPricing {
            base_haul_fee: 150.0,
            disposal_rate_per_ton: 60.0,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn classifies_utilization_bands() {
        assert_eq!(CapacityStatus::classify(59.9), CapacityStatus::UnderUtilized);
        assert_eq!(CapacityStatus::classify(60.0), CapacityStatus::Acceptable);
        assert_eq!(CapacityStatus::classify(70.0), CapacityStatus::Optimal);
        assert_eq!(CapacityStatus::classify(85.0), CapacityStatus::Optimal);
        assert_eq!(CapacityStatus::classify(85.1), CapacityStatus::OverUtilized);
    }

    #[test]
    fn compactor_assessment_reports_utilization() {
        let equipment = EquipmentProfile {
            compactor_size_yards: Some(30.0),
            ..EquipmentProfile::default()
        };

        let assessment =
            assess_capacity(&property(true), &equipment, 4.5, 52.0 / 12.0, pricing())
                .expect("assessed");

        assert_eq!(assessment.service_type, ServiceType::Compacted);
        let utilization = assessment.utilization_pct.expect("utilization computed");
        assert!((utilization - 4.5 / 8.7 * 100.0).abs() < 1e-9);
        assert_eq!(
            assessment.utilization_status,
            Some(CapacityStatus::UnderUtilized)
        );
        // 30 yards x 52 pickups / 200 units / 52 weeks
        assert!((assessment.weekly_yards_per_door - 0.15).abs() < 1e-9);
        assert_eq!(assessment.service_level, ServiceLevelStatus::OverServiced);
    }

    #[test]
    fn under_utilized_compactor_gets_a_pickup_plan() {
        let equipment = EquipmentProfile {
            compactor_size_yards: Some(30.0),
            ..EquipmentProfile::default()
        };

        let assessment =
            assess_capacity(&property(true), &equipment, 4.5, 52.0 / 12.0, pricing())
                .expect("assessed");

        let costs = assessment.current_costs.expect("current costs");
        assert_close(costs.annual_haul_cost, 10_842.0);
        assert_close(costs.annual_disposal_cost, 14_040.0);
        assert_close(costs.total_annual_cost, 24_882.0);

        let plan = assessment
            .frequency_optimization
            .expect("utilization below 60% is re-planned");
        assert_eq!(plan.current_pickups, 52);
        assert_eq!(plan.recommended_pickups, 36);
        assert_eq!(plan.pickup_reduction, 16);
        assert_close(plan.days_between_pickups, 365.0 / 36.0);
        assert_close(plan.optimized_utilization_pct, 6.5 / 8.7 * 100.0);
        assert_close(plan.annual_savings, 3_336.0);
        assert_close(plan.monthly_savings, 278.0);
        // 51.7% utilization sits above the high-priority band
        assert_eq!(plan.priority, OptimizationPriority::Medium);
    }

    #[test]
    fn frequency_plan_needs_low_utilization() {
        assert!(optimize_pickup_frequency(30.0, 52, 5.3, 150.0).is_none());
        assert!(optimize_pickup_frequency(30.0, 0, 4.5, 150.0).is_none());

        let plan = optimize_pickup_frequency(30.0, 52, 4.0, 150.0).expect("plan");
        assert_eq!(plan.priority, OptimizationPriority::High);
    }

    #[test]
    fn compactor_without_size_is_not_assessed() {
        let equipment = EquipmentProfile::default();
        assert!(assess_capacity(&property(true), &equipment, 4.5, 4.0, pricing()).is_none());
    }

    #[test]
    fn dumpster_assessment_uses_uncompacted_benchmarks() {
        let equipment = EquipmentProfile {
            dumpster_qty: Some(6),
            dumpster_size_yards: Some(8.0),
            dumpster_freq_per_week: Some(2.0),
            ..EquipmentProfile::default()
        };

        let assessment =
            assess_capacity(&property(false), &equipment, 0.0, 0.0, pricing()).expect("assessed");

        assert_eq!(assessment.service_type, ServiceType::Uncompacted);
        assert!((assessment.weekly_yards_per_door - 0.48).abs() < 1e-9);
        assert_eq!(
            assessment.service_level,
            ServiceLevelStatus::SlightlyOverServiced
        );
        assert!(assessment.utilization_pct.is_none());
    }

    #[test]
    fn open_top_warning_uses_nearest_size() {
        assert!(open_top_warning(30.0, 0.5).is_some());
        assert!(open_top_warning(30.0, 0.6).is_none());
        assert!(open_top_warning(34.0, 0.55).is_some());
        assert!(open_top_warning(40.0, 4.0).is_none());
    }
}
