//! Unit conversions and per-door metrics.
//!
//! Every ratio resolves to `0.0` when its denominator is zero so that an incomplete
//! profile degrades to a zero metric instead of aborting the run.

use super::domain::{LifecycleStatus, PropertyProfile};
use serde::{Deserialize, Serialize};

/// Compacted cubic yards per ton.
pub const COMPACTOR_YARDS_PER_TON: f64 = 14.49;
pub const POUNDS_PER_TON: f64 = 2000.0;
/// Compacted density used by the alternate conversion, in pounds per cubic yard.
pub const COMPACTED_POUNDS_PER_YARD: f64 = 138.0;
/// Average weeks per month.
pub const WEEKS_PER_MONTH: f64 = 4.33;
pub const MONTHS_PER_YEAR: f64 = 12.0;
pub const WEEKS_PER_YEAR: f64 = 52.0;
/// Rated payload density of a compactor container, in pounds per cubic yard.
pub const CONTAINER_POUNDS_PER_YARD: f64 = 580.0;
pub const LOOSE_YARDS_PER_TON: f64 = 3.448;
pub const DAYS_PER_YEAR: f64 = 365.0;
/// Fuel, environmental and tax charges stacked on a base haul fee.
pub const HAUL_FEE_MULTIPLIER: f64 = 1.39;

/// Selects which compactor tonnage-to-yards conversion feeds the yards-per-door metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YardsConversion {
    #[default]
    Standard,
    Density,
}

impl YardsConversion {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "standard" | "14.49" => Some(Self::Standard),
            "density" | "alt" | "alternate" => Some(Self::Density),
            _ => None,
        }
    }

    pub fn yards_per_door(self, total_tons: f64, units: u32) -> f64 {
        match self {
            Self::Standard => yards_per_door_compactor(total_tons, units),
            Self::Density => yards_per_door_compactor_alt(total_tons, units),
        }
    }
}

pub fn yards_per_door_compactor(total_tons: f64, units: u32) -> f64 {
    if units == 0 {
        return 0.0;
    }
    total_tons * COMPACTOR_YARDS_PER_TON / f64::from(units)
}

pub fn yards_per_door_compactor_alt(total_tons: f64, units: u32) -> f64 {
    if units == 0 {
        return 0.0;
    }
    (total_tons * POUNDS_PER_TON / COMPACTED_POUNDS_PER_YARD) / f64::from(units)
}

pub fn yards_per_door_dumpster(qty: u32, size_yards: f64, weekly_freq: f64, units: u32) -> f64 {
    if units == 0 {
        return 0.0;
    }
    f64::from(qty) * size_yards * weekly_freq * WEEKS_PER_MONTH / f64::from(units)
}

pub fn cost_per_door(monthly_cost: f64, units: u32) -> f64 {
    if units == 0 {
        return 0.0;
    }
    monthly_cost / f64::from(units)
}

pub fn annual_savings(monthly_savings: f64) -> f64 {
    monthly_savings * MONTHS_PER_YEAR
}

/// Scales a lease-up property's current spend to the target occupancy.
pub fn lease_up_budget_projection(
    profile: &PropertyProfile,
    current_cost: f64,
    target_occupancy_pct: f64,
) -> f64 {
    if profile.status != LifecycleStatus::LeaseUp || profile.occupancy_pct <= 0.0 {
        return current_cost;
    }
    current_cost / profile.occupancy_pct * target_occupancy_pct
}

pub fn compactor_max_capacity_tons(size_yards: f64) -> f64 {
    size_yards * CONTAINER_POUNDS_PER_YARD / POUNDS_PER_TON
}

pub fn capacity_utilization_pct(avg_tons: f64, max_capacity_tons: f64) -> f64 {
    if max_capacity_tons <= 0.0 {
        return 0.0;
    }
    avg_tons / max_capacity_tons * 100.0
}

/// Pickups per period that would bring utilization to `target_utilization_pct`.
pub fn optimal_pickup_frequency(
    current_pickups: f64,
    current_utilization_pct: f64,
    target_utilization_pct: f64,
) -> f64 {
    ratio(current_pickups * current_utilization_pct, target_utilization_pct)
}

/// Annual haul spend saved by moving from `current_pickups` to `optimized_pickups` per year.
pub fn annual_haul_savings(
    current_pickups: f64,
    optimized_pickups: f64,
    base_haul_fee: f64,
) -> f64 {
    let current = base_haul_fee * current_pickups * HAUL_FEE_MULTIPLIER;
    let optimized = base_haul_fee * optimized_pickups * HAUL_FEE_MULTIPLIER;
    current - optimized
}

pub fn tons_to_yards(tons: f64) -> f64 {
    tons * LOOSE_YARDS_PER_TON
}

pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::domain::PropertyType;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn lease_up_profile(occupancy_pct: f64) -> PropertyProfile {
        PropertyProfile {
            name: "Cedar Flats".to_string(),
            units: 200,
            property_type: PropertyType::Garden,
            occupancy_pct,
            status: LifecycleStatus::LeaseUp,
            has_compactor: true,
            has_valet: false,
            location: None,
        }
    }

    #[test]
    fn cost_per_door_divides_by_units() {
        for units in [1, 7, 250, 1200] {
            assert_close(cost_per_door(12_000.0, units), 12_000.0 / f64::from(units));
        }
        assert_eq!(cost_per_door(12_000.0, 0), 0.0);
    }

    #[test]
    fn compactor_conversions_are_both_available() {
        assert_close(yards_per_door_compactor(100.0, 250), 100.0 * 14.49 / 250.0);
        assert_close(
            yards_per_door_compactor_alt(100.0, 250),
            (100.0 * 2000.0 / 138.0) / 250.0,
        );
        assert_close(
            YardsConversion::Density.yards_per_door(100.0, 250),
            yards_per_door_compactor_alt(100.0, 250),
        );
        assert_eq!(yards_per_door_compactor(100.0, 0), 0.0);
        assert_eq!(yards_per_door_compactor_alt(100.0, 0), 0.0);
    }

    #[test]
    fn dumpster_yards_use_weeks_per_month() {
        assert_close(
            yards_per_door_dumpster(4, 8.0, 3.0, 120),
            4.0 * 8.0 * 3.0 * 4.33 / 120.0,
        );
        assert_eq!(yards_per_door_dumpster(4, 8.0, 3.0, 0), 0.0);
    }

    #[test]
    fn pickup_frequency_scales_to_target_utilization() {
        assert_close(optimal_pickup_frequency(52.0, 60.0, 75.0), 41.6);
        assert_eq!(optimal_pickup_frequency(52.0, 60.0, 0.0), 0.0);
        // 16 fewer pulls at $150 base plus 39% in fees
        assert_close(annual_haul_savings(52.0, 36.0, 150.0), 16.0 * 150.0 * 1.39);
    }

    #[test]
    fn lease_up_projection_scales_to_target_occupancy() {
        assert_close(
            lease_up_budget_projection(&lease_up_profile(60.0), 6_000.0, 95.0),
            9_500.0,
        );
        assert_eq!(
            lease_up_budget_projection(&lease_up_profile(0.0), 6_000.0, 95.0),
            6_000.0
        );

        let mut stabilized = lease_up_profile(60.0);
        stabilized.status = LifecycleStatus::Stabilized;
        assert_eq!(lease_up_budget_projection(&stabilized, 6_000.0, 95.0), 6_000.0);
    }

    #[test]
    fn capacity_helpers_guard_zero_capacity() {
        assert_close(compactor_max_capacity_tons(30.0), 8.7);
        assert_close(capacity_utilization_pct(4.35, 8.7), 50.0);
        assert_eq!(capacity_utilization_pct(4.0, 0.0), 0.0);
        assert_close(tons_to_yards(10.0), 34.48);
    }

    #[test]
    fn yards_conversion_parses_config_values() {
        assert_eq!(YardsConversion::parse("Density"), Some(YardsConversion::Density));
        assert_eq!(YardsConversion::parse("standard"), Some(YardsConversion::Standard));
        assert_eq!(YardsConversion::parse("cubic"), None);
    }
}
