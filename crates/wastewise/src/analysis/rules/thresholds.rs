//! Calibration constants shared by the rule evaluators and the pipeline.
//!
//! These are domain calibration values, not runtime settings. Changing one shifts the
//! boundary of every rule that reads it.

/// Average tons per haul at or above which a compactor is already near target utilization.
pub const COMPACTOR_MAX_TONS_PER_HAUL: f64 = 7.0;

/// Longest allowed interval between compactor pickups before frequency cannot be reduced.
pub const COMPACTOR_MAX_DAYS_BETWEEN_PICKUPS: u32 = 14;

/// Projected monthly pickup savings below which monitoring is not worth installing.
pub const COMPACTOR_MIN_MONTHLY_SAVINGS: f64 = 300.0;

/// Utilization target used by the haul-reduction projection.
pub const TARGET_TONS_PER_HAUL: f64 = 8.0;

/// Contamination rate (percent of spend) at or below which no action is taken.
pub const CONTAMINATION_ACTION_RATE_PCT: f64 = 3.0;

/// Contamination rate (percent of spend) above which full remediation is considered.
pub const CONTAMINATION_FULL_RATE_PCT: f64 = 5.0;

/// Monthly contamination charges that must be exceeded for full remediation.
pub const CONTAMINATION_FULL_MIN_CHARGES: f64 = 150.0;

pub const CONTAMINATION_FULL_REDUCTION: f64 = 0.5;
pub const CONTAMINATION_LIGHT_REDUCTION: f64 = 0.25;

/// One-time signage ($500) and resident education ($300) cost of a full program.
pub const CONTAMINATION_PROGRAM_SETUP_COST: f64 = 800.0;

/// Average monthly bulk spend above which a subscription is recommended.
pub const BULK_SUBSCRIPTION_THRESHOLD: f64 = 500.0;

/// Average monthly bulk spend from which spend is monitored.
pub const BULK_MONITOR_THRESHOLD: f64 = 300.0;

/// Monthly price of a fixed bulk pickup subscription.
pub const BULK_SUBSCRIPTION_RATE: f64 = 400.0;

/// Tons per haul below which a compactor is considered underutilized.
pub const SERVICE_UNDERUTILIZED_TONS: f64 = 6.0;

/// Tons per haul at or above which a compactor is considered near capacity.
pub const SERVICE_NEAR_CAPACITY_TONS: f64 = 8.0;

/// Share of invoice months carrying overages for the pattern to count as consistent.
pub const CONSISTENT_OVERAGE_SHARE: f64 = 0.75;

/// Occupancy at or above which a lease-up status is inconsistent.
pub const LEASE_UP_MAX_OCCUPANCY_PCT: f64 = 90.0;

/// Compactor utilization below which the pickup schedule is re-planned.
pub const FREQUENCY_OPTIMIZATION_MAX_UTILIZATION_PCT: f64 = 60.0;

/// Utilization the re-planned pickup schedule aims for.
pub const FREQUENCY_TARGET_UTILIZATION_PCT: f64 = 75.0;

/// Utilization below which a schedule change is high priority.
pub const FREQUENCY_HIGH_PRIORITY_UTILIZATION_PCT: f64 = 50.0;
