use super::thresholds::{
    BULK_MONITOR_THRESHOLD, BULK_SUBSCRIPTION_RATE, BULK_SUBSCRIPTION_THRESHOLD,
};
use crate::analysis::domain::{Recommendation, RecommendationKind};

/// Tiered bulk-waste classifier. Always yields a recommendation; only the subscription tier
/// carries savings.
pub fn bulk_strategy(avg_monthly_bulk: f64) -> Recommendation {
    if avg_monthly_bulk > BULK_SUBSCRIPTION_THRESHOLD {
        let monthly_savings = avg_monthly_bulk - BULK_SUBSCRIPTION_RATE;
        return Recommendation::new(
            RecommendationKind::Bulk,
            "Switch to Bulk Subscription",
            format!(
                "Average bulk spend of ${avg_monthly_bulk:.2}/month exceeds \
                 ${BULK_SUBSCRIPTION_THRESHOLD:.0}; a fixed subscription at \
                 ${BULK_SUBSCRIPTION_RATE:.0}/month lowers cost."
            ),
            monthly_savings,
        );
    }

    if avg_monthly_bulk >= BULK_MONITOR_THRESHOLD {
        return Recommendation::new(
            RecommendationKind::Bulk,
            "Monitor Bulk Spend",
            format!(
                "Borderline bulk spend of ${avg_monthly_bulk:.2}/month; monitor for 3 months and \
                 prepare a subscription if the trend increases."
            ),
            0.0,
        );
    }

    Recommendation::new(
        RecommendationKind::Bulk,
        "Keep On-Demand Bulk",
        "On-demand bulk pricing remains cost-effective.",
        0.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_hundred_is_monitored() {
        let rec = bulk_strategy(500.0);
        assert_eq!(rec.title(), "Monitor Bulk Spend");
        assert_eq!(rec.annual_savings(), 0.0);
    }

    #[test]
    fn just_above_five_hundred_switches_to_subscription() {
        let rec = bulk_strategy(500.01);
        assert_eq!(rec.title(), "Switch to Bulk Subscription");
        assert!((rec.monthly_savings() - 100.01).abs() < 1e-9);
        assert!((rec.annual_savings() - 1_200.12).abs() < 1e-6);
    }

    #[test]
    fn three_hundred_is_monitored_and_below_keeps_on_demand() {
        assert_eq!(bulk_strategy(300.0).title(), "Monitor Bulk Spend");
        let rec = bulk_strategy(299.99);
        assert_eq!(rec.title(), "Keep On-Demand Bulk");
        assert_eq!(rec.monthly_savings(), 0.0);
    }
}
