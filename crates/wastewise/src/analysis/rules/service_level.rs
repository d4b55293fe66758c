use super::thresholds::{SERVICE_NEAR_CAPACITY_TONS, SERVICE_UNDERUTILIZED_TONS};
use crate::analysis::domain::Financials;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceGuidance {
    AddressDataQuality,
    AddServiceDay,
    ReducePickupFrequency,
    MaintainCurrentService,
}

impl ServiceGuidance {
    pub const fn label(self) -> &'static str {
        match self {
            Self::AddressDataQuality => "Address contamination/overages before any reduction.",
            Self::AddServiceDay => "Add service day (compactor near capacity).",
            Self::ReducePickupFrequency => "Reduce pickup frequency (underutilized).",
            Self::MaintainCurrentService => "Maintain current service.",
        }
    }
}

/// Ordered decision table; the first matching branch wins.
pub fn service_level(financials: &Financials, contamination_or_overages: bool) -> ServiceGuidance {
    let tons = financials.avg_tons_per_haul;

    if contamination_or_overages && tons < SERVICE_UNDERUTILIZED_TONS {
        return ServiceGuidance::AddressDataQuality;
    }

    if tons >= SERVICE_NEAR_CAPACITY_TONS && financials.overages_present {
        ServiceGuidance::AddServiceDay
    } else if tons < SERVICE_UNDERUTILIZED_TONS && !financials.overages_present {
        ServiceGuidance::ReducePickupFrequency
    } else {
        ServiceGuidance::MaintainCurrentService
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn financials(avg_tons_per_haul: f64, overages_present: bool, contamination: f64) -> Financials {
        Financials {
            avg_tons_per_haul,
            overages_present,
            contamination_charges: contamination,
            ..Financials::default()
        }
    }

    fn guidance_for(financials: &Financials) -> ServiceGuidance {
        let flag = financials.overages_present || financials.contamination_charges > 0.0;
        service_level(financials, flag)
    }

    #[test]
    fn light_hauls_without_issues_reduce_frequency() {
        let guidance = guidance_for(&financials(5.0, false, 0.0));
        assert_eq!(guidance, ServiceGuidance::ReducePickupFrequency);
        assert_eq!(guidance.label(), "Reduce pickup frequency (underutilized).");
    }

    #[test]
    fn heavy_hauls_with_overages_add_service_regardless_of_contamination() {
        for contamination in [0.0, 250.0] {
            let guidance = guidance_for(&financials(9.0, true, contamination));
            assert_eq!(guidance.label(), "Add service day (compactor near capacity).");
        }
    }

    #[test]
    fn data_quality_dominates_light_hauls() {
        assert_eq!(
            guidance_for(&financials(5.0, true, 0.0)),
            ServiceGuidance::AddressDataQuality
        );
        assert_eq!(
            guidance_for(&financials(5.9, false, 40.0)),
            ServiceGuidance::AddressDataQuality
        );
    }

    #[test]
    fn mid_range_and_heavy_without_overages_maintain() {
        assert_eq!(
            guidance_for(&financials(6.0, true, 10.0)),
            ServiceGuidance::MaintainCurrentService
        );
        assert_eq!(
            guidance_for(&financials(7.99, false, 0.0)),
            ServiceGuidance::MaintainCurrentService
        );
        assert_eq!(
            guidance_for(&financials(8.5, false, 0.0)),
            ServiceGuidance::MaintainCurrentService
        );
    }
}
