use super::thresholds::CONSISTENT_OVERAGE_SHARE;
use crate::analysis::domain::Financials;
use crate::analysis::metrics::annual_savings;
use serde::{Deserialize, Deserializer, Serialize};

/// How often overage charges show up on invoices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverageFrequency {
    Consistent,
    Seasonal,
    /// Any pattern other than consistent or seasonal.
    Sporadic,
}

impl<'de> Deserialize<'de> for OverageFrequency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

impl OverageFrequency {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "consistent" => Self::Consistent,
            "seasonal" => Self::Seasonal,
            _ => Self::Sporadic,
        }
    }

    /// Classifies from the number of invoice months carrying overage charges.
    pub fn classify(months_with_overage: usize, months: usize) -> Self {
        if months == 0 || months_with_overage == 0 {
            return Self::Sporadic;
        }

        let share = months_with_overage as f64 / months as f64;
        if share >= CONSISTENT_OVERAGE_SHARE {
            Self::Consistent
        } else {
            Self::Seasonal
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Consistent => "Consistent",
            Self::Seasonal => "Seasonal",
            Self::Sporadic => "Sporadic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverageStrategy {
    AddPermanentService,
    KeepPayingOverages,
    SeasonalService,
    InvestigateOperations,
}

impl OverageStrategy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::AddPermanentService => "Add permanent service day; cheaper than overages.",
            Self::KeepPayingOverages => "Overages cheaper than added service; keep status quo.",
            Self::SeasonalService => "Add seasonal service only during peak months.",
            Self::InvestigateOperations => {
                "Investigate operations (valet distribution, compliance); consider larger equipment if needed."
            }
        }
    }
}

/// Guidance from the overage advisor together with the annualized figures it compared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverageAdvice {
    pub frequency: OverageFrequency,
    pub strategy: OverageStrategy,
    pub strategy_label: &'static str,
    pub annual_overage_cost: f64,
    pub annual_added_service_cost: f64,
}

/// Compares overages against a permanent added service day (`extra_service_cost` per month).
pub fn overage_strategy(
    financials: &Financials,
    frequency: OverageFrequency,
    extra_service_cost: f64,
) -> OverageAdvice {
    let annual_overage_cost = annual_savings(financials.avg_monthly_overage);
    let annual_added_service_cost = annual_savings(extra_service_cost);

    let strategy = match frequency {
        OverageFrequency::Consistent if annual_added_service_cost < annual_overage_cost => {
            OverageStrategy::AddPermanentService
        }
        OverageFrequency::Consistent => OverageStrategy::KeepPayingOverages,
        OverageFrequency::Seasonal => OverageStrategy::SeasonalService,
        OverageFrequency::Sporadic => OverageStrategy::InvestigateOperations,
    };

    OverageAdvice {
        frequency,
        strategy,
        strategy_label: strategy.label(),
        annual_overage_cost,
        annual_added_service_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn financials(avg_monthly_overage: f64) -> Financials {
        Financials {
            avg_monthly_overage,
            overages_present: avg_monthly_overage > 0.0,
            ..Financials::default()
        }
    }

    #[test]
    fn consistent_overages_pick_the_cheaper_option() {
        let advice = overage_strategy(&financials(600.0), OverageFrequency::Consistent, 450.0);
        assert_eq!(advice.strategy, OverageStrategy::AddPermanentService);
        assert_eq!(advice.annual_overage_cost, 7_200.0);
        assert_eq!(advice.annual_added_service_cost, 5_400.0);

        let advice = overage_strategy(&financials(300.0), OverageFrequency::Consistent, 450.0);
        assert_eq!(advice.strategy, OverageStrategy::KeepPayingOverages);

        let advice = overage_strategy(&financials(450.0), OverageFrequency::Consistent, 450.0);
        assert_eq!(advice.strategy, OverageStrategy::KeepPayingOverages);
    }

    #[test]
    fn seasonal_and_other_patterns_ignore_costs() {
        let advice = overage_strategy(&financials(50.0), OverageFrequency::Seasonal, 10_000.0);
        assert_eq!(advice.strategy, OverageStrategy::SeasonalService);
        assert_eq!(
            advice.strategy_label,
            "Add seasonal service only during peak months."
        );

        let advice = overage_strategy(&financials(900.0), OverageFrequency::Sporadic, 1.0);
        assert_eq!(advice.strategy, OverageStrategy::InvestigateOperations);
    }

    #[test]
    fn frequency_classification_uses_share_of_months() {
        assert_eq!(OverageFrequency::classify(9, 12), OverageFrequency::Consistent);
        assert_eq!(OverageFrequency::classify(8, 12), OverageFrequency::Seasonal);
        assert_eq!(OverageFrequency::classify(0, 12), OverageFrequency::Sporadic);
        assert_eq!(OverageFrequency::classify(0, 0), OverageFrequency::Sporadic);
    }

    #[test]
    fn unknown_frequency_strings_fall_back_to_sporadic() {
        for raw in ["\"other\"", "\"rare\"", "\"monthly\"", "\"\""] {
            let frequency: OverageFrequency =
                serde_json::from_str(raw).expect("any string parses");
            assert_eq!(frequency, OverageFrequency::Sporadic, "{raw}");
        }

        let frequency: OverageFrequency =
            serde_json::from_str("\" Seasonal \"").expect("known value parses");
        assert_eq!(frequency, OverageFrequency::Seasonal);
    }
}
