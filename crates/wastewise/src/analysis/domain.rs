use super::dates::{deserialize_day, deserialize_month, deserialize_optional_day, month_label};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    #[serde(alias = "garden_style")]
    Garden,
    #[serde(alias = "mid_rise")]
    MidRise,
    #[serde(alias = "high_rise")]
    HighRise,
    #[serde(alias = "mixed_use")]
    MixedUse,
}

impl PropertyType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Garden => "Garden",
            Self::MidRise => "Mid-Rise",
            Self::HighRise => "High-Rise",
            Self::MixedUse => "Mixed-Use",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifecycleStatus {
    #[serde(alias = "lease_up")]
    LeaseUp,
    Stabilized,
    #[serde(alias = "value_add", alias = "renovation")]
    ValueAdd,
}

impl LifecycleStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::LeaseUp => "Lease-Up",
            Self::Stabilized => "Stabilized",
            Self::ValueAdd => "Value-Add / Renovation",
        }
    }
}

/// Identity and operating context of the property under analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyProfile {
    #[serde(default)]
    pub name: String,
    /// Signed so a negative or missing count reaches validation instead of failing to parse.
    #[serde(default)]
    pub units: i64,
    pub property_type: PropertyType,
    pub occupancy_pct: f64,
    pub status: LifecycleStatus,
    #[serde(default)]
    pub has_compactor: bool,
    #[serde(default)]
    pub has_valet: bool,
    #[serde(default)]
    pub location: Option<String>,
}

impl PropertyProfile {
    /// Unit count for per-door math; non-positive counts resolve to 0.
    pub fn unit_count(&self) -> u32 {
        u32::try_from(self.units).unwrap_or(0)
    }
}

/// Physical waste equipment on site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentProfile {
    /// Reference monthly tonnage for the compactor when no haul log is available.
    #[serde(default)]
    pub compactor_tons: Option<f64>,
    #[serde(default)]
    pub compactor_size_yards: Option<f64>,
    #[serde(default, alias = "compactor_max_days_between_pickups")]
    pub max_days_between_pickups: Option<u32>,
    #[serde(default)]
    pub dumpster_qty: Option<u32>,
    #[serde(default)]
    pub dumpster_size_yards: Option<f64>,
    #[serde(default)]
    pub dumpster_freq_per_week: Option<f64>,
    #[serde(default)]
    pub dual_compactors: bool,
}

/// Monthly aggregates derived once per analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Financials {
    pub monthly_cost: f64,
    pub pickup_cost_per_haul: f64,
    pub contamination_charges: f64,
    pub bulk_charges: f64,
    pub avg_monthly_overage: f64,
    pub avg_tons_per_haul: f64,
    pub overages_present: bool,
}

/// One billing period's itemized charges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceEntry {
    #[serde(deserialize_with = "deserialize_month")]
    pub month: NaiveDate,
    pub invoice_number: String,
    #[serde(default)]
    pub hauler: Option<String>,
    #[serde(default, alias = "pickup")]
    pub pickup_fees: f64,
    #[serde(default)]
    pub disposal: f64,
    #[serde(default)]
    pub rental: f64,
    #[serde(default)]
    pub contamination: f64,
    #[serde(default)]
    pub bulk: f64,
    #[serde(default)]
    pub overage: f64,
    #[serde(default)]
    pub other: f64,
    #[serde(default)]
    pub units: Option<u32>,
    #[serde(default)]
    pub equipment_type: Option<String>,
}

impl InvoiceEntry {
    pub fn total(&self) -> f64 {
        self.pickup_fees
            + self.disposal
            + self.rental
            + self.contamination
            + self.bulk
            + self.overage
            + self.other
    }

    pub fn month_label(&self) -> String {
        month_label(self.month)
    }
}

/// A single pickup event from the hauler's log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HaulEntry {
    #[serde(deserialize_with = "deserialize_day")]
    pub date: NaiveDate,
    pub tons: f64,
    #[serde(default)]
    pub ticket: Option<String>,
    #[serde(default)]
    pub equipment: Option<String>,
}

/// Contract metadata. `provided` is false for the placeholder used when no contract was supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractInfo {
    #[serde(default = "contract_provided")]
    pub provided: bool,
    #[serde(default)]
    pub hauler: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_day")]
    pub effective_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_day")]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub renewal_terms: Option<String>,
    #[serde(default)]
    pub termination_terms: Option<String>,
    #[serde(default)]
    pub liability: Option<String>,
    #[serde(default)]
    pub force_majeure: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

fn contract_provided() -> bool {
    true
}

impl ContractInfo {
    pub fn not_provided() -> Self {
        Self::default()
    }

    /// Labelled terms in display order, skipping anything absent.
    pub fn terms(&self) -> Vec<(&'static str, String)> {
        let mut terms = Vec::new();
        if let Some(hauler) = &self.hauler {
            terms.push(("Hauler", hauler.clone()));
        }
        if let Some(date) = self.effective_date {
            terms.push(("Effective Date", date.format("%m/%d/%Y").to_string()));
        }
        if let Some(date) = self.expiration_date {
            terms.push(("Expiration Date", date.format("%m/%d/%Y").to_string()));
        }

        let text_terms = [
            ("Renewal Terms", &self.renewal_terms),
            ("Termination Terms", &self.termination_terms),
            ("Liability", &self.liability),
            ("Force Majeure", &self.force_majeure),
            ("Contract Notes", &self.text),
        ];
        for (label, value) in text_terms {
            if let Some(value) = value.as_deref().filter(|value| !value.trim().is_empty()) {
                terms.push((label, value.trim().to_string()));
            }
        }

        terms
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    CompactorMonitoring,
    Contamination,
    Bulk,
}

impl RecommendationKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::CompactorMonitoring => "Compactor Monitoring",
            Self::Contamination => "Contamination",
            Self::Bulk => "Bulk Waste",
        }
    }
}

/// One actionable output of a rule. Annual savings are always twelve times the monthly figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    kind: RecommendationKind,
    title: String,
    detail: String,
    monthly_savings: f64,
    annual_savings: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    payback_months: Option<f64>,
}

impl Recommendation {
    pub fn new(
        kind: RecommendationKind,
        title: impl Into<String>,
        detail: impl Into<String>,
        monthly_savings: f64,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            detail: detail.into(),
            monthly_savings,
            annual_savings: super::metrics::annual_savings(monthly_savings),
            payback_months: None,
        }
    }

    pub fn with_payback(mut self, months: f64) -> Self {
        self.payback_months = Some(months);
        self
    }

    pub fn kind(&self) -> RecommendationKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn monthly_savings(&self) -> f64 {
        self.monthly_savings
    }

    pub fn annual_savings(&self) -> f64 {
        self.annual_savings
    }

    pub fn payback_months(&self) -> Option<f64> {
        self.payback_months
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommendation_annualizes_monthly_savings() {
        let rec = Recommendation::new(RecommendationKind::Bulk, "Bulk", "detail", 125.5);
        assert_eq!(rec.annual_savings(), 1506.0);
        assert!(rec.payback_months().is_none());
    }

    #[test]
    fn invoice_accepts_slash_months_and_sums_charges() {
        let invoice: InvoiceEntry = serde_json::from_str(
            r#"{"month":"02/2025","invoice_number":"INV-7","pickup_fees":100,"disposal":50,"bulk":25.5}"#,
        )
        .expect("invoice parses");

        assert_eq!(invoice.month_label(), "02/2025");
        assert_eq!(invoice.total(), 175.5);
        assert!(invoice.hauler.is_none());
    }

    #[test]
    fn supplied_contract_is_marked_provided() {
        let contract: ContractInfo = serde_json::from_str(
            r#"{"expiration_date":"12/31/2026","renewal_terms":"Auto-renews for 3 years"}"#,
        )
        .expect("contract parses");

        assert!(contract.provided);
        assert!(!ContractInfo::not_provided().provided);

        let terms = contract.terms();
        assert_eq!(terms[0], ("Expiration Date", "12/31/2026".to_string()));
        assert_eq!(terms[1].0, "Renewal Terms");
    }
}
