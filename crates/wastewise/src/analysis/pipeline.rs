use super::aggregate::{
    derive_financials, monthly_expenses, project_haul_reduction, HaulProjection, HaulTotals,
    InvoiceTotals, MonthlyExpense,
};
use super::capacity::{
    assess_capacity, open_top_warning, CapacityAssessment, CompactorPricing,
};
use super::domain::{
    ContractInfo, EquipmentProfile, Financials, HaulEntry, InvoiceEntry, LifecycleStatus,
    PropertyProfile,
};
use super::metrics::{
    cost_per_door, lease_up_budget_projection, yards_per_door_dumpster, HAUL_FEE_MULTIPLIER,
    WEEKS_PER_MONTH,
};
use super::payload::AnalysisPayload;
use super::prioritizer::{prioritize, RankedRecommendation};
use super::rules::thresholds::{COMPACTOR_MAX_DAYS_BETWEEN_PICKUPS, LEASE_UP_MAX_OCCUPANCY_PCT};
use super::rules::{
    bulk_strategy, compactor_optimization, contamination_plan, contamination_rate,
    overage_strategy, service_level, OverageAdvice, OverageFrequency, ServiceGuidance,
};
use super::settings::{AnalysisSettings, ResolvedSettings};
use chrono::Datelike;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Runs the full analysis for one payload: validate, aggregate, evaluate rules, prioritize.
#[derive(Debug, Clone, Default)]
pub struct WasteAnalyzer {
    settings: AnalysisSettings,
}

impl WasteAnalyzer {
    pub fn new(settings: AnalysisSettings) -> Self {
        Self { settings }
    }

    pub fn analyze(&self, payload: &AnalysisPayload) -> Result<AnalysisResult, AnalysisError> {
        let errors = validate(payload);
        if !errors.is_empty() {
            warn!(
                property = %payload.property.name,
                errors = ?errors,
                "analysis payload rejected"
            );
            return Err(AnalysisError::Validation(errors));
        }

        let settings = self.settings.resolve(&payload.options);
        let property = &payload.property;

        let invoice_totals = InvoiceTotals::from_invoices(&payload.invoices);
        let haul_totals = HaulTotals::from_hauls(&payload.haul_log);
        let financials = derive_financials(&invoice_totals, &haul_totals);
        debug!(
            months = invoice_totals.months,
            total_spend = invoice_totals.total_spend,
            hauls = haul_totals.hauls,
            avg_tons_per_haul = financials.avg_tons_per_haul,
            "aggregated invoice and haul history"
        );

        let equipment = effective_equipment(&payload.equipment, &haul_totals);
        let monthly_tons = haul_totals.monthly_tons(&equipment);
        let projection = project_haul_reduction(
            monthly_tons,
            haul_totals.hauls_per_month(),
            financials.pickup_cost_per_haul,
        );

        let mut recommendations = Vec::new();
        if property.has_compactor {
            let outcome = compactor_optimization(
                &equipment,
                &financials,
                projection.monthly_pickup_savings,
                settings.monitoring,
            );
            debug!(emitted = outcome.is_some(), "compactor rule evaluated");
            recommendations.extend(outcome);
        }

        let contamination = contamination_plan(&financials, financials.monthly_cost);
        debug!(emitted = contamination.is_some(), "contamination rule evaluated");
        recommendations.extend(contamination);
        recommendations.push(bulk_strategy(financials.bulk_charges));

        let overage_advice = financials.overages_present.then(|| {
            let frequency = settings.overage_frequency.unwrap_or_else(|| {
                OverageFrequency::classify(
                    invoice_totals.months_with_overage,
                    invoice_totals.months,
                )
            });
            let extra_service_cost = settings
                .extra_service_cost
                .unwrap_or(financials.pickup_cost_per_haul * WEEKS_PER_MONTH);
            overage_strategy(&financials, frequency, extra_service_cost)
        });

        let contamination_or_overages =
            financials.overages_present || financials.contamination_charges > 0.0;
        let service_guidance = service_level(&financials, contamination_or_overages);

        let recommendations = prioritize(recommendations);
        let total_annual_savings: f64 = recommendations
            .iter()
            .map(|entry| entry.recommendation().annual_savings())
            .sum();

        let metrics = AnalysisMetrics::compute(
            property,
            &equipment,
            &settings,
            &invoice_totals,
            &haul_totals,
            monthly_tons,
            &projection,
        );
        let warnings = data_quality_warnings(property, &equipment, &haul_totals);
        let pricing = CompactorPricing {
            base_haul_fee: settings
                .base_haul_fee
                .unwrap_or(financials.pickup_cost_per_haul / HAUL_FEE_MULTIPLIER),
            disposal_rate_per_ton: settings
                .disposal_rate_per_ton
                .unwrap_or_else(|| invoice_totals.disposal_rate_per_ton(monthly_tons)),
        };
        let capacity = assess_capacity(
            property,
            &equipment,
            financials.avg_tons_per_haul,
            haul_totals.hauls_per_month(),
            pricing,
        );
        let lease_up_projection = (property.status == LifecycleStatus::LeaseUp).then(|| {
            LeaseUpProjection {
                current_monthly_cost: financials.monthly_cost,
                target_occupancy_pct: settings.target_occupancy_pct,
                projected_monthly_cost: lease_up_budget_projection(
                    property,
                    financials.monthly_cost,
                    settings.target_occupancy_pct,
                ),
            }
        });

        let reduction_year = invoice_totals
            .latest_month
            .map(|month| month.year() + 1)
            .unwrap_or_default();

        info!(
            property = %property.name,
            recommendations = recommendations.len(),
            total_annual_savings,
            guidance = service_guidance.label(),
            "analysis completed"
        );

        Ok(AnalysisResult {
            property: property.clone(),
            equipment,
            financials,
            invoices: payload.invoices.clone(),
            haul_log: payload.haul_log.clone(),
            contract: payload
                .contract
                .clone()
                .unwrap_or_else(ContractInfo::not_provided),
            monthly_expenses: monthly_expenses(&payload.invoices, property.unit_count()),
            metrics,
            recommendations,
            service_guidance,
            service_guidance_label: service_guidance.label(),
            overage_advice,
            capacity,
            lease_up_projection,
            total_annual_savings,
            reduction_year,
            warnings,
        })
    }
}

/// Human-readable validation failures, empty when the payload can be analyzed.
pub fn validate(payload: &AnalysisPayload) -> Vec<String> {
    let property = &payload.property;
    let mut errors = Vec::new();

    if property.name.trim().is_empty() {
        errors.push("Property name is required.".to_string());
    }
    if property.units <= 0 {
        errors.push("Units must be positive.".to_string());
    }
    if property.status == LifecycleStatus::LeaseUp
        && property.occupancy_pct >= LEASE_UP_MAX_OCCUPANCY_PCT
    {
        errors.push(format!(
            "Lease-up status inconsistent with occupancy >= {LEASE_UP_MAX_OCCUPANCY_PCT:.0}%."
        ));
    }
    if payload
        .equipment
        .max_days_between_pickups
        .is_some_and(|days| days > COMPACTOR_MAX_DAYS_BETWEEN_PICKUPS)
    {
        errors.push(format!(
            "Compactor pickup interval exceeds {COMPACTOR_MAX_DAYS_BETWEEN_PICKUPS}-day threshold for optimization."
        ));
    }
    if payload.invoices.is_empty() {
        errors.push("At least one invoice is required.".to_string());
    }

    errors
}

fn effective_equipment(equipment: &EquipmentProfile, hauls: &HaulTotals) -> EquipmentProfile {
    let mut effective = equipment.clone();
    if effective.max_days_between_pickups.is_none() {
        effective.max_days_between_pickups = hauls.max_gap_days;
    }
    effective
}

fn data_quality_warnings(
    property: &PropertyProfile,
    equipment: &EquipmentProfile,
    hauls: &HaulTotals,
) -> Vec<String> {
    let mut warnings = Vec::new();
    if !property.has_compactor {
        return warnings;
    }

    if hauls.hauls == 0 {
        warnings.push(
            "No haul log supplied; per-haul tonnage and pickup cost default to zero.".to_string(),
        );
        return warnings;
    }

    if let Some(size) = equipment.compactor_size_yards.filter(|size| *size > 0.0) {
        warnings.extend(open_top_warning(size, hauls.avg_tons_per_haul()));
    }

    warnings
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("analysis payload failed validation: {}", .0.join(" "))]
    Validation(Vec<String>),
}

impl AnalysisError {
    pub fn errors(&self) -> &[String] {
        match self {
            AnalysisError::Validation(errors) => errors,
        }
    }
}

/// Headline figures shown across the workbook and dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisMetrics {
    pub invoice_months: usize,
    pub total_spend: f64,
    pub avg_monthly_cost: f64,
    pub cost_per_door: f64,
    pub yards_per_door: f64,
    pub contamination_rate_pct: f64,
    pub haul_count: usize,
    pub monthly_tons: f64,
    pub hauls_per_month: f64,
    pub projected_hauls_per_month: f64,
    pub hauls_saved: f64,
    pub monthly_pickup_savings: f64,
}

impl AnalysisMetrics {
    fn compute(
        property: &PropertyProfile,
        equipment: &EquipmentProfile,
        settings: &ResolvedSettings,
        invoices: &InvoiceTotals,
        hauls: &HaulTotals,
        monthly_tons: f64,
        projection: &HaulProjection,
    ) -> Self {
        let avg_monthly_cost = invoices.monthly_cost();
        let yards_per_door = if property.has_compactor {
            settings
                .yards_conversion
                .yards_per_door(monthly_tons, property.unit_count())
        } else {
            match (
                equipment.dumpster_qty,
                equipment.dumpster_size_yards,
                equipment.dumpster_freq_per_week,
            ) {
                (Some(qty), Some(size), Some(freq)) => {
                    yards_per_door_dumpster(qty, size, freq, property.unit_count())
                }
                _ => 0.0,
            }
        };

        Self {
            invoice_months: invoices.months,
            total_spend: invoices.total_spend,
            avg_monthly_cost,
            cost_per_door: cost_per_door(avg_monthly_cost, property.unit_count()),
            yards_per_door,
            contamination_rate_pct: contamination_rate(
                invoices.contamination,
                invoices.total_spend,
            ),
            haul_count: hauls.hauls,
            monthly_tons,
            hauls_per_month: projection.current_hauls_per_month,
            projected_hauls_per_month: projection.projected_hauls_per_month,
            hauls_saved: projection.hauls_saved,
            monthly_pickup_savings: projection.monthly_pickup_savings,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LeaseUpProjection {
    pub current_monthly_cost: f64,
    pub target_occupancy_pct: f64,
    pub projected_monthly_cost: f64,
}

/// Unified output of one analysis run, consumed by every renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub property: PropertyProfile,
    /// Equipment with derived values filled in.
    pub equipment: EquipmentProfile,
    pub financials: Financials,
    pub invoices: Vec<InvoiceEntry>,
    pub haul_log: Vec<HaulEntry>,
    pub contract: ContractInfo,
    pub monthly_expenses: Vec<MonthlyExpense>,
    pub metrics: AnalysisMetrics,
    pub recommendations: Vec<RankedRecommendation>,
    pub service_guidance: ServiceGuidance,
    pub service_guidance_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overage_advice: Option<OverageAdvice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<CapacityAssessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lease_up_projection: Option<LeaseUpProjection>,
    pub total_annual_savings: f64,
    /// Year following the latest invoice month.
    pub reduction_year: i32,
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::domain::PropertyType;
    use crate::analysis::settings::AnalysisOptions;
    use chrono::NaiveDate;

    fn payload() -> AnalysisPayload {
        AnalysisPayload {
            property: PropertyProfile {
                name: "Harbor View".to_string(),
                units: 200,
                property_type: PropertyType::MidRise,
                occupancy_pct: 95.0,
                status: LifecycleStatus::Stabilized,
                has_compactor: true,
                has_valet: false,
                location: None,
            },
            equipment: EquipmentProfile::default(),
            invoices: vec![InvoiceEntry {
                month: NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid month"),
                invoice_number: "INV-100".to_string(),
                hauler: None,
                pickup_fees: 1_000.0,
                disposal: 0.0,
                rental: 0.0,
                contamination: 0.0,
                bulk: 0.0,
                overage: 0.0,
                other: 0.0,
                units: None,
                equipment_type: None,
            }],
            haul_log: Vec::new(),
            contract: None,
            options: AnalysisOptions::default(),
        }
    }

    #[test]
    fn validation_collects_every_problem() {
        let mut payload = payload();
        payload.property.name = "  ".to_string();
        payload.property.units = 0;
        payload.property.status = LifecycleStatus::LeaseUp;
        payload.property.occupancy_pct = 92.0;
        payload.equipment.max_days_between_pickups = Some(21);
        payload.invoices.clear();

        let errors = validate(&payload);
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&"Units must be positive.".to_string()));
        assert!(errors.contains(
            &"Compactor pickup interval exceeds 14-day threshold for optimization.".to_string()
        ));
        assert!(errors.contains(&"At least one invoice is required.".to_string()));
    }

    #[test]
    fn analyze_halts_on_validation_failure() {
        let mut payload = payload();
        payload.property.units = 0;

        let error = WasteAnalyzer::default()
            .analyze(&payload)
            .expect_err("zero units rejected");
        assert_eq!(error.errors(), ["Units must be positive."]);
    }

    #[test]
    fn compactor_without_haul_log_warns_and_still_analyzes() {
        let result = WasteAnalyzer::default()
            .analyze(&payload())
            .expect("analysis succeeds");

        assert_eq!(result.reduction_year, 2026);
        assert_eq!(result.metrics.cost_per_door, 5.0);
        assert_eq!(result.warnings.len(), 1);
        assert!(!result.contract.provided);
        assert!(result.overage_advice.is_none());
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(
            result.recommendations[0].recommendation().title(),
            "Keep On-Demand Bulk"
        );
    }
}
