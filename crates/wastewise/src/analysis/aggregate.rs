//! Period aggregation over raw invoice and haul records.

use super::dates::month_label;
use super::domain::{EquipmentProfile, Financials, HaulEntry, InvoiceEntry};
use super::metrics::{cost_per_door, ratio};
use super::rules::thresholds::TARGET_TONS_PER_HAUL;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Sums over every invoice in the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InvoiceTotals {
    pub months: usize,
    pub total_spend: f64,
    pub pickup_fees: f64,
    pub disposal: f64,
    pub contamination: f64,
    pub bulk: f64,
    pub overage: f64,
    pub months_with_overage: usize,
    pub latest_month: Option<NaiveDate>,
}

impl InvoiceTotals {
    pub fn from_invoices(invoices: &[InvoiceEntry]) -> Self {
        let mut months = BTreeSet::new();
        let mut overage_months = BTreeSet::new();
        let mut totals = Self::default();

        for invoice in invoices {
            months.insert(invoice.month);
            if invoice.overage > 0.0 {
                overage_months.insert(invoice.month);
            }
            totals.total_spend += invoice.total();
            totals.pickup_fees += invoice.pickup_fees;
            totals.disposal += invoice.disposal;
            totals.contamination += invoice.contamination;
            totals.bulk += invoice.bulk;
            totals.overage += invoice.overage;
        }

        totals.months = months.len();
        totals.months_with_overage = overage_months.len();
        totals.latest_month = months.last().copied();
        totals
    }

    pub fn monthly_cost(&self) -> f64 {
        ratio(self.total_spend, self.months as f64)
    }

    pub fn overages_present(&self) -> bool {
        self.months_with_overage > 0
    }

    /// Invoiced disposal per hauled ton; 0 when either side is missing.
    pub fn disposal_rate_per_ton(&self, monthly_tons: f64) -> f64 {
        ratio(ratio(self.disposal, self.months as f64), monthly_tons)
    }
}

/// Sums over the haul log.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HaulTotals {
    pub hauls: usize,
    pub total_tons: f64,
    pub months: usize,
    /// Largest number of days between consecutive pickups.
    pub max_gap_days: Option<u32>,
}

impl HaulTotals {
    pub fn from_hauls(hauls: &[HaulEntry]) -> Self {
        let mut dates: Vec<NaiveDate> = hauls.iter().map(|haul| haul.date).collect();
        dates.sort_unstable();

        let months: BTreeSet<(i32, u32)> =
            dates.iter().map(|date| (date.year(), date.month())).collect();

        let max_gap_days = dates
            .windows(2)
            .filter_map(|pair| u32::try_from((pair[1] - pair[0]).num_days()).ok())
            .max();

        Self {
            hauls: hauls.len(),
            total_tons: hauls.iter().map(|haul| haul.tons).sum(),
            months: months.len(),
            max_gap_days,
        }
    }

    pub fn avg_tons_per_haul(&self) -> f64 {
        ratio(self.total_tons, self.hauls as f64)
    }

    pub fn hauls_per_month(&self) -> f64 {
        ratio(self.hauls as f64, self.months as f64)
    }

    /// Hauled tons per month, or the equipment's reference tonnage when nothing was hauled.
    pub fn monthly_tons(&self, equipment: &EquipmentProfile) -> f64 {
        if self.hauls == 0 {
            return equipment.compactor_tons.unwrap_or(0.0);
        }
        ratio(self.total_tons, self.months as f64)
    }
}

/// Builds the per-run financial snapshot. Every average is a plain per-month mean.
pub fn derive_financials(invoices: &InvoiceTotals, hauls: &HaulTotals) -> Financials {
    let months = invoices.months as f64;

    Financials {
        monthly_cost: invoices.monthly_cost(),
        pickup_cost_per_haul: ratio(invoices.pickup_fees, hauls.hauls as f64),
        contamination_charges: ratio(invoices.contamination, months),
        bulk_charges: ratio(invoices.bulk, months),
        avg_monthly_overage: ratio(invoices.overage, months),
        avg_tons_per_haul: hauls.avg_tons_per_haul(),
        overages_present: invoices.overages_present(),
    }
}

/// Pickup savings from consolidating hauls to the target tonnage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HaulProjection {
    pub current_hauls_per_month: f64,
    pub projected_hauls_per_month: f64,
    pub hauls_saved: f64,
    pub monthly_pickup_savings: f64,
}

pub fn project_haul_reduction(
    monthly_tons: f64,
    current_hauls_per_month: f64,
    pickup_cost_per_haul: f64,
) -> HaulProjection {
    let projected_hauls_per_month = monthly_tons / TARGET_TONS_PER_HAUL;
    let hauls_saved = (current_hauls_per_month - projected_hauls_per_month).max(0.0);

    HaulProjection {
        current_hauls_per_month,
        projected_hauls_per_month,
        hauls_saved,
        monthly_pickup_savings: hauls_saved * pickup_cost_per_haul,
    }
}

/// One row of the expense breakdown: all invoices billed in a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyExpense {
    pub month: NaiveDate,
    pub month_label: String,
    pub invoice_numbers: Vec<String>,
    pub haulers: Vec<String>,
    pub pickup_fees: f64,
    pub disposal: f64,
    pub rental: f64,
    pub contamination: f64,
    pub bulk: f64,
    pub overage: f64,
    pub other: f64,
    pub total: f64,
    pub cost_per_door: f64,
}

pub fn monthly_expenses(invoices: &[InvoiceEntry], units: u32) -> Vec<MonthlyExpense> {
    let mut by_month: BTreeMap<NaiveDate, Vec<&InvoiceEntry>> = BTreeMap::new();
    for invoice in invoices {
        by_month.entry(invoice.month).or_default().push(invoice);
    }

    by_month
        .into_iter()
        .map(|(month, entries)| {
            let sum = |field: fn(&InvoiceEntry) -> f64| {
                entries.iter().map(|entry| field(entry)).sum::<f64>()
            };
            let total = sum(InvoiceEntry::total);

            let mut haulers: Vec<String> = entries
                .iter()
                .filter_map(|entry| entry.hauler.clone())
                .collect();
            haulers.sort();
            haulers.dedup();

            MonthlyExpense {
                month,
                month_label: month_label(month),
                invoice_numbers: entries
                    .iter()
                    .map(|entry| entry.invoice_number.clone())
                    .collect(),
                haulers,
                pickup_fees: sum(|entry| entry.pickup_fees),
                disposal: sum(|entry| entry.disposal),
                rental: sum(|entry| entry.rental),
                contamination: sum(|entry| entry.contamination),
                bulk: sum(|entry| entry.bulk),
                overage: sum(|entry| entry.overage),
                other: sum(|entry| entry.other),
                total,
                cost_per_door: cost_per_door(total, units),
            }
        })
        .collect()
}
