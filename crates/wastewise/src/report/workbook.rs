use super::compliance::regulatory_checklist;
use super::format::{currency, currency_whole, decimal, percent};
use super::{BrandConfig, RenderError, CONTRACT_NOT_PROVIDED};
use crate::analysis::metrics::{cost_per_door, tons_to_yards};
use crate::analysis::AnalysisResult;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkbookTab {
    Summary,
    SummaryFull,
    ExpenseAnalysis,
    HaulLog,
    Optimization,
    ContractTerms,
    RegulatoryCompliance,
    Instructions,
}

impl WorkbookTab {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Summary,
            Self::SummaryFull,
            Self::ExpenseAnalysis,
            Self::HaulLog,
            Self::Optimization,
            Self::ContractTerms,
            Self::RegulatoryCompliance,
            Self::Instructions,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Summary => "Summary",
            Self::SummaryFull => "Summary-Full",
            Self::ExpenseAnalysis => "Expense Analysis",
            Self::HaulLog => "Haul Log",
            Self::Optimization => "Optimization",
            Self::ContractTerms => "Contract Terms",
            Self::RegulatoryCompliance => "Regulatory Compliance",
            Self::Instructions => "Instructions",
        }
    }

    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::SummaryFull => "summary_full",
            Self::ExpenseAnalysis => "expense_analysis",
            Self::HaulLog => "haul_log",
            Self::Optimization => "optimization",
            Self::ContractTerms => "contract_terms",
            Self::RegulatoryCompliance => "regulatory_compliance",
            Self::Instructions => "instructions",
        }
    }
}

/// One workbook tab as rows of cells. Rows may differ in length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub tab: WorkbookTab,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    fn new(tab: WorkbookTab) -> Self {
        Self {
            tab,
            rows: Vec::new(),
        }
    }

    fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    fn blank(&mut self) {
        self.rows.push(Vec::new());
    }

    pub fn first_line(&self) -> Option<&str> {
        self.rows
            .first()
            .and_then(|row| row.first())
            .map(String::as_str)
    }

    pub fn to_csv(&self) -> Result<String, RenderError> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        self.write_rows(&mut writer)?;
        let bytes = writer
            .into_inner()
            .map_err(|err| RenderError::Io(err.into_error()))?;
        Ok(String::from_utf8(bytes)?)
    }

    fn write_rows<W: std::io::Write>(
        &self,
        writer: &mut csv::Writer<W>,
    ) -> Result<(), RenderError> {
        for row in &self.rows {
            if row.is_empty() {
                writer.write_record([""])?;
            } else {
                writer.write_record(row)?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

/// The eight-tab analysis workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn build(result: &AnalysisResult, brand: &BrandConfig) -> Self {
        let sheets = WorkbookTab::ordered()
            .into_iter()
            .map(|tab| match tab {
                WorkbookTab::Summary => summary(result, brand),
                WorkbookTab::SummaryFull => summary_full(result, brand),
                WorkbookTab::ExpenseAnalysis => expense_analysis(result),
                WorkbookTab::HaulLog => haul_log(result),
                WorkbookTab::Optimization => optimization(result),
                WorkbookTab::ContractTerms => contract_terms(result),
                WorkbookTab::RegulatoryCompliance => regulatory_compliance(result),
                WorkbookTab::Instructions => instructions(brand),
            })
            .collect();

        Self { sheets }
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, tab: WorkbookTab) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.tab == tab)
    }

    /// Writes one CSV per tab into `dir`, returning the written paths in tab order.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, RenderError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(self.sheets.len());
        for sheet in &self.sheets {
            let path = dir.join(format!("{}.csv", sheet.tab.file_stem()));
            let mut writer = csv::WriterBuilder::new().flexible(true).from_path(&path)?;
            sheet.write_rows(&mut writer)?;
            written.push(path);
        }

        Ok(written)
    }
}

fn summary(result: &AnalysisResult, brand: &BrandConfig) -> Sheet {
    let property = &result.property;
    let metrics = &result.metrics;
    let mut sheet = Sheet::new(WorkbookTab::Summary);

    sheet.row([format!("{} Waste Analysis", brand.name)]);
    sheet.row(["Property".to_string(), property.name.clone()]);
    if let Some(location) = &property.location {
        sheet.row(["Location".to_string(), location.clone()]);
    }
    sheet.row(["Units".to_string(), property.units.to_string()]);
    sheet.row(["Property Type", property.property_type.label()]);
    sheet.row(["Status", property.status.label()]);
    sheet.row(["Occupancy".to_string(), percent(property.occupancy_pct)]);
    sheet.row(["Average Monthly Cost".to_string(), currency(metrics.avg_monthly_cost)]);
    sheet.row(["Cost per Door".to_string(), currency(metrics.cost_per_door)]);
    sheet.row(["Yards per Door".to_string(), decimal(metrics.yards_per_door)]);
    sheet.row([
        "Average Tons per Haul".to_string(),
        decimal(result.financials.avg_tons_per_haul),
    ]);
    sheet.row(["Service Guidance", result.service_guidance_label]);
    sheet.row([
        "Total Annual Savings".to_string(),
        currency(result.total_annual_savings),
    ]);

    if !brand.contacts.is_empty() {
        sheet.blank();
        sheet.row(["Contacts"]);
        for contact in &brand.contacts {
            sheet.row([contact.role.clone(), contact.name.clone()]);
        }
    }

    sheet
}

fn summary_full(result: &AnalysisResult, brand: &BrandConfig) -> Sheet {
    let metrics = &result.metrics;
    let mut sheet = Sheet::new(WorkbookTab::SummaryFull);

    sheet.row([format!(
        "Potential to Reduce {} Trash Expense by {}",
        result.reduction_year,
        currency_whole(result.total_annual_savings)
    )]);
    sheet.row([format!("Prepared by {} for {}", brand.name, result.property.name)]);
    sheet.blank();

    sheet.row(["Metric", "Value"]);
    sheet.row(["Invoice Months".to_string(), metrics.invoice_months.to_string()]);
    sheet.row(["Total Spend".to_string(), currency(metrics.total_spend)]);
    sheet.row(["Average Monthly Cost".to_string(), currency(metrics.avg_monthly_cost)]);
    sheet.row(["Cost per Door".to_string(), currency(metrics.cost_per_door)]);
    sheet.row(["Yards per Door".to_string(), decimal(metrics.yards_per_door)]);
    sheet.row([
        "Contamination Rate".to_string(),
        percent(metrics.contamination_rate_pct),
    ]);
    sheet.row(["Hauls per Month".to_string(), decimal(metrics.hauls_per_month)]);
    sheet.row([
        "Projected Hauls per Month".to_string(),
        decimal(metrics.projected_hauls_per_month),
    ]);
    sheet.row(["Hauls Saved per Month".to_string(), decimal(metrics.hauls_saved)]);

    if let Some(projection) = &result.lease_up_projection {
        sheet.row([
            format!(
                "Projected Monthly Cost at {}",
                percent(projection.target_occupancy_pct)
            ),
            currency(projection.projected_monthly_cost),
        ]);
    }

    sheet.blank();
    sheet.row(["Priority", "Recommendation", "Annual Savings", "Detail"]);
    for entry in &result.recommendations {
        let recommendation = entry.recommendation();
        sheet.row([
            entry.priority().to_string(),
            recommendation.title().to_string(),
            currency(recommendation.annual_savings()),
            recommendation.detail().to_string(),
        ]);
    }

    sheet.blank();
    sheet.row(["Service Guidance", result.service_guidance_label]);
    if let Some(advice) = &result.overage_advice {
        sheet.row(["Overage Strategy", advice.strategy_label]);
    }

    for warning in &result.warnings {
        sheet.row(["Data Quality Warning".to_string(), warning.clone()]);
    }

    sheet
}

fn expense_analysis(result: &AnalysisResult) -> Sheet {
    let units = result.property.unit_count();
    let mut sheet = Sheet::new(WorkbookTab::ExpenseAnalysis);

    sheet.row([
        "Month",
        "Invoice Number",
        "Hauler",
        "Pickup",
        "Disposal",
        "Rental",
        "Contamination",
        "Bulk",
        "Overage",
        "Other",
        "Total",
        "Cost per Door",
    ]);

    let mut invoices: Vec<_> = result.invoices.iter().collect();
    invoices.sort_by_key(|invoice| invoice.month);
    for invoice in invoices {
        let total = invoice.total();
        sheet.row([
            invoice.month_label(),
            invoice.invoice_number.clone(),
            invoice.hauler.clone().unwrap_or_default(),
            currency(invoice.pickup_fees),
            currency(invoice.disposal),
            currency(invoice.rental),
            currency(invoice.contamination),
            currency(invoice.bulk),
            currency(invoice.overage),
            currency(invoice.other),
            currency(total),
            currency(cost_per_door(total, units)),
        ]);
    }

    sheet.blank();
    sheet.row(["Month", "Invoices", "Total", "Cost per Door"]);
    for expense in &result.monthly_expenses {
        sheet.row([
            expense.month_label.clone(),
            expense.invoice_numbers.join(", "),
            currency(expense.total),
            currency(expense.cost_per_door),
        ]);
    }
    sheet.row([
        "Total".to_string(),
        String::new(),
        currency(result.metrics.total_spend),
        String::new(),
    ]);

    sheet
}

fn haul_log(result: &AnalysisResult) -> Sheet {
    let mut sheet = Sheet::new(WorkbookTab::HaulLog);
    if result.haul_log.is_empty() {
        sheet.row(["No haul log supplied."]);
        return sheet;
    }

    sheet.row(["Date", "Ticket", "Equipment", "Tons", "Loose Yards"]);
    let mut hauls: Vec<_> = result.haul_log.iter().collect();
    hauls.sort_by_key(|haul| haul.date);
    for haul in hauls {
        sheet.row([
            haul.date.format("%m/%d/%Y").to_string(),
            haul.ticket.clone().unwrap_or_default(),
            haul.equipment.clone().unwrap_or_default(),
            decimal(haul.tons),
            decimal(tons_to_yards(haul.tons)),
        ]);
    }

    sheet.blank();
    sheet.row(["Total Hauls".to_string(), result.metrics.haul_count.to_string()]);
    sheet.row([
        "Average Tons per Haul".to_string(),
        decimal(result.financials.avg_tons_per_haul),
    ]);
    if let Some(days) = result.equipment.max_days_between_pickups {
        sheet.row(["Longest Interval (days)".to_string(), days.to_string()]);
    }

    sheet
}

fn optimization(result: &AnalysisResult) -> Sheet {
    let mut sheet = Sheet::new(WorkbookTab::Optimization);

    sheet.row([
        "Priority",
        "Recommendation",
        "Category",
        "Monthly Savings",
        "Annual Savings",
        "Payback (months)",
        "Detail",
    ]);
    for entry in &result.recommendations {
        let recommendation = entry.recommendation();
        sheet.row([
            entry.priority().to_string(),
            recommendation.title().to_string(),
            recommendation.kind().label().to_string(),
            currency(recommendation.monthly_savings()),
            currency(recommendation.annual_savings()),
            recommendation
                .payback_months()
                .map(|months| format!("{months:.1}"))
                .unwrap_or_default(),
            recommendation.detail().to_string(),
        ]);
    }

    sheet.blank();
    sheet.row(["Service Guidance", result.service_guidance_label]);

    if let Some(advice) = &result.overage_advice {
        sheet.row(["Overage Frequency", advice.frequency.label()]);
        sheet.row(["Overage Strategy", advice.strategy_label]);
        sheet.row([
            "Annual Overage Cost".to_string(),
            currency(advice.annual_overage_cost),
        ]);
        sheet.row([
            "Annual Added Service Cost".to_string(),
            currency(advice.annual_added_service_cost),
        ]);
    }

    if let Some(capacity) = &result.capacity {
        sheet.blank();
        sheet.row([
            "Container Size (yards)".to_string(),
            decimal(capacity.container_size_yards),
        ]);
        if let (Some(utilization), Some(status)) =
            (capacity.utilization_pct, capacity.utilization_status)
        {
            sheet.row([
                "Capacity Utilization".to_string(),
                format!("{} ({})", percent(utilization), status.label()),
            ]);
        }
        sheet.row([
            "Weekly Yards per Door".to_string(),
            format!("{:.3}", capacity.weekly_yards_per_door),
        ]);
        sheet.row(["Service Level", capacity.service_level.label()]);

        if let Some(costs) = &capacity.current_costs {
            sheet.row([
                "Annual Haul Cost".to_string(),
                currency(costs.annual_haul_cost),
            ]);
            sheet.row([
                "Annual Disposal Cost".to_string(),
                currency(costs.annual_disposal_cost),
            ]);
            sheet.row([
                "Total Annual Compactor Cost".to_string(),
                currency(costs.total_annual_cost),
            ]);
        }
        if let Some(plan) = &capacity.frequency_optimization {
            sheet.blank();
            sheet.row([
                "Current Pickups per Year".to_string(),
                plan.current_pickups.to_string(),
            ]);
            sheet.row([
                "Recommended Pickups per Year".to_string(),
                plan.recommended_pickups.to_string(),
            ]);
            sheet.row([
                "Pickup Reduction".to_string(),
                plan.pickup_reduction.to_string(),
            ]);
            sheet.row([
                "Days Between Pickups".to_string(),
                format!("{:.1}", plan.days_between_pickups),
            ]);
            sheet.row([
                "Optimized Utilization".to_string(),
                percent(plan.optimized_utilization_pct),
            ]);
            sheet.row([
                "Annual Haul Savings".to_string(),
                currency(plan.annual_savings),
            ]);
            sheet.row([
                "Monthly Haul Savings".to_string(),
                currency(plan.monthly_savings),
            ]);
            sheet.row(["Priority", plan.priority.label()]);
        }
    }

    sheet
}

fn contract_terms(result: &AnalysisResult) -> Sheet {
    let mut sheet = Sheet::new(WorkbookTab::ContractTerms);
    if !result.contract.provided {
        sheet.row([CONTRACT_NOT_PROVIDED]);
        return sheet;
    }

    sheet.row(["Term", "Value"]);
    for (label, value) in result.contract.terms() {
        sheet.row([label.to_string(), value]);
    }
    sheet
}

fn regulatory_compliance(result: &AnalysisResult) -> Sheet {
    let mut sheet = Sheet::new(WorkbookTab::RegulatoryCompliance);
    sheet.row(["Area", "Requirement", "Action"]);
    for item in regulatory_checklist(result) {
        sheet.row([item.area.to_string(), item.requirement, item.action]);
    }
    sheet
}

fn instructions(brand: &BrandConfig) -> Sheet {
    let mut sheet = Sheet::new(WorkbookTab::Instructions);
    sheet.row([format!("How to use this {} workbook", brand.name)]);
    for line in [
        "Summary: headline cost and service metrics for the property.",
        "Summary-Full: savings potential, ranked recommendations and data-quality warnings.",
        "Expense Analysis: every invoice by month with per-door cost.",
        "Haul Log: each pickup with tonnage; feeds tons-per-haul and pickup interval.",
        "Optimization: ranked recommendations with savings and payback, plus service guidance.",
        "Contract Terms: key hauler agreement terms when a contract was supplied.",
        "Regulatory Compliance: local requirements to confirm before changing service.",
        "Recommendations are ranked by annual savings, then by shortest payback.",
    ] {
        sheet.row([line]);
    }
    sheet
}
