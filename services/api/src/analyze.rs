use clap::Args;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use wastewise::analysis::{AnalysisPayload, AnalysisResult, HaulLogImporter, WasteAnalyzer};
use wastewise::config::AppConfig;
use wastewise::error::AppError;
use wastewise::report::{format, render_dashboard, BrandConfig, Workbook};

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Analysis payload (JSON) describing the property, equipment and invoices
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Hauler CSV export appended to the payload's haul log
    #[arg(long)]
    pub(crate) haul_csv: Option<PathBuf>,
    /// Directory that receives the workbook CSVs and dashboard.html
    #[arg(long)]
    pub(crate) out_dir: Option<PathBuf>,
    /// Print the full analysis as JSON instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        input,
        haul_csv,
        out_dir,
        json,
    } = args;

    let config = AppConfig::load()?;
    let mut payload = AnalysisPayload::from_path(&input)?;
    if let Some(path) = haul_csv {
        payload.haul_log.extend(HaulLogImporter::from_path(path)?);
    }

    let result = WasteAnalyzer::new(config.analysis).analyze(&payload)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &result).map_err(std::io::Error::from)?;
        writeln!(out)?;
    } else {
        render_summary(&mut out, &result)?;
    }

    if let Some(dir) = out_dir {
        let written = export_reports(&dir, &result, &config.brand)?;
        writeln!(out, "\nWrote {} files to {}", written.len(), dir.display())?;
    }

    Ok(())
}

fn render_summary(out: &mut impl std::io::Write, result: &AnalysisResult) -> std::io::Result<()> {
    let property = &result.property;
    let metrics = &result.metrics;

    writeln!(
        out,
        "{} ({} units, {})",
        property.name,
        property.units,
        property.property_type.label()
    )?;
    writeln!(
        out,
        "- {} months invoiced | {} average monthly | {} per door",
        metrics.invoice_months,
        format::currency(metrics.avg_monthly_cost),
        format::currency(metrics.cost_per_door)
    )?;
    writeln!(
        out,
        "- {} yards per door | {} contamination",
        format::decimal(metrics.yards_per_door),
        format::percent(metrics.contamination_rate_pct)
    )?;
    if metrics.haul_count > 0 {
        writeln!(
            out,
            "- {} hauls | {} tons per haul | {} hauls per month",
            metrics.haul_count,
            format::decimal(result.financials.avg_tons_per_haul),
            format::decimal(metrics.hauls_per_month)
        )?;
    }

    writeln!(
        out,
        "\nPotential to Reduce {} Trash Expense by {}",
        result.reduction_year,
        format::currency_whole(result.total_annual_savings)
    )?;
    for entry in &result.recommendations {
        let recommendation = entry.recommendation();
        writeln!(
            out,
            "  {}. {} - {} per year",
            entry.priority(),
            recommendation.title(),
            format::currency(recommendation.annual_savings())
        )?;
    }

    writeln!(out, "\nService guidance: {}", result.service_guidance_label)?;
    if let Some(advice) = &result.overage_advice {
        writeln!(
            out,
            "Overages ({}): {}",
            advice.frequency.label(),
            advice.strategy_label
        )?;
    }
    for warning in &result.warnings {
        writeln!(out, "Warning: {warning}")?;
    }
    Ok(())
}

fn export_reports(
    dir: &Path,
    result: &AnalysisResult,
    brand: &BrandConfig,
) -> Result<Vec<PathBuf>, AppError> {
    let mut written = Workbook::build(result, brand).write_to_dir(dir)?;

    let dashboard = dir.join("dashboard.html");
    std::fs::write(&dashboard, render_dashboard(result, brand)?)?;
    written.push(dashboard);

    Ok(written)
}
