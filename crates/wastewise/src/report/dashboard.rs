use super::compliance::regulatory_checklist;
use super::format::{currency, currency_whole, decimal, escape_html, percent};
use super::{BrandConfig, RenderError, CONTRACT_NOT_PROVIDED};
use crate::analysis::AnalysisResult;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardTab {
    Dashboard,
    ExpenseAnalysis,
    HaulLog,
    Optimization,
    ContractTerms,
    RegulatoryCompliance,
}

impl DashboardTab {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Dashboard,
            Self::ExpenseAnalysis,
            Self::HaulLog,
            Self::Optimization,
            Self::ContractTerms,
            Self::RegulatoryCompliance,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::ExpenseAnalysis => "Expense Analysis",
            Self::HaulLog => "Haul Log",
            Self::Optimization => "Optimization",
            Self::ContractTerms => "Contract Terms",
            Self::RegulatoryCompliance => "Regulatory Compliance",
        }
    }

    const fn anchor(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::ExpenseAnalysis => "expense-analysis",
            Self::HaulLog => "haul-log",
            Self::Optimization => "optimization",
            Self::ContractTerms => "contract-terms",
            Self::RegulatoryCompliance => "regulatory-compliance",
        }
    }
}

const STYLE: &str = "body{font-family:Arial,Helvetica,sans-serif;margin:0;color:#1f2933}\
header{background:#14532d;color:#fff;padding:16px 24px}\
nav{display:flex;gap:4px;padding:8px 24px;background:#e5efe8}\
nav button{border:0;padding:8px 12px;background:#fff;cursor:pointer}\
nav button.active{background:#14532d;color:#fff}\
section{display:none;padding:16px 24px}section.active{display:block}\
table{border-collapse:collapse;width:100%}th,td{border:1px solid #cbd2d9;padding:6px;text-align:left}\
.cards{display:flex;flex-wrap:wrap;gap:12px}.card{border:1px solid #cbd2d9;padding:12px;min-width:180px}\
.warning{color:#9a3412}";

const SCRIPT: &str = "document.querySelectorAll('nav button').forEach(function(b){\
b.addEventListener('click',function(){\
document.querySelectorAll('nav button,section').forEach(function(e){e.classList.remove('active');});\
b.classList.add('active');document.getElementById(b.dataset.tab).classList.add('active');});});";

/// Renders the six-tab dashboard as a standalone HTML page.
pub fn render_dashboard(
    result: &AnalysisResult,
    brand: &BrandConfig,
) -> Result<String, RenderError> {
    let mut html = String::new();
    let title = format!("{} | {}", brand.name, result.property.name);

    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(
        html,
        "<html lang=\"en\"><head><meta charset=\"utf-8\"><title>{}</title><style>{STYLE}</style></head><body>",
        escape_html(&title)
    )?;
    writeln!(
        html,
        "<header><h1>{}</h1><p>{}</p></header>",
        escape_html(&brand.name),
        escape_html(&result.property.name)
    )?;

    html.push_str("<nav>");
    for (index, tab) in DashboardTab::ordered().into_iter().enumerate() {
        write!(
            html,
            "<button data-tab=\"{}\"{}>{}</button>",
            tab.anchor(),
            if index == 0 { " class=\"active\"" } else { "" },
            tab.label()
        )?;
    }
    html.push_str("</nav>\n");

    for (index, tab) in DashboardTab::ordered().into_iter().enumerate() {
        writeln!(
            html,
            "<section id=\"{}\"{}><h2>{}</h2>",
            tab.anchor(),
            if index == 0 { " class=\"active\"" } else { "" },
            tab.label()
        )?;
        match tab {
            DashboardTab::Dashboard => overview(&mut html, result)?,
            DashboardTab::ExpenseAnalysis => expenses(&mut html, result)?,
            DashboardTab::HaulLog => hauls(&mut html, result)?,
            DashboardTab::Optimization => optimization(&mut html, result)?,
            DashboardTab::ContractTerms => contract(&mut html, result)?,
            DashboardTab::RegulatoryCompliance => compliance(&mut html, result)?,
        }
        html.push_str("</section>\n");
    }

    if !brand.contacts.is_empty() {
        html.push_str("<footer><h3>Contacts</h3><ul>");
        for contact in &brand.contacts {
            write!(
                html,
                "<li><strong>{}</strong>: {}</li>",
                escape_html(&contact.role),
                escape_html(&contact.name)
            )?;
        }
        html.push_str("</ul></footer>\n");
    }

    writeln!(html, "<script>{SCRIPT}</script></body></html>")?;
    Ok(html)
}

fn table_row<'a>(
    html: &mut String,
    cells: impl IntoIterator<Item = &'a str>,
) -> std::fmt::Result {
    html.push_str("<tr>");
    for cell in cells {
        write!(html, "<td>{}</td>", escape_html(cell))?;
    }
    html.push_str("</tr>");
    Ok(())
}

fn table_header(html: &mut String, cells: &[&str]) -> std::fmt::Result {
    html.push_str("<table><tr>");
    for cell in cells {
        write!(html, "<th>{}</th>", escape_html(cell))?;
    }
    html.push_str("</tr>");
    Ok(())
}

fn overview(html: &mut String, result: &AnalysisResult) -> std::fmt::Result {
    let metrics = &result.metrics;
    writeln!(
        html,
        "<p><strong>Potential to Reduce {} Trash Expense by {}</strong></p>",
        result.reduction_year,
        currency_whole(result.total_annual_savings)
    )?;

    let cards = [
        ("Average Monthly Cost", currency(metrics.avg_monthly_cost)),
        ("Cost per Door", currency(metrics.cost_per_door)),
        ("Yards per Door", decimal(metrics.yards_per_door)),
        (
            "Average Tons per Haul",
            decimal(result.financials.avg_tons_per_haul),
        ),
        ("Contamination Rate", percent(metrics.contamination_rate_pct)),
        ("Total Annual Savings", currency(result.total_annual_savings)),
    ];
    html.push_str("<div class=\"cards\">");
    for (label, value) in cards {
        write!(
            html,
            "<div class=\"card\"><div>{}</div><strong>{}</strong></div>",
            escape_html(label),
            escape_html(&value)
        )?;
    }
    html.push_str("</div>\n");

    writeln!(
        html,
        "<p>{} units | {} | {} | {} occupied</p>",
        result.property.units,
        result.property.property_type.label(),
        result.property.status.label(),
        percent(result.property.occupancy_pct)
    )?;
    writeln!(
        html,
        "<p>Service guidance: {}</p>",
        escape_html(result.service_guidance_label)
    )?;

    if let Some(projection) = &result.lease_up_projection {
        writeln!(
            html,
            "<p>Projected monthly cost at {} occupancy: {}</p>",
            percent(projection.target_occupancy_pct),
            currency(projection.projected_monthly_cost)
        )?;
    }

    for warning in &result.warnings {
        writeln!(html, "<p class=\"warning\">{}</p>", escape_html(warning))?;
    }
    Ok(())
}

fn expenses(html: &mut String, result: &AnalysisResult) -> std::fmt::Result {
    table_header(
        html,
        &[
            "Month",
            "Invoice Number",
            "Hauler",
            "Pickup",
            "Disposal",
            "Contamination",
            "Bulk",
            "Overage",
            "Total",
        ],
    )?;

    let mut invoices: Vec<_> = result.invoices.iter().collect();
    invoices.sort_by_key(|invoice| invoice.month);
    for invoice in invoices {
        table_row(
            html,
            [
                invoice.month_label().as_str(),
                invoice.invoice_number.as_str(),
                invoice.hauler.as_deref().unwrap_or(""),
                currency(invoice.pickup_fees).as_str(),
                currency(invoice.disposal).as_str(),
                currency(invoice.contamination).as_str(),
                currency(invoice.bulk).as_str(),
                currency(invoice.overage).as_str(),
                currency(invoice.total()).as_str(),
            ],
        )?;
    }
    html.push_str("</table>\n");

    writeln!(
        html,
        "<p>Total spend {} across {} months; average {} per month ({} per door).</p>",
        currency(result.metrics.total_spend),
        result.metrics.invoice_months,
        currency(result.metrics.avg_monthly_cost),
        currency(result.metrics.cost_per_door)
    )
}

fn hauls(html: &mut String, result: &AnalysisResult) -> std::fmt::Result {
    if result.haul_log.is_empty() {
        html.push_str("<p>No haul log supplied.</p>\n");
        return Ok(());
    }

    table_header(html, &["Date", "Ticket", "Equipment", "Tons"])?;
    let mut entries: Vec<_> = result.haul_log.iter().collect();
    entries.sort_by_key(|haul| haul.date);
    for haul in entries {
        table_row(
            html,
            [
                haul.date.format("%m/%d/%Y").to_string().as_str(),
                haul.ticket.as_deref().unwrap_or(""),
                haul.equipment.as_deref().unwrap_or(""),
                decimal(haul.tons).as_str(),
            ],
        )?;
    }
    html.push_str("</table>\n");

    writeln!(
        html,
        "<p>{} hauls, {} tons per haul on average, {} hauls per month.</p>",
        result.metrics.haul_count,
        decimal(result.financials.avg_tons_per_haul),
        decimal(result.metrics.hauls_per_month)
    )
}

fn optimization(html: &mut String, result: &AnalysisResult) -> std::fmt::Result {
    if result.recommendations.is_empty() {
        html.push_str("<p>No savings opportunities identified.</p>\n");
    } else {
        table_header(
            html,
            &[
                "Priority",
                "Recommendation",
                "Monthly Savings",
                "Annual Savings",
                "Payback (months)",
                "Detail",
            ],
        )?;
        for entry in &result.recommendations {
            let recommendation = entry.recommendation();
            let payback = recommendation
                .payback_months()
                .map(|months| format!("{months:.1}"))
                .unwrap_or_default();
            table_row(
                html,
                [
                    entry.priority().to_string().as_str(),
                    recommendation.title(),
                    currency(recommendation.monthly_savings()).as_str(),
                    currency(recommendation.annual_savings()).as_str(),
                    payback.as_str(),
                    recommendation.detail(),
                ],
            )?;
        }
        html.push_str("</table>\n");
    }

    writeln!(
        html,
        "<p>Service guidance: {}</p>",
        escape_html(result.service_guidance_label)
    )?;
    if let Some(advice) = &result.overage_advice {
        writeln!(
            html,
            "<p>Overages ({}): {}</p>",
            advice.frequency.label(),
            escape_html(advice.strategy_label)
        )?;
    }
    if let Some(capacity) = &result.capacity {
        writeln!(
            html,
            "<p>Service level: {} ({:.3} yards/door/week)</p>",
            escape_html(capacity.service_level.label()),
            capacity.weekly_yards_per_door
        )?;
        if let (Some(utilization), Some(status)) =
            (capacity.utilization_pct, capacity.utilization_status)
        {
            writeln!(
                html,
                "<p>Capacity utilization: {} ({})</p>",
                percent(utilization),
                status.label()
            )?;
        }
        if let Some(plan) = &capacity.frequency_optimization {
            writeln!(
                html,
                "<p>Pickup frequency ({} priority): {} to {} pickups per year, \
                 every {:.1} days at {} utilization, saving {} per year</p>",
                plan.priority.label(),
                plan.current_pickups,
                plan.recommended_pickups,
                plan.days_between_pickups,
                percent(plan.optimized_utilization_pct),
                currency(plan.annual_savings)
            )?;
        }
    }
    Ok(())
}

fn contract(html: &mut String, result: &AnalysisResult) -> std::fmt::Result {
    if !result.contract.provided {
        return writeln!(html, "<p>{}</p>", escape_html(CONTRACT_NOT_PROVIDED));
    }

    table_header(html, &["Term", "Value"])?;
    for (label, value) in result.contract.terms() {
        table_row(html, [label, value.as_str()])?;
    }
    html.push_str("</table>\n");
    Ok(())
}

fn compliance(html: &mut String, result: &AnalysisResult) -> std::fmt::Result {
    table_header(html, &["Area", "Requirement", "Action"])?;
    for item in regulatory_checklist(result) {
        table_row(
            html,
            [item.area, item.requirement.as_str(), item.action.as_str()],
        )?;
    }
    html.push_str("</table>\n");
    Ok(())
}
