use crate::analysis::AnalysisResult;
use serde::Serialize;

/// One line of the regulatory compliance checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceItem {
    pub area: &'static str,
    pub requirement: String,
    pub action: String,
}

impl ComplianceItem {
    fn new(area: &'static str, requirement: String, action: impl Into<String>) -> Self {
        Self {
            area,
            requirement,
            action: action.into(),
        }
    }
}

/// Builds the checklist for the property's jurisdiction and equipment.
pub fn regulatory_checklist(result: &AnalysisResult) -> Vec<ComplianceItem> {
    let property = &result.property;
    let jurisdiction = property
        .location
        .as_deref()
        .map(str::trim)
        .filter(|location| !location.is_empty())
        .unwrap_or("the local jurisdiction");

    let mut items = vec![
        ComplianceItem::new(
            "Recycling Ordinance",
            format!("Confirm multifamily recycling requirements in {jurisdiction}."),
            "Verify recycling capacity, signage and resident notices meet the ordinance.",
        ),
        ComplianceItem::new(
            "Organics Diversion",
            format!(
                "Check whether {jurisdiction} requires organics diversion for a {}-unit property.",
                property.units
            ),
            "Add organics service or document the exemption.",
        ),
    ];

    let hauler = result.contract.hauler.as_deref().or_else(|| {
        result
            .invoices
            .iter()
            .find_map(|invoice| invoice.hauler.as_deref())
    });
    items.push(ComplianceItem::new(
        "Hauler Licensing",
        format!(
            "Confirm {} holds a current franchise or permit in {jurisdiction}.",
            hauler.unwrap_or("the hauler")
        ),
        "Keep a copy of the permit with the service agreement.",
    ));

    if property.has_compactor {
        items.push(ComplianceItem::new(
            "Compactor Safety",
            "Compactor equipment requires documented inspection and lockout/tagout procedures."
                .to_string(),
            "Schedule the annual inspection and train staff on safe operation.",
        ));
    }

    if property.has_valet {
        items.push(ComplianceItem::new(
            "Valet Trash",
            format!(
                "Door-side collection must follow fire code and collection-hour rules in {jurisdiction}."
            ),
            "Confirm container placement and pickup windows with the fire marshal.",
        ));
    }

    if result.financials.contamination_charges > 0.0 {
        items.push(ComplianceItem::new(
            "Contamination",
            "Recycling streams are being charged for contamination.".to_string(),
            "Log contamination notices and share them with residents.",
        ));
    }

    if result.financials.bulk_charges > 0.0 {
        items.push(ComplianceItem::new(
            "Bulk Disposal",
            "Bulk items must be disposed of through permitted channels.".to_string(),
            "Track bulk pickups and prohibit curbside dumping.",
        ));
    }

    items
}
