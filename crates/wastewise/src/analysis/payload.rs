use super::domain::{ContractInfo, EquipmentProfile, HaulEntry, InvoiceEntry, PropertyProfile};
use super::settings::AnalysisOptions;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Everything one analysis run consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPayload {
    pub property: PropertyProfile,
    #[serde(default)]
    pub equipment: EquipmentProfile,
    #[serde(default)]
    pub invoices: Vec<InvoiceEntry>,
    #[serde(default)]
    pub haul_log: Vec<HaulEntry>,
    #[serde(default)]
    pub contract: Option<ContractInfo>,
    #[serde(default)]
    pub options: AnalysisOptions,
}

impl AnalysisPayload {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PayloadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PayloadError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("failed to read analysis payload: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid analysis payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::rules::OverageFrequency;
    use crate::analysis::validate;

    #[test]
    fn minimal_payload_defaults_optional_sections() {
        let payload = AnalysisPayload::from_reader(
            r#"{
                "property": {
                    "name": "Birch Commons",
                    "units": 120,
                    "property_type": "garden",
                    "occupancy_pct": 96,
                    "status": "stabilized"
                },
                "invoices": [
                    {"month": "2025-03", "invoice_number": "INV-1", "pickup_fees": 800}
                ]
            }"#
            .as_bytes(),
        )
        .expect("payload parses");

        assert_eq!(payload.property.units, 120);
        assert!(!payload.property.has_compactor);
        assert!(payload.haul_log.is_empty());
        assert!(payload.contract.is_none());
        assert_eq!(payload.options, AnalysisOptions::default());
        assert_eq!(payload.invoices[0].month_label(), "03/2025");
    }

    #[test]
    fn incomplete_property_identity_is_left_to_validation() {
        let payload = AnalysisPayload::from_reader(
            r#"{
                "property": {
                    "units": -5,
                    "property_type": "garden",
                    "occupancy_pct": 96,
                    "status": "stabilized"
                },
                "invoices": [
                    {"month": "2025-03", "invoice_number": "INV-1", "pickup_fees": 800}
                ],
                "options": {"overage_frequency": "rare"}
            }"#
            .as_bytes(),
        )
        .expect("payload parses");

        assert_eq!(payload.property.unit_count(), 0);
        assert_eq!(
            payload.options.overage_frequency,
            Some(OverageFrequency::Sporadic)
        );
        assert_eq!(
            validate(&payload),
            ["Property name is required.", "Units must be positive."]
        );
    }

    #[test]
    fn malformed_json_is_reported() {
        let error = AnalysisPayload::from_reader("{\"property\":".as_bytes())
            .expect_err("truncated payload fails");
        assert!(matches!(error, PayloadError::Json(_)));
        assert!(error.to_string().starts_with("invalid analysis payload"));
    }
}
