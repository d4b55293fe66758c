//! Hauler CSV exports (`Date`, `Tons`, optional `Ticket`/`Equipment`) into haul entries.

use super::dates::parse_day;
use super::domain::HaulEntry;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum HaulImportError {
    #[error("failed to read haul log: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid haul log CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("haul log row {row}: {message}")]
    InvalidRow { row: usize, message: String },
}

/// Reads haul logs exported by hauler portals.
pub struct HaulLogImporter;

impl HaulLogImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<HaulEntry>, HaulImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Rows with a blank tonnage are skipped; any other malformed row fails the import.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<HaulEntry>, HaulImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut entries = Vec::new();

        for (index, record) in csv_reader.deserialize::<HaulRow>().enumerate() {
            let row = record?;
            // header is line 1
            let line = index + 2;

            let Some(tons) = row.tons.as_deref() else {
                continue;
            };
            let tons = tons
                .replace(',', "")
                .parse::<f64>()
                .map_err(|_| HaulImportError::InvalidRow {
                    row: line,
                    message: format!("tons value '{tons}' is not a number"),
                })?;
            if !tons.is_finite() {
                return Err(HaulImportError::InvalidRow {
                    row: line,
                    message: format!("tons value '{tons}' is not a finite number"),
                });
            }
            if tons < 0.0 {
                return Err(HaulImportError::InvalidRow {
                    row: line,
                    message: "tons must not be negative".to_string(),
                });
            }

            let date = row
                .date
                .as_deref()
                .and_then(parse_day)
                .ok_or_else(|| HaulImportError::InvalidRow {
                    row: line,
                    message: format!(
                        "date '{}' is not a recognized date",
                        row.date.as_deref().unwrap_or_default()
                    ),
                })?;

            entries.push(HaulEntry {
                date,
                tons,
                ticket: row.ticket,
                equipment: row.equipment,
            });
        }

        Ok(entries)
    }
}

#[derive(Debug, Deserialize)]
struct HaulRow {
    #[serde(rename = "Date", default, deserialize_with = "empty_string_as_none")]
    date: Option<String>,
    #[serde(rename = "Tons", default, deserialize_with = "empty_string_as_none")]
    tons: Option<String>,
    #[serde(rename = "Ticket", default, deserialize_with = "empty_string_as_none")]
    ticket: Option<String>,
    #[serde(
        rename = "Equipment",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    equipment: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_rows_and_skips_blank_tonnage() {
        let csv = "Date,Tons,Ticket,Equipment\n\
                   2025-01-03,5.2,T-100,30yd compactor\n\
                   01/10/2025,,T-101,\n\
                   2025-01-17T09:30:00Z,6.1,,\n";

        let entries = HaulLogImporter::from_reader(csv.as_bytes()).expect("haul log parses");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].ticket.as_deref(), Some("T-100"));
        assert_eq!(entries[0].equipment.as_deref(), Some("30yd compactor"));
        assert_eq!(
            entries[1].date,
            NaiveDate::from_ymd_opt(2025, 1, 17).expect("valid date")
        );
        assert!(entries[1].ticket.is_none());
    }

    #[test]
    fn optional_columns_may_be_missing() {
        let entries = HaulLogImporter::from_reader("Date,Tons\n03/04/2025,7\n".as_bytes())
            .expect("haul log parses");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tons, 7.0);
    }

    #[test]
    fn reports_row_number_for_bad_values() {
        let csv = "Date,Tons\n2025-01-03,5\nnot-a-date,4\n";
        let error = HaulLogImporter::from_reader(csv.as_bytes()).expect_err("bad date rejected");
        match error {
            HaulImportError::InvalidRow { row, .. } => assert_eq!(row, 3),
            other => panic!("unexpected error: {other}"),
        }

        let csv = "Date,Tons\n2025-01-03,heavy\n";
        let error = HaulLogImporter::from_reader(csv.as_bytes()).expect_err("bad tons rejected");
        assert_eq!(
            error.to_string(),
            "haul log row 2: tons value 'heavy' is not a number"
        );
    }

    #[test]
    fn rejects_non_finite_tonnage() {
        let csv = "Date,Tons\n2025-01-03,5\n2025-01-10,NaN\n";
        let error = HaulLogImporter::from_reader(csv.as_bytes()).expect_err("NaN rejected");
        assert_eq!(
            error.to_string(),
            "haul log row 3: tons value 'NaN' is not a finite number"
        );

        let csv = "Date,Tons\n2025-01-03,inf\n";
        let error = HaulLogImporter::from_reader(csv.as_bytes()).expect_err("infinity rejected");
        match error {
            HaulImportError::InvalidRow { row, .. } => assert_eq!(row, 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
