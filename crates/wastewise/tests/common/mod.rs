#![allow(dead_code)]

use chrono::NaiveDate;
use wastewise::analysis::{
    AnalysisOptions, AnalysisPayload, EquipmentProfile, HaulEntry, InvoiceEntry, LifecycleStatus,
    PropertyProfile, PropertyType,
};
use wastewise::report::Sheet;

pub fn month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("valid month")
}

pub fn invoice(number: &str, year: i32, month_of_year: u32) -> InvoiceEntry {
    InvoiceEntry {
        month: month(year, month_of_year),
        invoice_number: number.to_string(),
        hauler: Some("Lone Star Disposal".to_string()),
        pickup_fees: 3_300.0,
        disposal: 4_000.0,
        rental: 500.0,
        contamination: 600.0,
        bulk: 800.0,
        overage: 300.0,
        other: 200.0,
        units: Some(250),
        equipment_type: Some("30 yd compactor".to_string()),
    }
}

/// Six 5.5-ton hauls per month, five days apart.
pub fn haul_log(months: &[(i32, u32)]) -> Vec<HaulEntry> {
    months
        .iter()
        .flat_map(|&(year, month_of_year)| {
            [1, 6, 11, 16, 21, 26].into_iter().map(move |day| HaulEntry {
                date: NaiveDate::from_ymd_opt(year, month_of_year, day).expect("valid day"),
                tons: 5.5,
                ticket: Some(format!("T-{month_of_year:02}{day:02}")),
                equipment: Some("Compactor".to_string()),
            })
        })
        .collect()
}

/// A stabilized 250-unit compactor property with three months of history.
pub fn compactor_payload() -> AnalysisPayload {
    AnalysisPayload {
        property: PropertyProfile {
            name: "Riverside Commons".to_string(),
            units: 250,
            property_type: PropertyType::Garden,
            occupancy_pct: 93.0,
            status: LifecycleStatus::Stabilized,
            has_compactor: true,
            has_valet: true,
            location: Some("Austin, TX".to_string()),
        },
        equipment: EquipmentProfile {
            compactor_size_yards: Some(30.0),
            ..EquipmentProfile::default()
        },
        invoices: vec![
            invoice("INV-2025-01", 2025, 1),
            invoice("INV-2025-02", 2025, 2),
            invoice("INV-2025-03", 2025, 3),
        ],
        haul_log: haul_log(&[(2025, 1), (2025, 2), (2025, 3)]),
        contract: None,
        options: AnalysisOptions::default(),
    }
}

/// True when any cell of the sheet contains `needle`.
pub fn sheet_contains(sheet: &Sheet, needle: &str) -> bool {
    sheet
        .rows
        .iter()
        .any(|row| row.iter().any(|cell| cell.contains(needle)))
}
