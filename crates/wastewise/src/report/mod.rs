//! Renderers that turn an analysis result into a workbook and an HTML dashboard.

mod brand;
pub mod compliance;
pub mod dashboard;
pub mod format;
pub mod workbook;

pub use brand::{BrandConfig, Contact};
pub use compliance::{regulatory_checklist, ComplianceItem};
pub use dashboard::{render_dashboard, DashboardTab};
pub use workbook::{Sheet, Workbook, WorkbookTab};

pub(crate) const CONTRACT_NOT_PROVIDED: &str =
    "Contract not provided. Supply the hauler agreement to review renewal, termination and liability terms.";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to format report: {0}")]
    Format(#[from] std::fmt::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("report output was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
