//! Waste-service cost analysis: metrics, optimization rules, prioritization and the
//! pipeline that ties them to invoice and haul history.

pub mod aggregate;
pub mod capacity;
mod dates;
pub mod domain;
pub mod haul_import;
pub mod metrics;
pub mod payload;
pub mod pipeline;
pub mod prioritizer;
pub mod router;
pub mod rules;
pub mod settings;

pub use aggregate::{HaulProjection, MonthlyExpense};
pub use capacity::{
    optimize_pickup_frequency, CapacityAssessment, CapacityStatus, CompactorPricing,
    CurrentHaulCosts, FrequencyOptimization, OptimizationPriority, ServiceLevelStatus,
    ServiceType,
};
pub use domain::{
    ContractInfo, EquipmentProfile, Financials, HaulEntry, InvoiceEntry, LifecycleStatus,
    PropertyProfile, PropertyType, Recommendation, RecommendationKind,
};
pub use haul_import::{HaulImportError, HaulLogImporter};
pub use metrics::YardsConversion;
pub use payload::{AnalysisPayload, PayloadError};
pub use pipeline::{
    validate, AnalysisError, AnalysisMetrics, AnalysisResult, LeaseUpProjection, WasteAnalyzer,
};
pub use prioritizer::{prioritize, RankedRecommendation};
pub use router::analysis_router;
pub use rules::{OverageAdvice, OverageFrequency, OverageStrategy, ServiceGuidance};
pub use settings::{AnalysisOptions, AnalysisSettings};
