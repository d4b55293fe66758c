//! Stateless rule evaluators, one per optimization theme.

mod bulk;
mod compactor;
mod contamination;
mod overage;
mod service_level;
pub mod thresholds;

pub use bulk::bulk_strategy;
pub use compactor::{compactor_optimization, MonitoringCosts};
pub use contamination::{contamination_plan, contamination_rate};
pub use overage::{overage_strategy, OverageAdvice, OverageFrequency, OverageStrategy};
pub use service_level::{service_level, ServiceGuidance};
