// ============================================================================
// Domain Models Module
// Results, scenarios and runner configuration
// ============================================================================

pub mod config;
pub mod result;
pub mod scenario;

pub use config::RunnerConfig;
pub use result::{AssociativityResult, AssociativityTrace, Grouping};
pub use scenario::{Scenario, ScenarioSet};
