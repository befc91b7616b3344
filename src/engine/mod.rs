// ============================================================================
// Engine Module
// Contains the associativity evaluator and the scenario runner
// ============================================================================

mod evaluator;
mod runner;

pub mod factory;

pub use evaluator::{evaluate, evaluate_mixed, trace, trace_mixed};
pub use factory::{create_from_config, ScenarioRunnerBuilder};
pub use runner::{RunSummary, ScenarioOutcome, ScenarioRunner};
