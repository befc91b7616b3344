// ============================================================================
// Runner Factory
// Creates scenario runners with proper configuration
// ============================================================================

use crate::domain::RunnerConfig;
use crate::engine::ScenarioRunner;
use crate::interfaces::EvaluationObserver;
use crate::numeric::ConfigResult;
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a scenario runner from configuration
///
/// # Arguments
/// * `config` - Runner configuration
/// * `observer` - Observer for evaluation events
///
/// # Example
/// ```
/// use float_associativity::prelude::*;
/// use std::sync::Arc;
///
/// let config = RunnerConfig::new().with_workers(2);
/// let runner = create_from_config(config, Arc::new(NoOpObserver)).unwrap();
/// assert_eq!(runner.config().workers, 2);
/// ```
pub fn create_from_config(
    config: RunnerConfig,
    observer: Arc<dyn EvaluationObserver>,
) -> ConfigResult<ScenarioRunner> {
    config.validate()?;
    Ok(ScenarioRunner::with_config(config, observer))
}

// ============================================================================
// Builder Pattern
// ============================================================================

/// Builder for creating scenario runners with fluent API
///
/// # Example
/// ```
/// use float_associativity::prelude::*;
/// use std::sync::Arc;
///
/// let runner = ScenarioRunnerBuilder::new()
///     .with_workers(4)
///     .without_precision_events()
///     .build(Arc::new(LoggingObserver))
///     .unwrap();
///
/// let outcomes = runner.run_parallel(ScenarioSet::builtin().scenarios());
/// assert_eq!(outcomes.len(), 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunnerBuilder {
    config: RunnerConfig,
}

impl ScenarioRunnerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn from_config(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Set worker thread count for parallel runs
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    /// Use one worker per available CPU
    pub fn with_available_parallelism(mut self) -> Self {
        self.config.workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        self
    }

    /// Stop emitting `PrecisionLost` events
    pub fn without_precision_events(mut self) -> Self {
        self.config.emit_precision_events = false;
        self
    }

    /// Build the runner
    pub fn build(self, observer: Arc<dyn EvaluationObserver>) -> ConfigResult<ScenarioRunner> {
        create_from_config(self.config, observer)
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &RunnerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::NoOpObserver;
    use crate::numeric::ConfigError;

    #[test]
    fn test_create_from_config() {
        let runner = create_from_config(RunnerConfig::default(), Arc::new(NoOpObserver)).unwrap();
        assert_eq!(runner.config().workers, 1);
    }

    #[test]
    fn test_create_rejects_invalid_config() {
        let result = create_from_config(RunnerConfig::new().with_workers(0), Arc::new(NoOpObserver));
        assert!(matches!(result, Err(ConfigError::InvalidWorkerCount(0))));
    }

    #[test]
    fn test_builder() {
        let builder = ScenarioRunnerBuilder::new()
            .with_workers(3)
            .without_precision_events();
        assert_eq!(builder.get_config().workers, 3);
        assert!(!builder.get_config().emit_precision_events);

        let runner = builder.build(Arc::new(NoOpObserver)).unwrap();
        assert_eq!(runner.config().workers, 3);
    }

    #[test]
    fn test_builder_available_parallelism() {
        let builder = ScenarioRunnerBuilder::new().with_available_parallelism();
        assert!(builder.get_config().workers >= 1);
        assert!(builder.build(Arc::new(NoOpObserver)).is_ok());
    }

    #[test]
    fn test_builder_from_config() {
        let builder = ScenarioRunnerBuilder::from_config(RunnerConfig::new().with_workers(2));
        assert_eq!(builder.get_config().workers, 2);
    }
}
