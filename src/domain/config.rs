// ============================================================================
// Runner Configuration
// Settings for evaluating scenario sets
// ============================================================================

use crate::numeric::{ConfigError, ConfigResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a scenario runner
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunnerConfig {
    /// Worker threads used by parallel runs (sequential runs ignore it)
    pub workers: usize,

    /// Emit `PrecisionLost` events when a grouping misses the exact sum
    pub emit_precision_events: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            emit_precision_events: true,
        }
    }
}

impl RunnerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: Set worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Builder method: Toggle precision-loss events
    pub fn with_precision_events(mut self, enabled: bool) -> Self {
        self.emit_precision_events = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.workers == 0 {
            return Err(ConfigError::InvalidWorkerCount(self.workers));
        }
        Ok(())
    }
}
