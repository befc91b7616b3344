// ============================================================================
// Evaluation Observer Interface
// Defines the contract for handling scenario evaluation events
// ============================================================================

use crate::domain::AssociativityResult;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events emitted by the scenario runner
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EvaluationEvent {
    /// Scenario evaluated (always emitted)
    ScenarioEvaluated {
        sequence: u64,
        scenario: String,
        result: AssociativityResult,
        timestamp: DateTime<Utc>,
    },

    /// The two groupings produced different values
    AssociativityViolated {
        sequence: u64,
        scenario: String,
        left_result: f64,
        right_result: f64,
        absolute_difference: f64,
        timestamp: DateTime<Utc>,
    },

    /// At least one grouping missed the exact sum
    PrecisionLost {
        sequence: u64,
        scenario: String,
        exact_sum: f64,
        left_error: f64,
        right_error: f64,
        timestamp: DateTime<Utc>,
    },
}

impl EvaluationEvent {
    pub fn sequence(&self) -> u64 {
        match self {
            EvaluationEvent::ScenarioEvaluated { sequence, .. }
            | EvaluationEvent::AssociativityViolated { sequence, .. }
            | EvaluationEvent::PrecisionLost { sequence, .. } => *sequence,
        }
    }

    pub fn scenario(&self) -> &str {
        match self {
            EvaluationEvent::ScenarioEvaluated { scenario, .. }
            | EvaluationEvent::AssociativityViolated { scenario, .. }
            | EvaluationEvent::PrecisionLost { scenario, .. } => scenario,
        }
    }
}

/// Observer trait for processing evaluation events
/// Implementations can handle logging, collection, reporting, etc.
pub trait EvaluationObserver: Send + Sync {
    /// Handle an evaluation event
    fn on_event(&self, event: EvaluationEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<EvaluationEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op observer for testing
pub struct NoOpObserver;

impl EvaluationObserver for NoOpObserver {
    fn on_event(&self, _event: EvaluationEvent) {
        // Do nothing
    }
}

/// Logging observer
pub struct LoggingObserver;

impl EvaluationObserver for LoggingObserver {
    fn on_event(&self, event: EvaluationEvent) {
        match &event {
            EvaluationEvent::ScenarioEvaluated {
                sequence,
                scenario,
                result,
                ..
            } => {
                tracing::debug!(sequence, scenario = %scenario, %result, "scenario evaluated");
            },
            EvaluationEvent::AssociativityViolated {
                sequence,
                scenario,
                absolute_difference,
                ..
            } => {
                tracing::info!(
                    sequence,
                    scenario = %scenario,
                    absolute_difference,
                    "groupings disagree"
                );
            },
            EvaluationEvent::PrecisionLost {
                sequence,
                scenario,
                exact_sum,
                ..
            } => {
                tracing::debug!(sequence, scenario = %scenario, exact_sum, "precision lost");
            },
        }
    }
}

/// Observer that keeps every event in memory
#[derive(Default)]
pub struct CollectingObserver {
    events: Mutex<Vec<EvaluationEvent>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<EvaluationEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Remove and return all collected events
    pub fn drain(&self) -> Vec<EvaluationEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EvaluationObserver for CollectingObserver {
    fn on_event(&self, event: EvaluationEvent) {
        self.events.lock().push(event);
    }

    fn on_events(&self, events: Vec<EvaluationEvent>) {
        self.events.lock().extend(events);
    }
}
