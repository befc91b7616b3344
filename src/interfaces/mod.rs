// ============================================================================
// Interfaces Module
// Defines traits for observing evaluations
// ============================================================================

mod observer;

pub use observer::{
    CollectingObserver, EvaluationEvent, EvaluationObserver, LoggingObserver, NoOpObserver,
};
