// ============================================================================
// Scenario Runner
// Evaluates scenarios, numbers them and notifies an observer
// ============================================================================

use crate::domain::{AssociativityTrace, RunnerConfig, Scenario};
use crate::interfaces::{EvaluationEvent, EvaluationObserver};
use chrono::{DateTime, Utc};
use std::panic;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One evaluated scenario
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScenarioOutcome {
    /// Unique outcome identifier
    pub id: Uuid,

    /// Position in the runner's evaluation order
    pub sequence: u64,

    /// Scenario name
    pub scenario: String,

    /// Full evaluation trace
    pub trace: AssociativityTrace,

    /// Evaluation timestamp
    pub evaluated_at: DateTime<Utc>,
}

/// Counts over a batch of outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunSummary {
    pub total: usize,
    /// Both groupings agreed
    pub equal: usize,
    /// The groupings disagreed
    pub diverged: usize,
    /// At least one grouping missed the exact sum
    pub lost_precision: usize,
}

/// Scenario runner with a pluggable observer
pub struct ScenarioRunner {
    /// Runner settings
    config: RunnerConfig,

    /// Observer for processing events
    observer: Arc<dyn EvaluationObserver>,

    /// Sequence counter for outcome numbering
    sequence_counter: AtomicU64,
}

impl ScenarioRunner {
    /// Create a runner with the default configuration
    pub fn new(observer: Arc<dyn EvaluationObserver>) -> Self {
        Self::with_config(RunnerConfig::default(), observer)
    }

    /// Create a runner from an already validated configuration
    pub(crate) fn with_config(config: RunnerConfig, observer: Arc<dyn EvaluationObserver>) -> Self {
        Self {
            config,
            observer,
            sequence_counter: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Evaluate a single scenario
    pub fn run(&self, scenario: &Scenario) -> ScenarioOutcome {
        let sequence = self.sequence_counter.fetch_add(1, Ordering::AcqRel);
        let trace = scenario.trace();
        let evaluated_at = Utc::now();

        let mut events = Vec::with_capacity(3);
        events.push(EvaluationEvent::ScenarioEvaluated {
            sequence,
            scenario: scenario.name.clone(),
            result: trace.result,
            timestamp: evaluated_at,
        });

        if trace.result.is_violation() {
            events.push(EvaluationEvent::AssociativityViolated {
                sequence,
                scenario: scenario.name.clone(),
                left_result: trace.result.left_result,
                right_result: trace.result.right_result,
                absolute_difference: trace.result.absolute_difference,
                timestamp: evaluated_at,
            });
        }

        if self.config.emit_precision_events && trace.lost_precision() {
            events.push(EvaluationEvent::PrecisionLost {
                sequence,
                scenario: scenario.name.clone(),
                exact_sum: trace.exact_sum,
                left_error: trace.left_error,
                right_error: trace.right_error,
                timestamp: evaluated_at,
            });
        }

        self.observer.on_events(events);

        ScenarioOutcome {
            id: Uuid::new_v4(),
            sequence,
            scenario: scenario.name.clone(),
            trace,
            evaluated_at,
        }
    }

    /// Evaluate scenarios one after another
    pub fn run_all<'a, I>(&self, scenarios: I) -> Vec<ScenarioOutcome>
    where
        I: IntoIterator<Item = &'a Scenario>,
    {
        scenarios.into_iter().map(|s| self.run(s)).collect()
    }

    /// Evaluate scenarios across `config.workers` scoped threads.
    ///
    /// Outcomes come back in input order; sequence numbers reflect the order
    /// in which workers reached each scenario.
    pub fn run_parallel(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        if self.config.workers <= 1 || scenarios.len() <= 1 {
            return self.run_all(scenarios);
        }

        let chunk_size = scenarios.len().div_ceil(self.config.workers);
        tracing::debug!(
            scenarios = scenarios.len(),
            workers = self.config.workers,
            chunk_size,
            "running scenarios in parallel"
        );

        let joined = crossbeam::thread::scope(|scope| {
            let handles: Vec<_> = scenarios
                .chunks(chunk_size)
                .map(|chunk| scope.spawn(move |_| self.run_all(chunk)))
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<Vec<_>>()
        });

        match joined {
            Ok(parts) => parts
                .into_iter()
                .flat_map(|part| part.unwrap_or_else(|payload| panic::resume_unwind(payload)))
                .collect(),
            Err(payload) => panic::resume_unwind(payload),
        }
    }

    /// Number of scenarios evaluated so far
    pub fn evaluated_count(&self) -> u64 {
        self.sequence_counter.load(Ordering::Acquire)
    }

    /// Count agreements, divergences and precision loss
    pub fn summarize(outcomes: &[ScenarioOutcome]) -> RunSummary {
        outcomes
            .iter()
            .fold(RunSummary::default(), |mut summary, outcome| {
                summary.total += 1;
                if outcome.trace.result.are_equal {
                    summary.equal += 1;
                } else {
                    summary.diverged += 1;
                }
                if outcome.trace.lost_precision() {
                    summary.lost_precision += 1;
                }
                summary
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScenarioSet;
    use crate::interfaces::{CollectingObserver, NoOpObserver};
    use crate::numeric::Precision;

    #[test]
    fn test_run_emits_events() {
        let observer = Arc::new(CollectingObserver::new());
        let runner = ScenarioRunner::new(observer.clone());

        let outcome = runner.run(&Scenario::integer_boundary());
        assert_eq!(outcome.sequence, 0);
        assert_eq!(outcome.scenario, "integer_boundary");
        assert!(!outcome.trace.result.are_equal);

        let events = observer.events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], EvaluationEvent::ScenarioEvaluated { .. }));
        assert!(matches!(
            events[1],
            EvaluationEvent::AssociativityViolated { absolute_difference, .. } if absolute_difference == 1.0
        ));
        assert!(matches!(events[2], EvaluationEvent::PrecisionLost { .. }));
    }

    #[test]
    fn test_run_without_violation() {
        let observer = Arc::new(CollectingObserver::new());
        let runner = ScenarioRunner::new(observer.clone());

        runner.run(&Scenario::single_precision_cancellation());
        let events = observer.events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], EvaluationEvent::ScenarioEvaluated { .. }));
    }

    #[test]
    fn test_precision_events_can_be_disabled() {
        let observer = Arc::new(CollectingObserver::new());
        let runner = ScenarioRunner::with_config(
            RunnerConfig::new().with_precision_events(false),
            observer.clone(),
        );

        runner.run(&Scenario::large_small_cancellation());
        let events = observer.events();
        assert!(!events
            .iter()
            .any(|e| matches!(e, EvaluationEvent::PrecisionLost { .. })));
    }

    #[test]
    fn test_sequence_numbers() {
        let runner = ScenarioRunner::new(Arc::new(NoOpObserver));
        let set = ScenarioSet::builtin();
        let outcomes = runner.run_all(&set);

        let sequences: Vec<_> = outcomes.iter().map(|o| o.sequence).collect();
        assert_eq!(sequences, (0..set.len() as u64).collect::<Vec<_>>());
        assert_eq!(runner.evaluated_count(), set.len() as u64);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let set = ScenarioSet::builtin();

        let sequential = ScenarioRunner::new(Arc::new(NoOpObserver)).run_all(&set);
        let parallel = ScenarioRunner::with_config(
            RunnerConfig::new().with_workers(3),
            Arc::new(NoOpObserver),
        )
        .run_parallel(set.scenarios());

        assert_eq!(parallel.len(), sequential.len());
        for (p, s) in parallel.iter().zip(&sequential) {
            assert_eq!(p.scenario, s.scenario);
            assert_eq!(
                p.trace.result.left_result.to_bits(),
                s.trace.result.left_result.to_bits()
            );
            assert_eq!(
                p.trace.result.right_result.to_bits(),
                s.trace.result.right_result.to_bits()
            );
        }
    }

    #[test]
    fn test_parallel_collects_all_events() {
        let observer = Arc::new(CollectingObserver::new());
        let runner =
            ScenarioRunner::with_config(RunnerConfig::new().with_workers(4), observer.clone());

        let scenarios: Vec<_> = (0..32i32)
            .map(|i| Scenario::uniform(format!("s{}", i), 1.0, f64::from(i), 2.0, Precision::Float64))
            .collect();
        let outcomes = runner.run_parallel(&scenarios);

        assert_eq!(outcomes.len(), 32);
        let mut sequences: Vec<_> = outcomes.iter().map(|o| o.sequence).collect();
        sequences.sort_unstable();
        assert_eq!(sequences, (0..32).collect::<Vec<_>>());
        assert_eq!(observer.len(), 32);
    }

    #[test]
    fn test_summarize() {
        let runner = ScenarioRunner::new(Arc::new(NoOpObserver));
        let outcomes = runner.run_all(&ScenarioSet::builtin());
        let summary = ScenarioRunner::summarize(&outcomes);

        assert_eq!(summary.total, 10);
        assert_eq!(summary.equal + summary.diverged, summary.total);
        // integer_boundary and decimal_fractions
        assert_eq!(summary.diverged, 2);
        assert!(summary.lost_precision >= 5);
    }

    #[test]
    fn test_outcome_ids_are_unique() {
        let runner = ScenarioRunner::new(Arc::new(NoOpObserver));
        let a = runner.run(&Scenario::decimal_fractions());
        let b = runner.run(&Scenario::decimal_fractions());
        assert_ne!(a.id, b.id);
    }
}
