// ============================================================================
// Float Associativity Library
// Order-dependent floating-point summation under explicit IEEE-754 precision
// ============================================================================

//! # Float Associativity
//!
//! Evaluates `(a + b) + c` and `a + (b + c)` with every intermediate rounded
//! to a named binary floating-point format, and reports whether the two
//! groupings agree.
//!
//! ## Features
//!
//! - **Explicit precision**: binary32 steps run in native `f32`, never through
//!   a wider intermediate
//! - **Mixed precision**: operands carry their own format, each addition
//!   rounds at the wider of its inputs
//! - **Exact reference**: correctly rounded exact sums and ULP distances show
//!   how far each grouping drifted
//! - **Scenario catalog**: named cases with an observer-driven runner
//!
//! ## Example
//!
//! ```rust
//! use float_associativity::prelude::*;
//! use std::sync::Arc;
//!
//! // Pure evaluation
//! let result = evaluate(16_777_216.0, 1.0, -16_777_216.0, Precision::Float32);
//! assert!(!result.are_equal);
//! println!("{}", result);
//!
//! // The same sum is associative once the terms are binary64
//! let result = evaluate(16_777_216.0, 1.0, -16_777_216.0, Precision::Float64);
//! assert!(result.are_equal);
//!
//! // Run the built-in catalog
//! let runner = ScenarioRunner::new(Arc::new(LoggingObserver));
//! let outcomes = runner.run_all(&ScenarioSet::builtin());
//! let summary = ScenarioRunner::summarize(&outcomes);
//! println!("{} of {} scenarios diverged", summary.diverged, summary.total);
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        AssociativityResult, AssociativityTrace, Grouping, RunnerConfig, Scenario, ScenarioSet,
    };
    pub use crate::engine::{
        create_from_config, evaluate, evaluate_mixed, trace, trace_mixed, RunSummary,
        ScenarioOutcome, ScenarioRunner, ScenarioRunnerBuilder,
    };
    pub use crate::interfaces::{
        CollectingObserver, EvaluationEvent, EvaluationObserver, LoggingObserver, NoOpObserver,
    };
    pub use crate::numeric::{ConfigError, ConfigResult, Operand, Precision};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use crate::numeric::exact_sum;
    use proptest::prelude::*;
    use std::sync::Arc;

    #[test]
    fn test_end_to_end_catalog() {
        let observer = Arc::new(CollectingObserver::new());
        let runner = ScenarioRunnerBuilder::new()
            .with_workers(2)
            .build(observer.clone())
            .unwrap();

        let set = ScenarioSet::builtin();
        let outcomes = runner.run_parallel(set.scenarios());
        assert_eq!(outcomes.len(), set.len());

        let boundary = outcomes
            .iter()
            .find(|o| o.scenario == "integer_boundary")
            .unwrap();
        assert_eq!(boundary.trace.result.left_result, 0.0);
        assert_eq!(boundary.trace.result.right_result, 1.0);

        let promoted = outcomes
            .iter()
            .find(|o| o.scenario == "promoted_integer_boundary")
            .unwrap();
        assert!(promoted.trace.result.are_equal);
        assert_eq!(promoted.trace.result.left_result, 1.0);

        let violations: Vec<_> = observer
            .events()
            .into_iter()
            .filter(|e| matches!(e, EvaluationEvent::AssociativityViolated { .. }))
            .map(|e| e.scenario().to_string())
            .collect();
        assert_eq!(violations.len(), 2);
        assert!(violations.contains(&"integer_boundary".to_string()));
        assert!(violations.contains(&"decimal_fractions".to_string()));
    }

    #[test]
    fn test_custom_scenario_from_literals() {
        let a = Operand::parse_with_default("1e8", Precision::Float32).unwrap();
        let b: Operand = "1:float32".parse().unwrap();
        let c = Operand::parse_with_default("-1e8", Precision::Float32).unwrap();

        let scenario = Scenario::mixed("parsed", a, b, c);
        let trace = scenario.trace();
        assert!(trace.result.are_equal);
        assert_eq!(trace.result.left_result, 0.0);
        assert_eq!(trace.exact_sum, 1.0);
        assert_eq!(trace.left_error, 1.0);
    }

    fn precision() -> impl Strategy<Value = Precision> {
        prop_oneof![Just(Precision::Float32), Just(Precision::Float64)]
    }

    proptest! {
        #[test]
        fn prop_result_invariants(a in any::<f64>(), b in any::<f64>(), c in any::<f64>(), p in precision()) {
            let r = evaluate(a, b, c, p);
            let diff = (r.left_result - r.right_result).abs();

            prop_assert!(
                r.absolute_difference.to_bits() == diff.to_bits()
                    || (r.absolute_difference.is_nan() && diff.is_nan())
            );
            prop_assert_eq!(r.are_equal, r.left_result == r.right_result);
            if r.left_result.is_finite() && r.right_result.is_finite() {
                prop_assert_eq!(r.are_equal, r.absolute_difference == 0.0);
            }
        }

        #[test]
        fn prop_single_precision_results_are_representable(
            a in -1e30f64..1e30,
            b in -1e30f64..1e30,
            c in -1e30f64..1e30,
        ) {
            let r = evaluate(a, b, c, Precision::Float32);
            prop_assert!(Precision::Float32.is_representable(r.left_result));
            prop_assert!(Precision::Float32.is_representable(r.right_result));
            prop_assert_eq!(r.precision, Precision::Float32);
        }

        #[test]
        fn prop_groupings_mirror_under_reversal(
            a in -1e300f64..1e300,
            b in -1e300f64..1e300,
            c in -1e300f64..1e300,
            p in precision(),
        ) {
            // (a + b) + c is c + (b + a) term for term
            let forward = evaluate(a, b, c, p);
            let backward = evaluate(c, b, a, p);
            prop_assume!(!forward.left_result.is_nan() && !forward.right_result.is_nan());
            prop_assert_eq!(forward.left_result.to_bits(), backward.right_result.to_bits());
            prop_assert_eq!(forward.right_result.to_bits(), backward.left_result.to_bits());
        }

        #[test]
        fn prop_exact_sum_is_order_independent(
            a in -1e300f64..1e300,
            b in -1e300f64..1e300,
            c in -1e300f64..1e300,
        ) {
            let forward = exact_sum(&[a, b, c]);
            let backward = exact_sum(&[c, b, a]);
            let shuffled = exact_sum(&[b, c, a]);
            prop_assert_eq!(forward.to_bits(), backward.to_bits());
            prop_assert_eq!(forward.to_bits(), shuffled.to_bits());
        }

        #[test]
        fn prop_exact_sum_is_order_independent_near_overflow(
            a in 0.5f64..1.0,
            b in 0.5f64..1.0,
            c in -1.0f64..-0.5,
            tail in -1e300f64..1e300,
        ) {
            // Two large terms of one sign overflow before the third cancels them
            let [a, b, c] = [a, b, c].map(|x| x * f64::MAX);
            let forward = exact_sum(&[a, b, c, tail]);
            prop_assert_eq!(forward.to_bits(), exact_sum(&[c, tail, b, a]).to_bits());
            prop_assert_eq!(forward.to_bits(), exact_sum(&[b, a, tail, c]).to_bits());
            prop_assert_eq!(forward.to_bits(), exact_sum(&[a, c, b, tail]).to_bits());
        }

        #[test]
        fn prop_exact_operands_are_associative(
            a in -1_000_000i32..1_000_000,
            b in -1_000_000i32..1_000_000,
            c in -1_000_000i32..1_000_000,
            p in precision(),
        ) {
            // Integers well below 2^24 never round
            let r = evaluate(f64::from(a), f64::from(b), f64::from(c), p);
            prop_assert!(r.are_equal);
            prop_assert_eq!(r.left_result, f64::from(a) + f64::from(b) + f64::from(c));
        }
    }

    #[test]
    fn quickcheck_evaluate_is_deterministic() {
        fn same_bits(x: AssociativityResult, y: AssociativityResult) -> bool {
            x.left_result.to_bits() == y.left_result.to_bits()
                && x.right_result.to_bits() == y.right_result.to_bits()
                && x.absolute_difference.to_bits() == y.absolute_difference.to_bits()
                && x.are_equal == y.are_equal
                && x.precision == y.precision
        }

        fn prop(a: f64, b: f64, c: f64, single: bool) -> bool {
            let p = if single {
                Precision::Float32
            } else {
                Precision::Float64
            };
            same_bits(evaluate(a, b, c, p), evaluate(a, b, c, p))
        }

        quickcheck::quickcheck(prop as fn(f64, f64, f64, bool) -> bool);
    }
}
