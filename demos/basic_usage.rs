// ============================================================================
// Basic Usage Example
// ============================================================================

use float_associativity::prelude::*;
use std::sync::Arc;

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Floating-Point Associativity ===\n");

    // Same three terms, two precisions
    println!("2^24 + 1 - 2^24 in both precisions:");
    for precision in Precision::ALL {
        let result = evaluate(16_777_216.0, 1.0, -16_777_216.0, precision);
        println!("  {}", result);
    }

    // Step-by-step view
    println!("\n=== Step by Step ===");
    let steps = trace(1e16, 1.0, -1e16, Precision::Float64);
    println!("{}", steps);
    println!(
        "ULP of 1e16 in float64: {:e} (the 1 is half of it)",
        Precision::Float64.ulp(1e16)
    );

    // Precision lost before any addition happens
    println!("\n=== Conversion Loss ===");
    println!("{}", Operand::conversion_loss(1.1, Precision::Float32));

    // Whole catalog through a runner
    println!("\n=== Scenario Catalog ===");
    let runner = ScenarioRunnerBuilder::new()
        .with_workers(2)
        .build(Arc::new(LoggingObserver))
        .expect("valid runner configuration");

    let set = ScenarioSet::builtin();
    let outcomes = runner.run_parallel(set.scenarios());

    for outcome in &outcomes {
        let result = outcome.trace.result;
        println!(
            "  {:<32} left={:<24e} right={:<24e} exact={:<12e} equal={}",
            outcome.scenario,
            result.left_result,
            result.right_result,
            outcome.trace.exact_sum,
            result.are_equal
        );
    }

    let summary = ScenarioRunner::summarize(&outcomes);
    println!(
        "\n{} scenarios: {} equal, {} diverged, {} missed the exact sum",
        summary.total, summary.equal, summary.diverged, summary.lost_precision
    );
}
