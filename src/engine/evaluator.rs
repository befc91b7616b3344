// ============================================================================
// Associativity Evaluator
// Computes (a + b) + c and a + (b + c) with explicit per-step rounding
// ============================================================================

use crate::domain::{AssociativityResult, AssociativityTrace};
use crate::numeric::{exact_sum, Operand, Precision};

/// Evaluate both groupings of `a + b + c` at a single precision.
///
/// Each operand is rounded to `precision`, then every partial and final sum
/// is rounded to `precision` before the next step uses it. The function is
/// total: NaN and infinities propagate under IEEE-754 rules.
///
/// # Example
/// ```
/// use float_associativity::engine::evaluate;
/// use float_associativity::numeric::Precision;
///
/// let result = evaluate(16_777_216.0, 1.0, -16_777_216.0, Precision::Float32);
/// assert_eq!(result.left_result, 0.0);
/// assert_eq!(result.right_result, 1.0);
/// assert!(!result.are_equal);
/// ```
#[inline]
pub fn evaluate(a: f64, b: f64, c: f64, precision: Precision) -> AssociativityResult {
    evaluate_mixed(
        Operand::new(a, precision),
        Operand::new(b, precision),
        Operand::new(c, precision),
    )
}

/// Evaluate both groupings with per-operand precision.
///
/// Every addition rounds at the wider precision of its two inputs, so
/// `float32 + float64` is computed in binary64 while `float32 + float32`
/// stays in binary32.
#[inline]
pub fn evaluate_mixed(a: Operand, b: Operand, c: Operand) -> AssociativityResult {
    let (left, right) = groupings(a, b, c);
    AssociativityResult::from_groupings(left.1.value(), right.1.value(), left.1.precision())
}

/// Evaluate at a single precision, keeping intermediates and an exact reference.
pub fn trace(a: f64, b: f64, c: f64, precision: Precision) -> AssociativityTrace {
    trace_mixed(
        Operand::new(a, precision),
        Operand::new(b, precision),
        Operand::new(c, precision),
    )
}

/// Mixed-precision counterpart of [`trace`].
pub fn trace_mixed(a: Operand, b: Operand, c: Operand) -> AssociativityTrace {
    let ((left_partial, left), (right_partial, right)) = groupings(a, b, c);
    let result =
        AssociativityResult::from_groupings(left.value(), right.value(), left.precision());
    let exact = exact_sum(&[a.value(), b.value(), c.value()]);

    AssociativityTrace::new([a, b, c], left_partial, right_partial, result, exact)
}

/// Returns `((a + b, (a + b) + c), (b + c, a + (b + c)))`.
#[inline]
fn groupings(a: Operand, b: Operand, c: Operand) -> ((Operand, Operand), (Operand, Operand)) {
    let ab = a.add(b);
    let bc = b.add(c);
    ((ab, ab.add(c)), (bc, a.add(bc)))
}
