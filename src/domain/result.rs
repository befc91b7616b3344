// ============================================================================
// Evaluation Results
// Immutable records produced by the associativity evaluator
// ============================================================================

use crate::numeric::{ulp_distance, Operand, Precision};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which way three terms were grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Grouping {
    /// `(a + b) + c`
    Left,
    /// `a + (b + c)`
    Right,
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grouping::Left => f.write_str("(a + b) + c"),
            Grouping::Right => f.write_str("a + (b + c)"),
        }
    }
}

// ============================================================================
// Associativity Result
// ============================================================================

/// Both groupings of a three-term sum and how they compare.
///
/// Invariants:
/// - `absolute_difference` is `|left_result - right_result|` computed in
///   binary64 on the stored values
/// - `are_equal` is IEEE equality of the two results, with no tolerance
///
/// For finite results `are_equal` holds exactly when the difference is zero.
/// A NaN on either side makes the results unequal and the difference NaN;
/// two equal infinities are equal while their difference is NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssociativityResult {
    /// `(a + b) + c`, rounded after each step
    pub left_result: f64,
    /// `a + (b + c)`, rounded after each step
    pub right_result: f64,
    /// `|left_result - right_result|`
    pub absolute_difference: f64,
    /// `left_result == right_result`
    pub are_equal: bool,
    /// Precision both results were rounded to
    pub precision: Precision,
}

impl AssociativityResult {
    /// Build a result from the two final values, deriving the comparison fields.
    pub fn from_groupings(left_result: f64, right_result: f64, precision: Precision) -> Self {
        Self {
            left_result,
            right_result,
            absolute_difference: (left_result - right_result).abs(),
            are_equal: left_result == right_result,
            precision,
        }
    }

    /// Result of one grouping.
    #[inline]
    pub fn result(&self, grouping: Grouping) -> f64 {
        match grouping {
            Grouping::Left => self.left_result,
            Grouping::Right => self.right_result,
        }
    }

    /// Whether the two groupings disagree.
    #[inline]
    pub fn is_violation(&self) -> bool {
        !self.are_equal
    }

    /// Stricter than `are_equal`: also distinguishes `+0.0` from `-0.0` and
    /// treats identical NaN payloads as identical.
    #[inline]
    pub fn is_bitwise_identical(&self) -> bool {
        self.left_result.to_bits() == self.right_result.to_bits()
    }
}

impl fmt::Display for AssociativityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] (a + b) + c = {:e}, a + (b + c) = {:e}, difference = {:e}, equal = {}",
            self.precision,
            self.left_result,
            self.right_result,
            self.absolute_difference,
            self.are_equal
        )
    }
}

// ============================================================================
// Associativity Trace
// ============================================================================

/// Step-by-step view of one evaluation, with an exact reference.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssociativityTrace {
    /// Operands after rounding to their own precisions
    pub operands: [Operand; 3],
    /// `a + b`, rounded
    pub left_partial: Operand,
    /// `b + c`, rounded
    pub right_partial: Operand,
    /// Final values and comparison
    pub result: AssociativityResult,
    /// Exact sum of the (rounded) operands, correctly rounded to binary64
    pub exact_sum: f64,
    /// `|left_result - exact_sum|`
    pub left_error: f64,
    /// `|right_result - exact_sum|`
    pub right_error: f64,
    /// Representable values between the two results; `None` when NaN is involved
    pub ulp_distance: Option<u64>,
}

impl AssociativityTrace {
    pub fn new(
        operands: [Operand; 3],
        left_partial: Operand,
        right_partial: Operand,
        result: AssociativityResult,
        exact_sum: f64,
    ) -> Self {
        Self {
            operands,
            left_partial,
            right_partial,
            result,
            exact_sum,
            left_error: (result.left_result - exact_sum).abs(),
            right_error: (result.right_result - exact_sum).abs(),
            ulp_distance: ulp_distance(result.left_result, result.right_result, result.precision),
        }
    }

    /// Partial sum computed first by a grouping.
    #[inline]
    pub fn partial(&self, grouping: Grouping) -> Operand {
        match grouping {
            Grouping::Left => self.left_partial,
            Grouping::Right => self.right_partial,
        }
    }

    /// Whether a grouping reproduced the exact sum rounded to the result's
    /// precision, the best any grouping can achieve in that format.
    #[inline]
    pub fn matches_exact(&self, grouping: Grouping) -> bool {
        self.result.result(grouping) == self.result.precision.round(self.exact_sum)
    }

    /// Whether at least one grouping drifted from the exact sum.
    #[inline]
    pub fn lost_precision(&self) -> bool {
        !self.matches_exact(Grouping::Left) || !self.matches_exact(Grouping::Right)
    }

    /// The grouping closer to the exact sum, or `None` on a tie or NaN.
    pub fn better_grouping(&self) -> Option<Grouping> {
        if self.left_error < self.right_error {
            Some(Grouping::Left)
        } else if self.right_error < self.left_error {
            Some(Grouping::Right)
        } else {
            None
        }
    }
}

impl fmt::Display for AssociativityTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.operands;
        writeln!(f, "a = {}, b = {}, c = {}", a, b, c)?;
        writeln!(
            f,
            "(a + b) + c: a + b = {:e}, then + c = {:e}",
            self.left_partial.value(),
            self.result.left_result
        )?;
        writeln!(
            f,
            "a + (b + c): b + c = {:e}, then a + = {:e}",
            self.right_partial.value(),
            self.result.right_result
        )?;
        write!(
            f,
            "exact = {:e}, difference = {:e}, equal = {}",
            self.exact_sum, self.result.absolute_difference, self.result.are_equal
        )
    }
}
