// ============================================================================
// Numeric Module
// IEEE-754 precision model and exact-arithmetic helpers
// ============================================================================
//
// This module provides:
// - Precision: the binary32 / binary64 formats values are rounded to
// - Operand: a value tagged with its precision (mixed-precision promotion)
// - exact_sum / two_sum / ulp_distance: reference arithmetic used to judge
//   how far a rounded result drifted
// - ConfigError: error types for parsing and configuration
//
// Design principles:
// - Every rounding step is explicit and happens at a named precision
// - Binary32 arithmetic runs in native f32, never through a wider intermediate
// - Special values (NaN, infinities) flow through without validation

mod errors;
mod exact;
mod operand;
mod precision;

pub use errors::{ConfigError, ConfigResult};
pub use exact::{exact_sum, two_sum, ulp_distance};
pub use operand::{ConversionLoss, Operand};
pub use precision::Precision;
