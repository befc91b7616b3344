// ============================================================================
// Precision
// IEEE-754 binary formats used for storage and rounding
// ============================================================================

use super::errors::{ConfigError, ConfigResult};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Binary floating-point format that values and intermediates are rounded to.
///
/// All arithmetic in this crate carries `f64` values; a `Float32` tag means
/// the value is exactly representable as an `f32` and every operation on it
/// is performed in native `f32` arithmetic before being widened back.
///
/// Variants are ordered by width, so `Float32 < Float64`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Precision {
    /// IEEE-754 binary32 (single precision, 24-bit significand)
    Float32,
    /// IEEE-754 binary64 (double precision, 53-bit significand)
    #[default]
    Float64,
}

impl Precision {
    /// Both supported precisions, narrowest first.
    pub const ALL: [Precision; 2] = [Precision::Float32, Precision::Float64];

    /// Storage width in bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        match self {
            Precision::Float32 => 32,
            Precision::Float64 => 64,
        }
    }

    /// Explicitly stored significand bits (the hidden bit excluded).
    #[inline]
    pub const fn mantissa_bits(self) -> u32 {
        match self {
            Precision::Float32 => f32::MANTISSA_DIGITS - 1,
            Precision::Float64 => f64::MANTISSA_DIGITS - 1,
        }
    }

    /// Machine epsilon: the gap between 1.0 and the next representable value.
    #[inline]
    pub fn epsilon(self) -> f64 {
        match self {
            Precision::Float32 => f64::from(f32::EPSILON),
            Precision::Float64 => f64::EPSILON,
        }
    }

    /// Largest consecutive integer that is exactly representable (2^significand).
    #[inline]
    pub fn max_exact_integer(self) -> f64 {
        match self {
            Precision::Float32 => 16_777_216.0,
            Precision::Float64 => 9_007_199_254_740_992.0,
        }
    }

    /// The wider of two precisions; the format a mixed addition is rounded to.
    #[inline]
    pub fn wider(self, other: Precision) -> Precision {
        self.max(other)
    }

    /// Round a binary64 value to this precision (round-to-nearest-even).
    ///
    /// Values beyond the `f32` range become infinities; NaN stays NaN.
    #[inline]
    pub fn round(self, value: f64) -> f64 {
        match self {
            Precision::Float32 => f64::from(value as f32),
            Precision::Float64 => value,
        }
    }

    /// Add two values in this precision, rounding once to this precision.
    ///
    /// For `Float32` both inputs are narrowed first and the sum is computed in
    /// `f32`, so no binary64 intermediate ever reaches the result.
    #[inline]
    pub fn add(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Precision::Float32 => f64::from(lhs as f32 + rhs as f32),
            Precision::Float64 => lhs + rhs,
        }
    }

    /// Unit in the last place at `value`: the distance from `|value|` to the
    /// next representable magnitude away from zero.
    ///
    /// At the largest finite value the gap to the previous value is returned
    /// instead. Values that are not finite once rounded to this precision
    /// (NaN, infinities, and for `Float32` anything beyond the `f32` range)
    /// give NaN.
    pub fn ulp(self, value: f64) -> f64 {
        if !self.round(value).is_finite() {
            return f64::NAN;
        }
        match self {
            Precision::Float32 => {
                let x = (value as f32).abs();
                if x == f32::MAX {
                    f64::from(x - x.next_down())
                } else {
                    f64::from(x.next_up() - x)
                }
            },
            Precision::Float64 => {
                let x = value.abs();
                if x == f64::MAX {
                    x - x.next_down()
                } else {
                    x.next_up() - x
                }
            },
        }
    }

    /// Whether `value` survives a round trip through this precision unchanged.
    #[inline]
    pub fn is_representable(self, value: f64) -> bool {
        let rounded = self.round(value);
        rounded.to_bits() == value.to_bits() || (value.is_nan() && rounded.is_nan())
    }

    /// Canonical lowercase tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Precision::Float32 => "float32",
            Precision::Float64 => "float64",
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Precision {
    type Err = ConfigError;

    /// Parse a precision tag.
    ///
    /// # Examples
    /// - "float32", "f32", "single", "32" -> Float32
    /// - "float64", "f64", "double", "64" -> Float64
    fn from_str(s: &str) -> ConfigResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "float32" | "f32" | "single" | "32" => Ok(Precision::Float32),
            "float64" | "f64" | "double" | "64" => Ok(Precision::Float64),
            _ => Err(ConfigError::UnknownPrecision(s.to_string())),
        }
    }
}
