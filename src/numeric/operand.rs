// ============================================================================
// Operand
// A value tagged with the binary format it is stored in
// ============================================================================

use super::errors::{ConfigError, ConfigResult};
use super::precision::Precision;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A floating-point value together with the precision it lives in.
///
/// Construction rounds the value to its precision, so a `Float32` operand
/// never carries bits that an `f32` could not hold. Adding two operands
/// rounds at the wider of the two precisions, which is the promotion rule
/// mixed-precision evaluation relies on.
///
/// # Example
/// ```
/// use float_associativity::numeric::{Operand, Precision};
///
/// let a = Operand::float32(16_777_216.0);
/// let b = Operand::float64(1.0);
///
/// // float32 + float64 is computed and rounded in float64
/// let sum = a.add(b);
/// assert_eq!(sum.precision(), Precision::Float64);
/// assert_eq!(sum.value(), 16_777_217.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "OperandRepr"))]
pub struct Operand {
    value: f64,
    precision: Precision,
}

impl Operand {
    /// Create an operand, rounding `value` to `precision`.
    #[inline]
    pub fn new(value: f64, precision: Precision) -> Self {
        Self {
            value: precision.round(value),
            precision,
        }
    }

    /// Single-precision operand.
    #[inline]
    pub fn float32(value: f64) -> Self {
        Self::new(value, Precision::Float32)
    }

    /// Double-precision operand.
    #[inline]
    pub fn float64(value: f64) -> Self {
        Self::new(value, Precision::Float64)
    }

    #[inline]
    pub const fn value(self) -> f64 {
        self.value
    }

    #[inline]
    pub const fn precision(self) -> Precision {
        self.precision
    }

    /// Add two operands, rounding once at the wider of their precisions.
    #[inline]
    pub fn add(self, rhs: Operand) -> Operand {
        let precision = self.precision.wider(rhs.precision);
        Operand {
            value: precision.add(self.value, rhs.value),
            precision,
        }
    }

    /// Re-tag this operand at another precision.
    ///
    /// Widening is exact; narrowing rounds to nearest.
    #[inline]
    pub fn convert(self, precision: Precision) -> Operand {
        Operand::new(self.value, precision)
    }

    /// Unit in the last place at this operand's value and precision.
    #[inline]
    pub fn ulp(self) -> f64 {
        self.precision.ulp(self.value)
    }

    /// Measure what is lost when `value` is stored at `precision`.
    pub fn conversion_loss(value: f64, precision: Precision) -> ConversionLoss {
        let converted = precision.round(value);
        ConversionLoss {
            original: value,
            converted,
            precision,
            difference: (value - converted).abs(),
            lost: !precision.is_representable(value),
        }
    }

    /// Parse an operand literal, optionally suffixed with a precision tag.
    ///
    /// # Examples
    /// - "1e16" with default Float64 -> 1e16 @ float64
    /// - "0.1:float32" -> f32(0.1) @ float32
    /// - "-1e7:f32" -> -1e7 @ float32
    ///
    /// # Errors
    /// - `InvalidOperand` if the numeric part does not parse
    /// - `UnknownPrecision` if the tag is not recognised
    pub fn parse_with_default(s: &str, default: Precision) -> ConfigResult<Self> {
        let s = s.trim();
        let (number, precision) = match s.rsplit_once(':') {
            Some((number, tag)) => (number.trim(), tag.parse::<Precision>()?),
            None => (s, default),
        };
        let value: f64 = number
            .parse()
            .map_err(|_| ConfigError::InvalidOperand(s.to_string()))?;
        Ok(Operand::new(value, precision))
    }
}

impl std::str::FromStr for Operand {
    type Err = ConfigError;

    /// Parse with `Float64` as the default precision.
    fn from_str(s: &str) -> ConfigResult<Self> {
        Operand::parse_with_default(s, Precision::Float64)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:e} ({})", self.value, self.precision)
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct OperandRepr {
    value: f64,
    precision: Precision,
}

#[cfg(feature = "serde")]
impl From<OperandRepr> for Operand {
    fn from(repr: OperandRepr) -> Self {
        Operand::new(repr.value, repr.precision)
    }
}

// ============================================================================
// Conversion Loss
// ============================================================================

/// Outcome of storing a binary64 value at a given precision.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConversionLoss {
    /// The binary64 input
    pub original: f64,
    /// The value after rounding to `precision` and widening back
    pub converted: f64,
    /// Target precision
    pub precision: Precision,
    /// |original - converted|
    pub difference: f64,
    /// Whether the round trip changed the value
    pub lost: bool,
}

impl fmt::Display for ConversionLoss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.20} -> {} -> {:.20} (lost: {}, difference: {:e})",
            self.original, self.precision, self.converted, self.lost, self.difference
        )
    }
}
