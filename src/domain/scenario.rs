// ============================================================================
// Scenarios
// Named operand triples and the catalog of known order-dependent sums
// ============================================================================

use crate::domain::{AssociativityResult, AssociativityTrace};
use crate::engine::{evaluate_mixed, trace_mixed};
use crate::numeric::{ConfigError, ConfigResult, Operand, Precision};
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 2^24, the first integer binary32 cannot step past by one
const FLOAT32_INTEGER_LIMIT: f64 = 16_777_216.0;

// ============================================================================
// Scenario
// ============================================================================

/// A named `a + b + c` to evaluate in both groupings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scenario {
    /// Unique name within a set (e.g., "large_small_cancellation")
    pub name: String,

    /// Free-form explanation of what the scenario shows
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,

    pub a: Operand,
    pub b: Operand,
    pub c: Operand,
}

impl Scenario {
    /// Scenario whose three operands share one precision.
    pub fn uniform(name: impl Into<String>, a: f64, b: f64, c: f64, precision: Precision) -> Self {
        Self::mixed(
            name,
            Operand::new(a, precision),
            Operand::new(b, precision),
            Operand::new(c, precision),
        )
    }

    /// Scenario with individually tagged operands.
    pub fn mixed(name: impl Into<String>, a: Operand, b: Operand, c: Operand) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            a,
            b,
            c,
        }
    }

    /// Builder method: Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[inline]
    pub fn operands(&self) -> [Operand; 3] {
        [self.a, self.b, self.c]
    }

    /// Whether the operands carry different precisions.
    pub fn is_mixed(&self) -> bool {
        self.a.precision() != self.b.precision() || self.b.precision() != self.c.precision()
    }

    /// Validate the scenario
    pub fn validate(&self) -> ConfigResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyScenarioName);
        }
        Ok(())
    }

    pub fn evaluate(&self) -> AssociativityResult {
        evaluate_mixed(self.a, self.b, self.c)
    }

    pub fn trace(&self) -> AssociativityTrace {
        trace_mixed(self.a, self.b, self.c)
    }
}

// ============================================================================
// Preset Scenarios
// ============================================================================

impl Scenario {
    /// `1e16 + 1 - 1e16` in binary64
    /// - 1 is half an ULP of 1e16 and is absorbed by either grouping
    /// - Both groupings give 0, exact answer is 1
    pub fn large_small_cancellation() -> Self {
        Self::uniform("large_small_cancellation", 1e16, 1.0, -1e16, Precision::Float64)
            .with_description("Small term absorbed next to a large one in binary64")
    }

    /// `1e20 + 1 - 1e20` in binary64
    /// - Both groupings give 0, exact answer is 1
    pub fn extreme_cancellation() -> Self {
        Self::uniform("extreme_cancellation", 1e20, 1.0, -1e20, Precision::Float64)
            .with_description("Total loss of the small term regardless of grouping")
    }

    /// `1e30 + 1e-5 - 1e30` in binary64
    pub fn vast_magnitude_gap() -> Self {
        Self::uniform("vast_magnitude_gap", 1e30, 1e-5, -1e30, Precision::Float64)
            .with_description("Thirty-five orders of magnitude between the terms")
    }

    /// `1e7 + 1 - 1e7` in binary32
    /// - 1e7 is below 2^24, so every intermediate is exact
    pub fn single_precision_cancellation() -> Self {
        Self::uniform(
            "single_precision_cancellation",
            1e7,
            1.0,
            -1e7,
            Precision::Float32,
        )
        .with_description("Integers below 2^24 stay exact in binary32")
    }

    /// `1e8 + 1 - 1e8` in binary32
    /// - ULP at 1e8 is 8, so both groupings lose the 1
    pub fn single_precision_absorption() -> Self {
        Self::uniform(
            "single_precision_absorption",
            1e8,
            1.0,
            -1e8,
            Precision::Float32,
        )
        .with_description("Small term absorbed next to a large one in binary32")
    }

    /// `2^24 + 1 - 2^24` in binary32
    /// - Left grouping loses the 1 (tie rounds to even), right keeps it
    pub fn integer_boundary() -> Self {
        Self::uniform(
            "integer_boundary",
            FLOAT32_INTEGER_LIMIT,
            1.0,
            -FLOAT32_INTEGER_LIMIT,
            Precision::Float32,
        )
        .with_description("Groupings disagree at the binary32 integer limit")
    }

    /// `0.1 + 0.2 + 0.3` in binary64
    pub fn decimal_fractions() -> Self {
        Self::uniform("decimal_fractions", 0.1, 0.2, 0.3, Precision::Float64)
            .with_description("Decimal fractions round differently per grouping")
    }

    /// `f32(1e7) + f64(0.001) + f32(-1e7)`
    pub fn promoted_small_term() -> Self {
        Self::mixed(
            "promoted_small_term",
            Operand::float32(1e7),
            Operand::float64(0.001),
            Operand::float32(-1e7),
        )
        .with_description("Binary32 operands promoted by a binary64 small term")
    }

    /// `f32(2^24) + f64(1) + f32(-2^24)`
    /// - Promotion to binary64 keeps the 1 in both groupings
    pub fn promoted_integer_boundary() -> Self {
        Self::mixed(
            "promoted_integer_boundary",
            Operand::float32(FLOAT32_INTEGER_LIMIT),
            Operand::float64(1.0),
            Operand::float32(-FLOAT32_INTEGER_LIMIT),
        )
        .with_description("Promotion hides the binary32 integer limit")
    }

    /// `f64(1e8) + f32(0.1) + f64(-1e8)`
    /// - 0.1 is rounded to binary32 before any addition happens
    pub fn narrowed_small_term() -> Self {
        Self::mixed(
            "narrowed_small_term",
            Operand::float64(1e8),
            Operand::float32(0.1),
            Operand::float64(-1e8),
        )
        .with_description("Small term already rounded to binary32 before summation")
    }
}

// ============================================================================
// Scenario Set
// ============================================================================

/// Ordered collection of scenarios with unique names.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ScenarioSet {
    scenarios: Vec<Scenario>,
}

impl ScenarioSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every preset scenario, in catalog order.
    pub fn builtin() -> Self {
        Self {
            scenarios: vec![
                Scenario::large_small_cancellation(),
                Scenario::extreme_cancellation(),
                Scenario::vast_magnitude_gap(),
                Scenario::single_precision_cancellation(),
                Scenario::single_precision_absorption(),
                Scenario::integer_boundary(),
                Scenario::decimal_fractions(),
                Scenario::promoted_small_term(),
                Scenario::promoted_integer_boundary(),
                Scenario::narrowed_small_term(),
            ],
        }
    }

    /// Add a scenario.
    ///
    /// # Errors
    /// - `EmptyScenarioName` if the scenario has no name
    /// - `DuplicateScenario` if the name is already taken
    pub fn push(&mut self, scenario: Scenario) -> ConfigResult<()> {
        scenario.validate()?;
        if self.get(&scenario.name).is_some() {
            return Err(ConfigError::DuplicateScenario(scenario.name));
        }
        self.scenarios.push(scenario);
        Ok(())
    }

    /// Builder method: Add a scenario
    pub fn with(mut self, scenario: Scenario) -> ConfigResult<Self> {
        self.push(scenario)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Scenario> {
        self.scenarios.iter()
    }

    /// Validate every scenario and name uniqueness
    pub fn validate(&self) -> ConfigResult<()> {
        let mut seen = HashSet::with_capacity(self.scenarios.len());
        for scenario in &self.scenarios {
            scenario.validate()?;
            if !seen.insert(scenario.name.as_str()) {
                return Err(ConfigError::DuplicateScenario(scenario.name.clone()));
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ScenarioSet {
    type Item = &'a Scenario;
    type IntoIter = std::slice::Iter<'a, Scenario>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenarios.iter()
    }
}

#[cfg(feature = "serde")]
impl ScenarioSet {
    /// Load and validate a scenario set from JSON.
    ///
    /// The document is an array of scenarios; each operand is an object with
    /// `value` and `precision` ("float32" or "float64").
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let set: ScenarioSet =
            serde_json::from_str(json).map_err(|e| ConfigError::Serialization(e.to_string()))?;
        set.validate()?;
        Ok(set)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// Non-finite operands have no JSON representation and are written as `null`.
    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialization(e.to_string()))
    }
}
