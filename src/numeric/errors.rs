// ============================================================================
// Configuration Errors
// Error types for parsing precisions, operands and scenario configuration
// ============================================================================

use std::fmt;

/// Errors raised while building or loading evaluation configuration.
///
/// Evaluation itself never fails; only the inputs that describe what to
/// evaluate (precision tags, operand literals, scenario sets, runner
/// settings) can be rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Precision tag is not one of the recognised spellings
    UnknownPrecision(String),
    /// Operand literal could not be parsed as a number
    InvalidOperand(String),
    /// Scenario has an empty name
    EmptyScenarioName,
    /// Two scenarios in one set share a name
    DuplicateScenario(String),
    /// Runner was configured with an unusable worker count
    InvalidWorkerCount(usize),
    /// Scenario file could not be (de)serialized
    Serialization(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownPrecision(tag) => {
                write!(f, "unknown precision '{}': expected float32 or float64", tag)
            },
            ConfigError::InvalidOperand(literal) => {
                write!(f, "invalid operand '{}': could not parse value", literal)
            },
            ConfigError::EmptyScenarioName => write!(f, "scenario name cannot be empty"),
            ConfigError::DuplicateScenario(name) => {
                write!(f, "duplicate scenario name '{}'", name)
            },
            ConfigError::InvalidWorkerCount(count) => {
                write!(f, "invalid worker count {}: at least one worker is required", count)
            },
            ConfigError::Serialization(reason) => write!(f, "serialization failed: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
