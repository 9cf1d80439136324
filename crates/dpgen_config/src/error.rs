//! Error types for configuration parsing and validation.

/// A configuration rejected before generation starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A count lies outside its accepted range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    CountOutOfRange {
        /// Field name.
        field: &'static str,
        /// Value supplied.
        value: u32,
        /// Inclusive lower bound.
        min: u32,
        /// Inclusive upper bound.
        max: u32,
    },

    /// A `[min, max]` width pair is empty or leaves `1..=MAX_WIDTH`.
    #[error("invalid {field} range: min {min}, max {max}")]
    InvalidWidthRange {
        /// Which range (`input width` or `output width`).
        field: &'static str,
        /// Lower bound supplied.
        min: u32,
        /// Upper bound supplied.
        max: u32,
    },

    /// A weight is negative or not a finite number.
    #[error("weight '{0}' must be a finite, non-negative number")]
    NegativeWeight(String),

    /// The operator-family weights sum to zero.
    #[error("total operation weight must be positive")]
    NonPositiveCategoryWeight,

    /// A family with positive weight has no positive operator weight.
    #[error("{0} operators all have zero weight but the category can be drawn")]
    EmptyOperatorWeights(String),

    /// Any other rejected value.
    #[error("validation error: {0}")]
    ValidationError(String),
}
