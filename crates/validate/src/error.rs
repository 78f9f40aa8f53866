//! Error types for the creek-validate crate.

/// Errors that can occur during validation.
///
/// Data-quality conditions (constant series, no peaks) are not errors: they
/// are recorded as warnings in the report.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidateError {
    /// A configuration value is out of range.
    #[error("invalid validation config '{name}': {reason}")]
    InvalidConfig {
        /// Name of the offending setting.
        name: &'static str,
        /// Description of the problem.
        reason: String,
    },

    /// Timestamps and values of a series differ in length.
    #[error("series length mismatch: {timestamps} timestamps, {values} values")]
    LengthMismatch { timestamps: usize, values: usize },

    /// Timestamps of a series are not strictly increasing.
    #[error("series timestamps not strictly increasing at index {index}")]
    UnorderedTimestamps { index: usize },

    /// Too few samples to derive an interval or align the series.
    #[error("insufficient data for {what}: got {n}, need at least {min}")]
    InsufficientData {
        what: &'static str,
        n: usize,
        min: usize,
    },

    /// JSON serialization failed.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

impl ValidateError {
    pub(crate) fn config(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            name,
            reason: reason.into(),
        }
    }
}
