//! Error types for the creek-basin crate.

/// Error type for all fallible operations in the creek-basin crate.
///
/// Every variant is a configuration error: it aborts the run that asked for
/// the profile rather than falling back to another basin.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BasinError {
    /// Returned when a basin identifier is not one of the known basins.
    #[error("unknown basin identifier: '{name}'")]
    UnknownBasin {
        /// The identifier as supplied.
        name: String,
    },

    /// Returned when a known basin has no profile registered in the catalog.
    #[error("no profile registered for basin '{basin}'")]
    MissingProfile {
        /// The basin that could not be resolved.
        basin: String,
    },

    /// Returned when a month value is outside 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month value.
        month: u32,
    },

    /// Returned when the monthly interception table does not hold 12 entries.
    #[error("interception table has {got} monthly entries, expected 12")]
    IncompleteInterception {
        /// Number of entries supplied.
        got: usize,
    },

    /// Returned when a profile parameter is out of range.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the problem.
        reason: String,
    },
}

impl BasinError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
