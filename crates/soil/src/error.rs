//! Error types for the creek-soil crate.

use creek_basin::BasinError;

/// Error type for all fallible operations in the creek-soil crate.
///
/// The per-sample step itself never fails; these errors guard the run-level
/// preconditions checked before the first step.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SoilError {
    /// Returned when the sample interval is zero, negative or non-finite.
    #[error("sample interval must be positive, got {seconds} s")]
    NonPositiveInterval {
        /// Interval in seconds.
        seconds: f64,
    },

    /// Returned when too few samples are supplied to derive the interval.
    #[error("insufficient samples: got {n}, need at least {min}")]
    InsufficientSamples {
        /// Number of samples provided.
        n: usize,
        /// Minimum required.
        min: usize,
    },

    /// Returned when no initial soil seed is supplied.
    #[error("no soil seed supplied for the first day of the run")]
    MissingSeed,

    /// Returned when a precipitation sample is NaN or infinite.
    #[error("precipitation at sample {index} is not finite: {value}")]
    NonFinitePrecipitation {
        /// Sample index.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Wraps a basin configuration error.
    #[error(transparent)]
    Basin(#[from] BasinError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_non_positive_interval() {
        let e = SoilError::NonPositiveInterval { seconds: 0.0 };
        assert_eq!(e.to_string(), "sample interval must be positive, got 0 s");
    }

    #[test]
    fn error_insufficient_samples() {
        let e = SoilError::InsufficientSamples { n: 1, min: 2 };
        assert_eq!(e.to_string(), "insufficient samples: got 1, need at least 2");
    }

    #[test]
    fn error_missing_seed() {
        assert_eq!(
            SoilError::MissingSeed.to_string(),
            "no soil seed supplied for the first day of the run"
        );
    }

    #[test]
    fn error_non_finite_precipitation() {
        let e = SoilError::NonFinitePrecipitation {
            index: 7,
            value: f64::NAN,
        };
        assert_eq!(e.to_string(), "precipitation at sample 7 is not finite: NaN");
    }

    #[test]
    fn error_wraps_basin() {
        let e: SoilError = BasinError::InvalidMonth { month: 0 }.into();
        assert_eq!(e.to_string(), "invalid month: 0 (must be 1..=12)");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<SoilError>();
    }
}
