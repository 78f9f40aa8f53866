//! # creek-validate
//!
//! Compares a simulated level series against observed gauge readings: finds
//! peaks in both, pairs them inside an asymmetric time window and scores
//! the simulation with plain and shift-corrected correlation, RMSE and mean
//! peak timing and magnitude errors.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `config` | Peak thresholds and pairing window |
//! | `series` | Timestamped series and their alignment |
//! | `peaks` | Local-maximum detection |
//! | `pairing` | Estimated-to-observed peak pairing |
//! | `scoring` | Peak means and the timing shift correction |
//! | `report` | Per-event report and JSON output |
//! | `summary` | Aggregate over many events |

mod config;
mod error;
mod pairing;
mod peaks;
mod report;
mod scoring;
mod series;
mod summary;

use creek_stats::{is_constant, pearson_correlation, rmse};
use tracing::{debug, warn};

pub use config::ValidateConfig;
pub use error::ValidateError;
pub use pairing::{PeakPair, pair_peaks};
pub use peaks::{Peak, detect_peaks, find_peak_indices};
pub use report::{ValidationReport, ValidationWarning, to_json};
pub use scoring::{mean_peak_anticipation, mean_peak_error, shift_samples, shifted_correlation};
pub use series::{AlignedSeries, LevelSeries, align};
pub use summary::{MetricSummary, ScoreSummary};

/// Validate an estimated level series against an observed one.
///
/// Both series are aligned on their common timestamps (missing observed
/// values dropped). `default_shift_hours` is the basin's timing correction
/// used when the mean peak anticipation is negative or undefined.
///
/// # Errors
///
/// Returns [`ValidateError::InvalidConfig`] for an invalid `config` or
/// default shift, and [`ValidateError::InsufficientData`] when the
/// estimated series has no interval or fewer than two aligned samples
/// remain.
pub fn validate(
    observed: &LevelSeries,
    estimated: &LevelSeries,
    config: &ValidateConfig,
    default_shift_hours: f64,
) -> Result<ValidationReport, ValidateError> {
    config.validate()?;
    if !(default_shift_hours.is_finite() && default_shift_hours >= 0.0) {
        return Err(ValidateError::InvalidConfig {
            name: "default_shift_hours",
            reason: format!("must be finite and >= 0, got {default_shift_hours}"),
        });
    }
    let intervals_per_hour = 1.0 / estimated.interval_hours()?;

    let aligned = align(observed, estimated);
    if aligned.len() < 2 {
        return Err(ValidateError::InsufficientData {
            what: "aligned series",
            n: aligned.len(),
            min: 2,
        });
    }

    // Step 1: Peaks and pairs
    let obs_peaks = detect_peaks(&aligned.timestamps, &aligned.observed, config);
    let est_peaks = detect_peaks(&aligned.timestamps, &aligned.estimated, config);
    let pairs = pair_peaks(
        &est_peaks,
        &obs_peaks,
        config.window_low_hours(),
        config.window_high_hours(),
    );
    debug!(
        n_observed = obs_peaks.len(),
        n_estimated = est_peaks.len(),
        n_matched = pairs.iter().filter(|p| p.is_matched()).count(),
        "peaks paired"
    );

    let mut warnings = Vec::new();
    if obs_peaks.is_empty() {
        warnings.push(ValidationWarning::NoObservedPeaks);
    }
    if est_peaks.is_empty() {
        warnings.push(ValidationWarning::NoEstimatedPeaks);
    }
    if !obs_peaks.is_empty() && !est_peaks.is_empty() && !pairs.iter().any(PeakPair::is_matched) {
        warnings.push(ValidationWarning::NoMatchedPeaks);
    }

    // Step 2: Peak means and shift
    let anticipation = mean_peak_anticipation(&pairs);
    let peak_error = mean_peak_error(&pairs);
    let shift = shift_samples(anticipation, default_shift_hours, intervals_per_hour);

    // Step 3: Series scores
    let degenerate_est = is_constant(&aligned.estimated);
    let degenerate_obs = is_constant(&aligned.observed);
    if degenerate_est {
        warn!(n = aligned.len(), "estimated series is constant, correlation undefined");
        warnings.push(ValidationWarning::DegenerateEstimated);
    }
    if degenerate_obs {
        warn!(n = aligned.len(), "observed series is constant, correlation undefined");
        warnings.push(ValidationWarning::DegenerateObserved);
    }
    let (correlation, shifted) = if degenerate_est || degenerate_obs {
        (None, None)
    } else {
        (
            pearson_correlation(&aligned.observed, &aligned.estimated),
            shifted_correlation(&aligned.observed, &aligned.estimated, shift),
        )
    };

    Ok(ValidationReport {
        n_samples: aligned.len(),
        correlation,
        shifted_correlation: shifted,
        rmse: rmse(&aligned.observed, &aligned.estimated),
        mean_peak_error: peak_error,
        mean_peak_anticipation: anticipation,
        shift_samples: shift,
        n_observed_peaks: obs_peaks.len(),
        n_estimated_peaks: est_peaks.len(),
        pairs,
        warnings,
    })
}
