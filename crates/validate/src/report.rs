//! Validation report and its JSON form.

use serde::Serialize;

use crate::error::ValidateError;
use crate::pairing::PeakPair;

/// Data-quality condition that left some metrics undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationWarning {
    /// Estimated series is constant; correlations are undefined.
    DegenerateEstimated,
    /// Observed series is constant; correlations are undefined.
    DegenerateObserved,
    /// No peak passed the filters in the observed series.
    NoObservedPeaks,
    /// No peak passed the filters in the estimated series.
    NoEstimatedPeaks,
    /// Peaks exist in both series but none fell inside the pairing window.
    NoMatchedPeaks,
}

/// Scores of one simulated event against observations.
///
/// Undefined metrics are `None` and serialise as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Number of aligned samples scored.
    pub n_samples: usize,
    pub correlation: Option<f64>,
    /// Correlation after delaying the estimate by `shift_samples`.
    pub shifted_correlation: Option<f64>,
    /// Root-mean-square error (m).
    pub rmse: Option<f64>,
    /// Mean `estimated - observed` peak level (m).
    pub mean_peak_error: Option<f64>,
    /// Mean `t_observed - t_estimated` (h); positive when the estimate leads.
    pub mean_peak_anticipation: Option<f64>,
    pub shift_samples: isize,
    pub n_observed_peaks: usize,
    pub n_estimated_peaks: usize,
    /// Every estimated peak, matched or not.
    pub pairs: Vec<PeakPair>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Pairs that found an observed peak.
    pub fn matched_pairs(&self) -> impl Iterator<Item = &PeakPair> {
        self.pairs.iter().filter(|p| p.is_matched())
    }

    pub fn has_warning(&self, warning: ValidationWarning) -> bool {
        self.warnings.contains(&warning)
    }
}

/// Serialise a value to pretty-printed JSON.
///
/// # Errors
///
/// Returns [`ValidateError::Serialization`] if serialisation fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, ValidateError> {
    serde_json::to_string_pretty(value).map_err(|e| ValidateError::Serialization {
        reason: e.to_string(),
    })
}
