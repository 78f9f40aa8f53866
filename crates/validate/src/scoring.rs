//! Peak timing and magnitude scores, and the timing shift correction.

use creek_stats::{mean, pearson_correlation, shift_hold};

use crate::pairing::PeakPair;

/// Mean `t_observed - t_estimated` (h) over matched pairs.
pub fn mean_peak_anticipation(pairs: &[PeakPair]) -> Option<f64> {
    let shifts: Vec<f64> = pairs.iter().filter_map(|p| p.time_shift_hours).collect();
    mean(&shifts)
}

/// Mean `estimated - observed` level (m) over matched pairs.
pub fn mean_peak_error(pairs: &[PeakPair]) -> Option<f64> {
    let errors: Vec<f64> = pairs.iter().filter_map(|p| p.level_error).collect();
    mean(&errors)
}

/// Number of samples to delay the estimated series by.
///
/// A defined, non-negative anticipation is used as is; otherwise the basin's
/// default shift applies. Half-sample shifts round to the even count.
pub fn shift_samples(anticipation_hours: Option<f64>, default_shift_hours: f64, intervals_per_hour: f64) -> isize {
    let hours = match anticipation_hours {
        Some(a) if a >= 0.0 => a,
        _ => default_shift_hours,
    };
    (hours * intervals_per_hour).round_ties_even() as isize
}

/// Pearson correlation after delaying `estimated` by `lag` samples.
///
/// Shifted-in samples repeat the first estimated value.
pub fn shifted_correlation(observed: &[f64], estimated: &[f64], lag: isize) -> Option<f64> {
    let shifted = shift_hold(estimated, lag);
    pearson_correlation(observed, &shifted)
}
