//! Pairing of estimated peaks with observed peaks.

use serde::Serialize;

use crate::peaks::Peak;
use crate::series::hours_between;

/// An estimated peak and the observed peak it was matched to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakPair {
    pub estimated: Peak,
    pub observed: Option<Peak>,
    /// `t_observed - t_estimated` (h); positive when the estimate leads.
    pub time_shift_hours: Option<f64>,
    /// `estimated - observed` level (m).
    pub level_error: Option<f64>,
}

impl PeakPair {
    pub fn is_matched(&self) -> bool {
        self.observed.is_some()
    }
}

/// Pairs every estimated peak with the nearest observed peak whose offset
/// `t_observed - t_estimated` lies in `[low_hours, high_hours]`.
///
/// Equidistant candidates resolve to the earlier observed peak. An observed
/// peak may serve several estimated peaks. Estimated peaks without a
/// candidate are returned unmatched.
pub fn pair_peaks(estimated: &[Peak], observed: &[Peak], low_hours: f64, high_hours: f64) -> Vec<PeakPair> {
    estimated
        .iter()
        .map(|est| {
            let mut best: Option<(&Peak, f64)> = None;
            for obs in observed {
                let shift = hours_between(est.timestamp, obs.timestamp);
                if shift < low_hours || shift > high_hours {
                    continue;
                }
                match best {
                    Some((b, d))
                        if d.abs() < shift.abs()
                            || (d.abs() == shift.abs() && b.timestamp <= obs.timestamp) => {}
                    _ => best = Some((obs, shift)),
                }
            }
            match best {
                Some((obs, shift)) => PeakPair {
                    estimated: *est,
                    observed: Some(*obs),
                    time_shift_hours: Some(shift),
                    level_error: Some(est.value - obs.value),
                },
                None => PeakPair {
                    estimated: *est,
                    observed: None,
                    time_shift_hours: None,
                    level_error: None,
                },
            }
        })
        .collect()
}
