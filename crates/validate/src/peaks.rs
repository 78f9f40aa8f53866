//! Local-maximum detection with height, separation and prominence filters.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::ValidateConfig;

/// A detected peak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Peak {
    /// Sample index in the series the peak was found in.
    pub index: usize,
    pub timestamp: NaiveDateTime,
    /// Level at the peak (m).
    pub value: f64,
}

/// Indices of the peaks of `x`, ascending.
///
/// A peak is a strict local maximum; flat tops count once, at the middle
/// sample (left of centre for even lengths). Series edges are never peaks.
/// Filters, in order: `value >= min_height`; at least `min_width` samples
/// from any higher accepted peak; prominence `>= min_prominence`.
pub fn find_peak_indices(x: &[f64], min_height: f64, min_prominence: f64, min_width: usize) -> Vec<usize> {
    // 1. Local maxima, plateaus reduced to their midpoint.
    let mut peaks = local_maxima(x);

    // 2. Height.
    peaks.retain(|&i| x[i] >= min_height);

    // 3. Separation, highest first.
    if min_width > 1 {
        peaks = select_by_distance(x, &peaks, min_width);
    }

    // 4. Prominence.
    peaks.retain(|&i| prominence(x, i) >= min_prominence);
    peaks
}

/// Peaks of a timestamped level series under the thresholds of `config`.
pub fn detect_peaks(timestamps: &[NaiveDateTime], values: &[f64], config: &ValidateConfig) -> Vec<Peak> {
    find_peak_indices(
        values,
        config.min_height(),
        config.min_prominence(),
        config.min_width(),
    )
    .into_iter()
    .map(|index| Peak {
        index,
        timestamp: timestamps[index],
        value: values[index],
    })
    .collect()
}

fn local_maxima(x: &[f64]) -> Vec<usize> {
    let mut out = Vec::new();
    if x.len() < 3 {
        return out;
    }
    let last = x.len() - 1;
    let mut i = 1;
    while i < last {
        if x[i - 1] < x[i] {
            let mut ahead = i + 1;
            while ahead < last && x[ahead] == x[i] {
                ahead += 1;
            }
            if x[ahead] < x[i] {
                out.push((i + ahead - 1) / 2);
                i = ahead;
                continue;
            }
        }
        i += 1;
    }
    out
}

fn select_by_distance(x: &[f64], peaks: &[usize], distance: usize) -> Vec<usize> {
    // Stable sort keeps the earlier peak first among equal heights.
    let mut order: Vec<usize> = (0..peaks.len()).collect();
    order.sort_by(|&a, &b| {
        x[peaks[b]]
            .partial_cmp(&x[peaks[a]])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep = vec![true; peaks.len()];
    for &k in &order {
        if !keep[k] {
            continue;
        }
        let p = peaks[k];
        for (j, &q) in peaks.iter().enumerate() {
            if j != k && keep[j] && p.abs_diff(q) < distance {
                keep[j] = false;
            }
        }
    }
    peaks
        .iter()
        .zip(keep)
        .filter_map(|(&p, k)| k.then_some(p))
        .collect()
}

/// Height of `x[peak]` above the higher of its two bases.
///
/// Each base is the minimum between the peak and the nearest strictly higher
/// sample on that side, or the series edge.
fn prominence(x: &[f64], peak: usize) -> f64 {
    let h = x[peak];

    let mut left_min = h;
    for &v in x[..peak].iter().rev() {
        if v > h {
            break;
        }
        left_min = left_min.min(v);
    }

    let mut right_min = h;
    for &v in &x[peak + 1..] {
        if v > h {
            break;
        }
        right_min = right_min.min(v);
    }

    h - left_min.max(right_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_maxima() {
        let x = [0.0, 1.0, 0.0, 2.0, 0.0];
        assert_eq!(find_peak_indices(&x, 0.0, 0.0, 1), vec![1, 3]);
    }

    #[test]
    fn edges_are_not_peaks() {
        let x = [3.0, 1.0, 0.5, 2.0];
        assert!(find_peak_indices(&x, 0.0, 0.0, 1).is_empty());
    }

    #[test]
    fn plateau_reports_middle() {
        let odd = [0.0, 1.0, 1.0, 1.0, 0.0];
        assert_eq!(find_peak_indices(&odd, 0.0, 0.0, 1), vec![2]);
        let even = [0.0, 1.0, 1.0, 1.0, 1.0, 0.0];
        assert_eq!(find_peak_indices(&even, 0.0, 0.0, 1), vec![2]);
    }

    #[test]
    fn rising_plateau_is_not_a_peak() {
        let x = [0.0, 1.0, 1.0, 2.0, 0.0];
        assert_eq!(find_peak_indices(&x, 0.0, 0.0, 1), vec![3]);
    }

    #[test]
    fn height_threshold_is_inclusive() {
        let x = [0.0, 0.2, 0.0, 0.19, 0.0];
        assert_eq!(find_peak_indices(&x, 0.2, 0.0, 1), vec![1]);
    }

    #[test]
    fn close_peaks_keep_the_highest() {
        let x = [0.0, 1.0, 0.5, 1.5, 0.0, 0.0, 0.0, 1.2, 0.0];
        assert_eq!(find_peak_indices(&x, 0.0, 0.0, 3), vec![3, 7]);
    }

    #[test]
    fn equal_heights_keep_the_earlier() {
        let x = [0.0, 1.0, 0.5, 1.0, 0.0];
        assert_eq!(find_peak_indices(&x, 0.0, 0.0, 3), vec![1]);
    }

    #[test]
    fn prominence_uses_higher_base() {
        // Peak at 3 sits between bases 0.6 (left, bounded by 1.0) and 0.0.
        let x = [0.0, 1.0, 0.6, 0.8, 0.0];
        assert!((prominence(&x, 3) - 0.2).abs() < 1e-12);
        assert!((prominence(&x, 1) - 1.0).abs() < 1e-12);
        assert_eq!(find_peak_indices(&x, 0.0, 0.25, 1), vec![1]);
    }

    #[test]
    fn short_series_has_no_peaks() {
        assert!(find_peak_indices(&[1.0, 2.0], 0.0, 0.0, 1).is_empty());
    }
}
