//! Statistical helper functions for comparing water-level series.

/// Arithmetic mean of a slice. Returns `None` if empty.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let sum: f64 = data.iter().sum();
    Some(sum / data.len() as f64)
}

/// Returns `true` if every value equals the first one (or the slice is empty).
pub fn is_constant(data: &[f64]) -> bool {
    match data.first() {
        Some(&first) => data.iter().all(|&v| v == first),
        None => true,
    }
}

/// Root-mean-square difference `sqrt(mean((a - b)^2))` over paired samples.
///
/// Pairs where either side is non-finite are skipped. Returns `None` if no
/// finite pair remains.
pub fn rmse(a: &[f64], b: &[f64]) -> Option<f64> {
    let sq: Vec<f64> = a
        .iter()
        .zip(b.iter())
        .filter(|(ai, bi)| ai.is_finite() && bi.is_finite())
        .map(|(ai, bi)| (ai - bi) * (ai - bi))
        .collect();
    mean(&sq).map(f64::sqrt)
}

/// Pearson correlation between two index-aligned level series.
///
/// Samples where either level is missing (NaN) are skipped. A flat series
/// has no defined correlation, so `None` is returned for it and for fewer
/// than 3 usable samples.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(xi, yi)| xi.is_finite() && yi.is_finite())
        .map(|(xi, yi)| (*xi, *yi))
        .collect();

    if pairs.len() < 3 {
        return None;
    }

    let n = pairs.len() as f64;
    let mx: f64 = pairs.iter().map(|(xi, _)| xi).sum::<f64>() / n;
    let my: f64 = pairs.iter().map(|(_, yi)| yi).sum::<f64>() / n;

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for &(xi, yi) in &pairs {
        let dx = xi - mx;
        let dy = yi - my;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        sum_yy += dy * dy;
    }

    let denom = (sum_xx * sum_yy).sqrt();
    if denom == 0.0 {
        return None;
    }

    Some(sum_xy / denom)
}

/// Shift a series by `lag` samples, holding the edge value.
///
/// A positive `lag` delays the series (`out[i] = data[i - lag]`) and fills
/// the first `lag` samples with `data[0]`; a negative `lag` advances it and
/// fills the tail with the last value. The output has the input's length.
pub fn shift_hold(data: &[f64], lag: isize) -> Vec<f64> {
    let n = data.len();
    if n == 0 || lag == 0 {
        return data.to_vec();
    }
    let first = data[0];
    let last = data[n - 1];
    (0..n as isize)
        .map(|i| {
            let src = i - lag;
            if src < 0 {
                first
            } else if src >= n as isize {
                last
            } else {
                data[src as usize]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_of_levels() {
        let levels = [0.1, 0.3, 0.8, 1.2, 0.6];
        assert_relative_eq!(mean(&levels).unwrap(), 0.6, epsilon = 1e-12);
        assert!(mean(&[]).is_none());
    }

    #[test]
    fn constant_series() {
        assert!(is_constant(&[-0.2, -0.2, -0.2]));
        assert!(is_constant(&[]));
        assert!(!is_constant(&[-0.2, -0.1]));
    }

    #[test]
    fn rmse_of_level_errors() {
        let observed = [0.2, 0.5, 0.9];
        let estimated = [0.2, 0.5, 1.1];
        assert_relative_eq!(
            rmse(&observed, &estimated).unwrap(),
            (0.04f64 / 3.0).sqrt(),
            epsilon = 1e-12
        );
        assert!(rmse(&[], &[]).is_none());
    }

    #[test]
    fn correlation_of_scaled_hydrograph() {
        let observed = [0.0, 0.4, 1.1, 0.7, 0.3];
        let estimated: Vec<f64> = observed.iter().map(|h| 2.0 * h - 0.2).collect();
        assert_relative_eq!(
            pearson_correlation(&observed, &estimated).unwrap(),
            1.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn correlation_of_inverted_hydrograph() {
        let observed = [0.0, 0.4, 1.1, 0.7];
        let estimated = [1.1, 0.7, 0.0, 0.4];
        let r = pearson_correlation(&observed, &estimated).unwrap();
        assert!(r < -0.8);
    }

    #[test]
    fn correlation_needs_three_pairs() {
        assert!(pearson_correlation(&[0.2, 0.9], &[0.3, 1.0]).is_none());
        // only two finite pairs remain
        let a = [0.2, f64::NAN, 0.9, 0.5];
        let b = [0.3, 0.6, 1.0, f64::NAN];
        assert!(pearson_correlation(&a, &b).is_none());
    }

    #[test]
    fn correlation_of_flat_series_is_undefined() {
        let observed = [0.1, 0.4, 0.9, 0.3];
        let flat = [-0.2; 4];
        assert!(pearson_correlation(&observed, &flat).is_none());
    }

    #[test]
    fn test_shift_hold_delay() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(shift_hold(&data, 2), vec![1.0, 1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_shift_hold_advance() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(shift_hold(&data, -1), vec![2.0, 3.0, 4.0, 4.0]);
    }

    #[test]
    fn test_shift_hold_beyond_length() {
        let data = [1.0, 2.0, 3.0];
        assert_eq!(shift_hold(&data, 5), vec![1.0, 1.0, 1.0]);
        assert!(shift_hold(&[], 3).is_empty());
    }
}
