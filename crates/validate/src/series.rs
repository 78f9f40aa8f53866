//! Timestamped level series and their alignment.

use chrono::NaiveDateTime;
use std::cmp::Ordering;

use crate::error::ValidateError;

/// Level series (m) with strictly increasing timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSeries {
    timestamps: Vec<NaiveDateTime>,
    values: Vec<f64>,
}

impl LevelSeries {
    /// Creates a series. Values may be NaN for missing readings.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::LengthMismatch`] or
    /// [`ValidateError::UnorderedTimestamps`].
    pub fn new(timestamps: Vec<NaiveDateTime>, values: Vec<f64>) -> Result<Self, ValidateError> {
        if timestamps.len() != values.len() {
            return Err(ValidateError::LengthMismatch {
                timestamps: timestamps.len(),
                values: values.len(),
            });
        }
        if let Some(i) = timestamps.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ValidateError::UnorderedTimestamps { index: i + 1 });
        }
        Ok(Self { timestamps, values })
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Spacing of the first two samples (h).
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::InsufficientData`] for fewer than two samples.
    pub fn interval_hours(&self) -> Result<f64, ValidateError> {
        match self.timestamps.as_slice() {
            [t0, t1, ..] => Ok(hours_between(*t0, *t1)),
            _ => Err(ValidateError::InsufficientData {
                what: "sample interval",
                n: self.len(),
                min: 2,
            }),
        }
    }
}

/// Observed and estimated values on their common timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeries {
    pub timestamps: Vec<NaiveDateTime>,
    pub observed: Vec<f64>,
    pub estimated: Vec<f64>,
}

impl AlignedSeries {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Inner join of two series on timestamp.
///
/// Timestamps where either value is missing (non-finite) are dropped.
pub fn align(observed: &LevelSeries, estimated: &LevelSeries) -> AlignedSeries {
    let mut out = AlignedSeries {
        timestamps: Vec::new(),
        observed: Vec::new(),
        estimated: Vec::new(),
    };
    let (mut i, mut j) = (0, 0);
    while i < observed.len() && j < estimated.len() {
        match observed.timestamps[i].cmp(&estimated.timestamps[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                let (o, e) = (observed.values[i], estimated.values[j]);
                if o.is_finite() && e.is_finite() {
                    out.timestamps.push(observed.timestamps[i]);
                    out.observed.push(o);
                    out.estimated.push(e);
                }
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Signed difference `b - a` in hours.
pub(crate) fn hours_between(a: NaiveDateTime, b: NaiveDateTime) -> f64 {
    (b - a).num_seconds() as f64 / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 5, 16)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = LevelSeries::new(vec![at(0, 0)], vec![]).unwrap_err();
        assert_eq!(
            err,
            ValidateError::LengthMismatch {
                timestamps: 1,
                values: 0
            }
        );
    }

    #[test]
    fn rejects_repeated_timestamp() {
        let err = LevelSeries::new(vec![at(0, 0), at(0, 15), at(0, 15)], vec![0.0; 3]).unwrap_err();
        assert_eq!(err, ValidateError::UnorderedTimestamps { index: 2 });
    }

    #[test]
    fn interval_in_hours() {
        let s = LevelSeries::new(vec![at(0, 0), at(0, 15)], vec![0.0; 2]).unwrap();
        assert_eq!(s.interval_hours().unwrap(), 0.25);
    }

    #[test]
    fn align_keeps_common_finite_samples() {
        let obs = LevelSeries::new(
            vec![at(0, 0), at(1, 0), at(2, 0), at(3, 0)],
            vec![0.1, f64::NAN, 0.3, 0.4],
        )
        .unwrap();
        let est = LevelSeries::new(
            vec![at(1, 0), at(2, 0), at(3, 0), at(4, 0)],
            vec![1.0, 2.0, 3.0, 4.0],
        )
        .unwrap();
        let a = align(&obs, &est);
        assert_eq!(a.timestamps, vec![at(2, 0), at(3, 0)]);
        assert_eq!(a.observed, vec![0.3, 0.4]);
        assert_eq!(a.estimated, vec![2.0, 3.0]);
    }
}
