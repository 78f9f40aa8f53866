//! Constant sample interval of a run.

use chrono::NaiveDateTime;

use crate::error::SoilError;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Positive, constant spacing between consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleInterval {
    seconds: f64,
}

impl SampleInterval {
    /// Creates an interval from a length in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`SoilError::NonPositiveInterval`] if `seconds` is not a
    /// positive finite number.
    pub fn from_seconds(seconds: f64) -> Result<Self, SoilError> {
        if seconds.is_finite() && seconds > 0.0 {
            Ok(Self { seconds })
        } else {
            Err(SoilError::NonPositiveInterval { seconds })
        }
    }

    /// Interval between the first two timestamps of a series.
    ///
    /// The interval is assumed constant for the rest of the series.
    ///
    /// # Errors
    ///
    /// Returns [`SoilError::InsufficientSamples`] for fewer than two
    /// timestamps and [`SoilError::NonPositiveInterval`] if they are not
    /// strictly increasing.
    pub fn from_timestamps(timestamps: &[NaiveDateTime]) -> Result<Self, SoilError> {
        match timestamps {
            [t0, t1, ..] => Self::from_seconds((*t1 - *t0).num_milliseconds() as f64 / 1000.0),
            _ => Err(SoilError::InsufficientSamples {
                n: timestamps.len(),
                min: 2,
            }),
        }
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Number of samples per hour (may be fractional for intervals > 1 h).
    pub fn intervals_per_hour(&self) -> f64 {
        SECONDS_PER_HOUR / self.seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 19)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn quarter_hour() {
        let i = SampleInterval::from_timestamps(&[at(0, 0), at(0, 15), at(0, 30)]).unwrap();
        assert_eq!(i.seconds(), 900.0);
        assert_eq!(i.intervals_per_hour(), 4.0);
    }

    #[test]
    fn single_timestamp_rejected() {
        assert_eq!(
            SampleInterval::from_timestamps(&[at(0, 0)]),
            Err(SoilError::InsufficientSamples { n: 1, min: 2 })
        );
    }

    #[test]
    fn decreasing_timestamps_rejected() {
        assert!(matches!(
            SampleInterval::from_timestamps(&[at(1, 0), at(0, 0)]),
            Err(SoilError::NonPositiveInterval { .. })
        ));
    }

    #[test]
    fn non_finite_rejected() {
        assert!(SampleInterval::from_seconds(f64::NAN).is_err());
        assert!(SampleInterval::from_seconds(0.0).is_err());
    }
}
