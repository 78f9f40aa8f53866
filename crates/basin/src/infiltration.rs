//! Deep-infiltration capacity as a function of the 90 cm soil deficit.

use crate::error::BasinError;
use crate::transform::{check_finite, check_positive};

/// Quadratic infiltration curve between a wet and a dry soil state.
///
/// ```text
/// ratio    = clamp((deficit90 - deficit_min) / (deficit_max - deficit_min), 0, 1)
/// capacity = clamp(inf_min + ratio^2 * inf_max, inf_min, inf_max)   [mm/h]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfiltrationCurve {
    inf_min: f64,
    inf_max: f64,
    deficit_min: f64,
    deficit_max: f64,
}

impl InfiltrationCurve {
    /// Creates a curve.
    ///
    /// # Errors
    ///
    /// Returns [`BasinError::InvalidParameter`] unless
    /// `0 < inf_min <= inf_max` and `deficit_min < deficit_max`, all finite.
    pub fn new(
        inf_min: f64,
        inf_max: f64,
        deficit_min: f64,
        deficit_max: f64,
    ) -> Result<Self, BasinError> {
        check_positive("inf_min", inf_min)?;
        check_positive("inf_max", inf_max)?;
        if inf_min > inf_max {
            return Err(BasinError::invalid(
                "inf_min",
                format!("must not exceed inf_max ({inf_max}), got {inf_min}"),
            ));
        }
        check_finite("deficit_min", deficit_min)?;
        check_finite("deficit_max", deficit_max)?;
        if deficit_min >= deficit_max {
            return Err(BasinError::invalid(
                "deficit_min",
                format!("must be below deficit_max ({deficit_max}), got {deficit_min}"),
            ));
        }
        Ok(Self {
            inf_min,
            inf_max,
            deficit_min,
            deficit_max,
        })
    }

    /// Hourly deep-infiltration capacity (mm/h) for a 90 cm deficit (mm).
    pub fn hourly_capacity(&self, deficit90: f64) -> f64 {
        let ratio = ((deficit90 - self.deficit_min) / (self.deficit_max - self.deficit_min))
            .clamp(0.0, 1.0);
        (self.inf_min + ratio * ratio * self.inf_max).clamp(self.inf_min, self.inf_max)
    }

    /// Capacity for saturated soil (mm/h).
    pub fn inf_min(&self) -> f64 {
        self.inf_min
    }

    /// Capacity for very dry, cracked soil (mm/h).
    pub fn inf_max(&self) -> f64 {
        self.inf_max
    }

    /// Deficit at or below which `inf_min` applies (mm).
    pub fn deficit_min(&self) -> f64 {
        self.deficit_min
    }

    /// Deficit at or above which `inf_max` applies (mm).
    pub fn deficit_max(&self) -> f64 {
        self.deficit_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn curve() -> InfiltrationCurve {
        InfiltrationCurve::new(0.5, 10.0, -50.0, 100.0).unwrap()
    }

    #[test]
    fn quadratic_interpolation() {
        // ratio = 1/3 -> 0.5 + 10/9
        assert_relative_eq!(curve().hourly_capacity(0.0), 0.5 + 10.0 / 9.0, epsilon = 1e-12);
    }

    #[test]
    fn clamped_at_bounds() {
        let c = curve();
        assert_eq!(c.hourly_capacity(-80.0), 0.5);
        assert_eq!(c.hourly_capacity(-50.0), 0.5);
        assert_eq!(c.hourly_capacity(100.0), 10.0);
        assert_eq!(c.hourly_capacity(400.0), 10.0);
    }

    #[test]
    fn monotone_in_deficit() {
        let c = curve();
        let mut prev = c.hourly_capacity(-100.0);
        for d in -100..200 {
            let cap = c.hourly_capacity(d as f64);
            assert!(cap >= prev);
            prev = cap;
        }
    }

    #[test]
    fn inverted_bounds_rejected() {
        assert!(InfiltrationCurve::new(5.0, 1.0, -50.0, 100.0).is_err());
        assert!(InfiltrationCurve::new(0.5, 10.0, 100.0, 100.0).is_err());
        assert!(InfiltrationCurve::new(0.0, 10.0, -50.0, 100.0).is_err());
    }
}
