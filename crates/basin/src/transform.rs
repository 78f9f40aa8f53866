//! Sigmoid transform from surface water content to water level.

use crate::error::BasinError;

/// Logistic mapping from surface water content (swc, mm) to water level (m).
///
/// ```text
/// level(swc) = max_level / (1 + m * exp(-k * (swc - swc_ref))) + zero_level   for swc > 0
/// level(swc) = zero_level                                                    for swc <= 0
/// ```
///
/// The result always lies in `[zero_level, zero_level + max_level]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelTransform {
    zero_level: f64,
    max_level: f64,
    shape_m: f64,
    shape_k: f64,
    reference_swc: f64,
}

impl LevelTransform {
    /// Builds a transform with an explicit shape factor `m`.
    ///
    /// # Errors
    ///
    /// Returns [`BasinError::InvalidParameter`] if any value is non-finite,
    /// or if `max_level`, `shape_m` or `shape_k` is not positive.
    pub fn new(
        zero_level: f64,
        max_level: f64,
        shape_m: f64,
        shape_k: f64,
        reference_swc: f64,
    ) -> Result<Self, BasinError> {
        check_finite("zero_level", zero_level)?;
        check_finite("reference_swc", reference_swc)?;
        check_positive("max_level", max_level)?;
        check_positive("shape_m", shape_m)?;
        check_positive("shape_k", shape_k)?;
        Ok(Self {
            zero_level,
            max_level,
            shape_m,
            shape_k,
            reference_swc,
        })
    }

    /// Builds a transform whose curve passes through `reference_level` at
    /// `reference_swc`.
    ///
    /// The shape factor is derived once as
    /// `m = (max_level - (reference_level - zero_level)) / (reference_level - zero_level)`.
    ///
    /// # Errors
    ///
    /// Returns [`BasinError::InvalidParameter`] if `reference_level` is not
    /// strictly between `zero_level` and `zero_level + max_level`, or if any
    /// other parameter is invalid.
    pub fn from_reference_level(
        zero_level: f64,
        max_level: f64,
        shape_k: f64,
        reference_swc: f64,
        reference_level: f64,
    ) -> Result<Self, BasinError> {
        check_finite("zero_level", zero_level)?;
        check_positive("max_level", max_level)?;
        check_finite("reference_level", reference_level)?;
        let rise = reference_level - zero_level;
        if rise <= 0.0 || rise >= max_level {
            return Err(BasinError::invalid(
                "reference_level",
                format!(
                    "must lie strictly between {zero_level} and {}, got {reference_level}",
                    zero_level + max_level
                ),
            ));
        }
        let shape_m = (max_level - rise) / rise;
        Self::new(zero_level, max_level, shape_m, shape_k, reference_swc)
    }

    /// Water level (m) for a surface water content (mm).
    pub fn level(&self, swc: f64) -> f64 {
        if swc <= 0.0 {
            return self.zero_level;
        }
        let denom = 1.0 + self.shape_m * (-self.shape_k * (swc - self.reference_swc)).exp();
        self.max_level / denom + self.zero_level
    }

    /// Level at zero surface storage (m).
    pub fn zero_level(&self) -> f64 {
        self.zero_level
    }

    /// Height of the sigmoid above `zero_level` (m).
    pub fn max_level(&self) -> f64 {
        self.max_level
    }

    /// Shape factor `m`.
    pub fn shape_m(&self) -> f64 {
        self.shape_m
    }

    /// Steepness `k` (1/mm).
    pub fn shape_k(&self) -> f64 {
        self.shape_k
    }

    /// Reference surface water content (mm).
    pub fn reference_swc(&self) -> f64 {
        self.reference_swc
    }
}

pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<(), BasinError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(BasinError::invalid(name, format!("must be finite, got {value}")))
    }
}

pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<(), BasinError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(BasinError::invalid(
            name,
            format!("must be finite and positive, got {value}"),
        ))
    }
}

pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<(), BasinError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(BasinError::invalid(
            name,
            format!("must be finite and non-negative, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ravone() -> LevelTransform {
        LevelTransform::from_reference_level(-0.2, 4.5, 0.11, 20.0, 1.25).unwrap()
    }

    #[test]
    fn shape_m_from_reference_level() {
        let t = ravone();
        // (4.5 - 1.45) / 1.45
        assert_relative_eq!(t.shape_m(), 3.05 / 1.45, epsilon = 1e-12);
    }

    #[test]
    fn passes_through_reference_point() {
        let t = ravone();
        assert_relative_eq!(t.level(20.0), 1.25, epsilon = 1e-12);
    }

    #[test]
    fn non_positive_swc_is_zero_level() {
        let t = ravone();
        assert_eq!(t.level(0.0), -0.2);
        assert_eq!(t.level(-35.0), -0.2);
    }

    #[test]
    fn bounded_and_monotone() {
        let t = ravone();
        let mut prev = t.level(0.0);
        for i in 1..2000 {
            let lvl = t.level(i as f64 * 0.5);
            assert!(lvl >= prev);
            assert!(lvl >= -0.2 && lvl <= -0.2 + 4.5);
            prev = lvl;
        }
        assert!(t.level(1e6) <= -0.2 + 4.5);
    }

    #[test]
    fn reference_level_outside_range_rejected() {
        assert!(LevelTransform::from_reference_level(-0.2, 4.5, 0.1, 22.0, -0.2).is_err());
        assert!(LevelTransform::from_reference_level(-0.2, 4.5, 0.1, 22.0, 4.3).is_err());
    }

    #[test]
    fn non_positive_k_rejected() {
        let err = LevelTransform::new(0.0, 2.0, 1.0, 0.0, 10.0).unwrap_err();
        assert!(matches!(
            err,
            BasinError::InvalidParameter {
                name: "shape_k",
                ..
            }
        ));
    }
}
