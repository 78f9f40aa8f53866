//! Validation configuration.

use crate::error::ValidateError;

/// Peak-detection thresholds and the pairing window.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidateConfig {
    min_height: f64,
    min_prominence: f64,
    min_width: usize,
    window_low_hours: f64,
    window_high_hours: f64,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            min_height: 0.2,
            min_prominence: 0.1,
            min_width: 2,
            window_low_hours: -0.5,
            window_high_hours: 3.0,
        }
    }
}

impl ValidateConfig {
    /// Set the minimum peak level (m).
    pub fn with_min_height(mut self, height: f64) -> Self {
        self.min_height = height;
        self
    }

    /// Set the minimum peak prominence (m).
    pub fn with_min_prominence(mut self, prominence: f64) -> Self {
        self.min_prominence = prominence;
        self
    }

    /// Set the minimum separation between accepted peaks (samples).
    pub fn with_min_width(mut self, width: usize) -> Self {
        self.min_width = width;
        self
    }

    /// Set the pairing window `[low, high]` on `t_observed - t_estimated` (h).
    pub fn with_window_hours(mut self, low: f64, high: f64) -> Self {
        self.window_low_hours = low;
        self.window_high_hours = high;
        self
    }

    pub fn min_height(&self) -> f64 {
        self.min_height
    }

    pub fn min_prominence(&self) -> f64 {
        self.min_prominence
    }

    pub fn min_width(&self) -> usize {
        self.min_width
    }

    pub fn window_low_hours(&self) -> f64 {
        self.window_low_hours
    }

    pub fn window_high_hours(&self) -> f64 {
        self.window_high_hours
    }

    /// Checks every setting.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::InvalidConfig`] for non-finite thresholds, a
    /// negative prominence, a zero width or an empty window.
    pub fn validate(&self) -> Result<(), ValidateError> {
        if !self.min_height.is_finite() {
            return Err(ValidateError::config(
                "min_height",
                format!("must be finite, got {}", self.min_height),
            ));
        }
        if !(self.min_prominence.is_finite() && self.min_prominence >= 0.0) {
            return Err(ValidateError::config(
                "min_prominence",
                format!("must be finite and >= 0, got {}", self.min_prominence),
            ));
        }
        if self.min_width == 0 {
            return Err(ValidateError::config("min_width", "must be at least 1, got 0"));
        }
        if !(self.window_low_hours.is_finite() && self.window_high_hours.is_finite())
            || self.window_low_hours > self.window_high_hours
        {
            return Err(ValidateError::config(
                "window",
                format!(
                    "need finite low <= high, got [{}, {}]",
                    self.window_low_hours, self.window_high_hours
                ),
            ));
        }
        Ok(())
    }
}
