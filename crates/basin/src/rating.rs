//! Stage-discharge rating curve and alarm thresholds.

use serde::Serialize;

use crate::error::BasinError;
use crate::transform::{check_finite, check_positive};

/// Power-law rating curve `Q = c * max(h + offset, 0)^e` (m³/s from m).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingCurve {
    coefficient: f64,
    offset: f64,
    exponent: f64,
}

impl RatingCurve {
    /// Creates a rating curve.
    ///
    /// # Errors
    ///
    /// Returns [`BasinError::InvalidParameter`] if `coefficient` or
    /// `exponent` is not positive, or `offset` is not finite.
    pub fn new(coefficient: f64, offset: f64, exponent: f64) -> Result<Self, BasinError> {
        check_positive("rating_coefficient", coefficient)?;
        check_finite("rating_offset", offset)?;
        check_positive("rating_exponent", exponent)?;
        Ok(Self {
            coefficient,
            offset,
            exponent,
        })
    }

    /// Discharge (m³/s) for a water level (m).
    pub fn discharge(&self, level: f64) -> f64 {
        self.coefficient * (level + self.offset).max(0.0).powf(self.exponent)
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }
}

/// Alarm stage reached by a water level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlarmStage {
    Normal,
    Warning,
    Prealarm,
    Alarm,
}

impl AlarmStage {
    /// Stages above `Normal`, in increasing severity.
    pub const RAISED: [AlarmStage; 3] = [AlarmStage::Warning, AlarmStage::Prealarm, AlarmStage::Alarm];
}

/// Strictly increasing level thresholds (m) for the three alarm stages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlarmLevels {
    warning: f64,
    prealarm: f64,
    alarm: f64,
}

impl AlarmLevels {
    /// Creates alarm thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`BasinError::InvalidParameter`] unless
    /// `warning < prealarm < alarm`, all finite.
    pub fn new(warning: f64, prealarm: f64, alarm: f64) -> Result<Self, BasinError> {
        check_finite("warning_level", warning)?;
        check_finite("prealarm_level", prealarm)?;
        check_finite("alarm_level", alarm)?;
        if !(warning < prealarm && prealarm < alarm) {
            return Err(BasinError::invalid(
                "alarm_levels",
                format!("must be strictly increasing, got {warning}/{prealarm}/{alarm}"),
            ));
        }
        Ok(Self {
            warning,
            prealarm,
            alarm,
        })
    }

    /// Highest stage whose threshold `level` reaches.
    pub fn classify(&self, level: f64) -> AlarmStage {
        if level >= self.alarm {
            AlarmStage::Alarm
        } else if level >= self.prealarm {
            AlarmStage::Prealarm
        } else if level >= self.warning {
            AlarmStage::Warning
        } else {
            AlarmStage::Normal
        }
    }

    /// Threshold (m) of a raised stage; `None` for [`AlarmStage::Normal`].
    pub fn threshold(&self, stage: AlarmStage) -> Option<f64> {
        match stage {
            AlarmStage::Normal => None,
            AlarmStage::Warning => Some(self.warning),
            AlarmStage::Prealarm => Some(self.prealarm),
            AlarmStage::Alarm => Some(self.alarm),
        }
    }
}
