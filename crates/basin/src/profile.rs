//! Immutable per-basin parameter set.

use crate::error::BasinError;
use crate::id::BasinId;
use crate::infiltration::InfiltrationCurve;
use crate::interception::InterceptionTable;
use crate::month::Month;
use crate::rating::{AlarmLevels, RatingCurve};
use crate::transform::{LevelTransform, check_non_negative, check_positive};

/// All parameters of one basin, validated once and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct BasinProfile {
    id: BasinId,
    transform: LevelTransform,
    infiltration: InfiltrationCurve,
    interception: InterceptionTable,
    runoff_decay_alpha: f64,
    default_shift_hours: f64,
    rating_curve: Option<RatingCurve>,
    alarm_levels: Option<AlarmLevels>,
}

impl BasinProfile {
    /// Starts building a profile for `id`.
    pub fn builder(id: BasinId) -> BasinProfileBuilder {
        BasinProfileBuilder {
            id,
            transform: None,
            infiltration: None,
            interception: None,
            runoff_decay_alpha: None,
            default_shift_hours: 0.0,
            rating_curve: None,
            alarm_levels: None,
        }
    }

    pub fn id(&self) -> BasinId {
        self.id
    }

    /// Sigmoid swc-to-level transform.
    pub fn transform(&self) -> &LevelTransform {
        &self.transform
    }

    /// Deep-infiltration capacity curve.
    pub fn infiltration(&self) -> &InfiltrationCurve {
        &self.infiltration
    }

    /// Monthly canopy interception capacities.
    pub fn interception(&self) -> &InterceptionTable {
        &self.interception
    }

    /// Interception capacity (mm) for `month`.
    pub fn interception_capacity(&self, month: Month) -> f64 {
        self.interception.capacity(month)
    }

    /// Share of surface storage leaving as runoff per hour.
    pub fn runoff_decay_alpha(&self) -> f64 {
        self.runoff_decay_alpha
    }

    /// Peak shift (hours) applied before the shifted correlation when the
    /// measured anticipation is negative or undefined.
    pub fn default_shift_hours(&self) -> f64 {
        self.default_shift_hours
    }

    pub fn rating_curve(&self) -> Option<&RatingCurve> {
        self.rating_curve.as_ref()
    }

    pub fn alarm_levels(&self) -> Option<&AlarmLevels> {
        self.alarm_levels.as_ref()
    }

    /// Water level (m) for a surface water content (mm).
    pub fn level(&self, swc: f64) -> f64 {
        self.transform.level(swc)
    }

    /// Level at zero surface storage (m).
    pub fn zero_level(&self) -> f64 {
        self.transform.zero_level()
    }
}

/// Builder for [`BasinProfile`]; every required part must be supplied.
#[derive(Debug, Clone)]
pub struct BasinProfileBuilder {
    id: BasinId,
    transform: Option<LevelTransform>,
    infiltration: Option<InfiltrationCurve>,
    interception: Option<InterceptionTable>,
    runoff_decay_alpha: Option<f64>,
    default_shift_hours: f64,
    rating_curve: Option<RatingCurve>,
    alarm_levels: Option<AlarmLevels>,
}

impl BasinProfileBuilder {
    pub fn with_transform(mut self, transform: LevelTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_infiltration(mut self, curve: InfiltrationCurve) -> Self {
        self.infiltration = Some(curve);
        self
    }

    pub fn with_interception(mut self, table: InterceptionTable) -> Self {
        self.interception = Some(table);
        self
    }

    /// Sets the hourly runoff decay factor.
    pub fn with_runoff_decay_alpha(mut self, alpha: f64) -> Self {
        self.runoff_decay_alpha = Some(alpha);
        self
    }

    /// Sets the fallback peak shift in hours (default 0).
    pub fn with_default_shift_hours(mut self, hours: f64) -> Self {
        self.default_shift_hours = hours;
        self
    }

    pub fn with_rating_curve(mut self, curve: RatingCurve) -> Self {
        self.rating_curve = Some(curve);
        self
    }

    pub fn with_alarm_levels(mut self, levels: AlarmLevels) -> Self {
        self.alarm_levels = Some(levels);
        self
    }

    /// Validates and builds the profile.
    ///
    /// # Errors
    ///
    /// Returns [`BasinError::InvalidParameter`] if a required part is
    /// missing, if `runoff_decay_alpha` is outside (0, 1], or if
    /// `default_shift_hours` is negative.
    pub fn build(self) -> Result<BasinProfile, BasinError> {
        let transform = self
            .transform
            .ok_or_else(|| BasinError::invalid("transform", "missing"))?;
        let infiltration = self
            .infiltration
            .ok_or_else(|| BasinError::invalid("infiltration", "missing"))?;
        let interception = self
            .interception
            .ok_or_else(|| BasinError::invalid("interception", "missing"))?;
        let runoff_decay_alpha = self
            .runoff_decay_alpha
            .ok_or_else(|| BasinError::invalid("runoff_decay_alpha", "missing"))?;
        check_positive("runoff_decay_alpha", runoff_decay_alpha)?;
        if runoff_decay_alpha > 1.0 {
            return Err(BasinError::invalid(
                "runoff_decay_alpha",
                format!("must not exceed 1, got {runoff_decay_alpha}"),
            ));
        }
        check_non_negative("default_shift_hours", self.default_shift_hours)?;

        Ok(BasinProfile {
            id: self.id,
            transform,
            infiltration,
            interception,
            runoff_decay_alpha,
            default_shift_hours: self.default_shift_hours,
            rating_curve: self.rating_curve,
            alarm_levels: self.alarm_levels,
        })
    }
}
