use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level creek configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CreekConfig {
    /// Event file layout.
    #[serde(default)]
    pub io: IoToml,

    /// Peak detection thresholds.
    #[serde(default)]
    pub peaks: PeaksToml,

    /// Peak pairing window.
    #[serde(default)]
    pub window: WindowToml,

    /// Simulation run settings.
    #[serde(default)]
    pub run: RunToml,

    /// Antecedent soil scenarios.
    #[serde(default)]
    pub scenarios: ScenariosToml,

    /// Basin definitions and overrides, keyed by basin name.
    #[serde(default)]
    pub basins: BTreeMap<String, BasinToml>,
}

impl CreekConfig {
    /// Reads a TOML file, or returns the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    #[serde(default = "default_timestamp_column")]
    pub timestamp_column: String,
    #[serde(default = "default_precipitation_column")]
    pub precipitation_column: String,
    #[serde(default = "default_level_column")]
    pub level_column: Option<String>,
    #[serde(default = "default_missing_value")]
    pub missing_value: f64,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            timestamp_column: default_timestamp_column(),
            precipitation_column: default_precipitation_column(),
            level_column: default_level_column(),
            missing_value: default_missing_value(),
        }
    }
}

fn default_timestamp_column() -> String {
    "timestamp".to_string()
}
fn default_precipitation_column() -> String {
    "precipitation".to_string()
}
fn default_level_column() -> Option<String> {
    Some("level".to_string())
}
fn default_missing_value() -> f64 {
    -9999.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeaksToml {
    #[serde(default = "default_min_height")]
    pub min_height: f64,
    #[serde(default = "default_min_prominence")]
    pub min_prominence: f64,
    #[serde(default = "default_min_width")]
    pub min_width: usize,
}

impl Default for PeaksToml {
    fn default() -> Self {
        Self {
            min_height: default_min_height(),
            min_prominence: default_min_prominence(),
            min_width: default_min_width(),
        }
    }
}

fn default_min_height() -> f64 {
    0.2
}
fn default_min_prominence() -> f64 {
    0.1
}
fn default_min_width() -> usize {
    2
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowToml {
    #[serde(default = "default_low_hours")]
    pub low_hours: f64,
    #[serde(default = "default_high_hours")]
    pub high_hours: f64,
}

impl Default for WindowToml {
    fn default() -> Self {
        Self {
            low_hours: default_low_hours(),
            high_hours: default_high_hours(),
        }
    }
}

fn default_low_hours() -> f64 {
    -0.5
}
fn default_high_hours() -> f64 {
    3.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunToml {
    #[serde(default = "default_reseed_policy")]
    pub reseed_policy: String,
}

impl Default for RunToml {
    fn default() -> Self {
        Self {
            reseed_policy: default_reseed_policy(),
        }
    }
}

fn default_reseed_policy() -> String {
    "keep_runoff".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenariosToml {
    #[serde(default = "default_deficit90")]
    pub deficit90: Vec<f64>,
    #[serde(default = "default_surface_ratio")]
    pub surface_ratio: f64,
}

impl Default for ScenariosToml {
    fn default() -> Self {
        Self {
            deficit90: default_deficit90(),
            surface_ratio: default_surface_ratio(),
        }
    }
}

fn default_deficit90() -> Vec<f64> {
    vec![-20.0, 0.0, 20.0, 50.0, 80.0]
}
fn default_surface_ratio() -> f64 {
    creek_soil::DEFAULT_SURFACE_RATIO
}

/// One basin table. Fields left out keep the built-in value when the basin
/// has one; a basin without built-in constants needs every required field.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct BasinToml {
    pub zero_level: Option<f64>,
    pub max_level: Option<f64>,
    pub shape_k: Option<f64>,
    pub reference_swc: Option<f64>,
    /// Level at `reference_swc`, from which `shape_m` is derived.
    pub reference_level: Option<f64>,
    /// Explicit shape factor; set this or `reference_level`, not both.
    pub shape_m: Option<f64>,
    pub inf_min: Option<f64>,
    pub inf_max: Option<f64>,
    pub deficit_min: Option<f64>,
    pub deficit_max: Option<f64>,
    /// Monthly canopy capacity (mm), January first.
    pub interception: Option<Vec<f64>>,
    pub runoff_decay_alpha: Option<f64>,
    pub default_shift_hours: Option<f64>,
    pub rating: Option<RatingToml>,
    pub alarms: Option<AlarmsToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RatingToml {
    pub coefficient: f64,
    #[serde(default)]
    pub offset: f64,
    pub exponent: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlarmsToml {
    pub warning: f64,
    pub prealarm: f64,
    pub alarm: f64,
}
