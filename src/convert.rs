//! Pure conversion functions: TOML config structs -> crate API config types.

use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow, bail};

use crate::config::*;

use creek_basin::{
    AlarmLevels, BasinCatalog, BasinId, BasinProfile, InfiltrationCurve, InterceptionTable,
    LevelTransform, RatingCurve,
};
use creek_io::ReaderConfig;
use creek_soil::{ReseedPolicy, RunOptions, Scenario, deficit_scenarios};
use creek_validate::ValidateConfig;

/// Parses a reseed policy name into the corresponding enum variant.
pub fn parse_reseed_policy(s: &str) -> Result<ReseedPolicy> {
    match s.to_lowercase().replace('-', "_").as_str() {
        "keep_runoff" => Ok(ReseedPolicy::KeepRunoff),
        "blend" => Ok(ReseedPolicy::Blend),
        other => bail!("unknown reseed policy: {other:?}"),
    }
}

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoToml) -> Result<ReaderConfig> {
    let cfg = ReaderConfig::default()
        .with_timestamp_column(&io.timestamp_column)
        .with_precipitation_column(&io.precipitation_column)
        .with_level_column(io.level_column.as_deref())
        .with_missing_value(io.missing_value);
    cfg.validate().context("invalid [io] config")?;
    Ok(cfg)
}

/// Builds a [`ValidateConfig`] from the `[peaks]` and `[window]` tables.
pub fn build_validate_config(peaks: &PeaksToml, window: &WindowToml) -> Result<ValidateConfig> {
    let cfg = ValidateConfig::default()
        .with_min_height(peaks.min_height)
        .with_min_prominence(peaks.min_prominence)
        .with_min_width(peaks.min_width)
        .with_window_hours(window.low_hours, window.high_hours);
    cfg.validate()
        .context("invalid [peaks] or [window] config")?;
    Ok(cfg)
}

/// Builds [`RunOptions`] from the `[run]` table, with an optional CLI
/// override of the reseed policy.
pub fn build_run_options(run: &RunToml, policy_override: Option<&str>) -> Result<RunOptions> {
    let policy = parse_reseed_policy(policy_override.unwrap_or(&run.reseed_policy))?;
    Ok(RunOptions::new().with_reseed_policy(policy))
}

/// Builds the soil scenarios for a sweep.
///
/// `deficit90` overrides the `[scenarios]` list when given.
pub fn build_scenarios(scenarios: &ScenariosToml, deficit90: Option<&[f64]>) -> Result<Vec<Scenario>> {
    let values = deficit90.unwrap_or(&scenarios.deficit90);
    if values.is_empty() {
        bail!("at least one deficit90 value is required");
    }
    if let Some(v) = values.iter().find(|v| !v.is_finite()) {
        bail!("deficit90 values must be finite, got {v}");
    }
    if !scenarios.surface_ratio.is_finite() {
        bail!(
            "surface_ratio must be finite, got {}",
            scenarios.surface_ratio
        );
    }
    Ok(deficit_scenarios(values, scenarios.surface_ratio))
}

/// Builds the basin catalog: built-in profiles, then every `[basins.<name>]`
/// table applied on top.
pub fn build_catalog(basins: &BTreeMap<String, BasinToml>) -> Result<BasinCatalog> {
    let mut catalog = BasinCatalog::builtin();
    for (name, table) in basins {
        let id: BasinId = name
            .parse()
            .with_context(|| format!("invalid basin table [basins.{name}]"))?;
        let base = catalog.resolve(id).ok().cloned();
        let profile = build_profile(id, table, base.as_ref())
            .with_context(|| format!("invalid basin table [basins.{name}]"))?;
        catalog.insert(profile);
    }
    Ok(catalog)
}

/// Builds one profile from a basin table, taking fields the table leaves
/// out from `base`.
pub fn build_profile(id: BasinId, t: &BasinToml, base: Option<&BasinProfile>) -> Result<BasinProfile> {
    let base_transform = base.map(|b| *b.transform());
    let base_infiltration = base.map(|b| *b.infiltration());

    let zero_level = required("zero_level", t.zero_level, base_transform.map(|b| b.zero_level()))?;
    let max_level = required("max_level", t.max_level, base_transform.map(|b| b.max_level()))?;
    let shape_k = required("shape_k", t.shape_k, base_transform.map(|b| b.shape_k()))?;
    let reference_swc = required(
        "reference_swc",
        t.reference_swc,
        base_transform.map(|b| b.reference_swc()),
    )?;
    let transform = match (t.shape_m, t.reference_level, base_transform) {
        (Some(_), Some(_), _) => {
            bail!("set exactly one of shape_m or reference_level, got both")
        }
        (Some(m), None, _) => LevelTransform::new(zero_level, max_level, m, shape_k, reference_swc)?,
        (None, Some(level), _) => {
            LevelTransform::from_reference_level(zero_level, max_level, shape_k, reference_swc, level)?
        }
        (None, None, Some(b)) => {
            LevelTransform::new(zero_level, max_level, b.shape_m(), shape_k, reference_swc)?
        }
        (None, None, None) => bail!("one of shape_m or reference_level is required"),
    };

    let infiltration = InfiltrationCurve::new(
        required("inf_min", t.inf_min, base_infiltration.map(|b| b.inf_min()))?,
        required("inf_max", t.inf_max, base_infiltration.map(|b| b.inf_max()))?,
        required("deficit_min", t.deficit_min, base_infiltration.map(|b| b.deficit_min()))?,
        required("deficit_max", t.deficit_max, base_infiltration.map(|b| b.deficit_max()))?,
    )?;

    let interception = match (&t.interception, base) {
        (Some(monthly), _) => InterceptionTable::from_monthly(monthly)?,
        (None, Some(b)) => *b.interception(),
        (None, None) => bail!("missing required field \"interception\""),
    };

    let alpha = required(
        "runoff_decay_alpha",
        t.runoff_decay_alpha,
        base.map(|b| b.runoff_decay_alpha()),
    )?;
    let shift = t
        .default_shift_hours
        .or(base.map(|b| b.default_shift_hours()))
        .unwrap_or(0.0);

    let mut builder = BasinProfile::builder(id)
        .with_transform(transform)
        .with_infiltration(infiltration)
        .with_interception(interception)
        .with_runoff_decay_alpha(alpha)
        .with_default_shift_hours(shift);

    let rating = match &t.rating {
        Some(r) => Some(RatingCurve::new(r.coefficient, r.offset, r.exponent)?),
        None => base.and_then(|b| b.rating_curve().copied()),
    };
    if let Some(rating) = rating {
        builder = builder.with_rating_curve(rating);
    }

    let alarms = match &t.alarms {
        Some(a) => Some(AlarmLevels::new(a.warning, a.prealarm, a.alarm)?),
        None => base.and_then(|b| b.alarm_levels().copied()),
    };
    if let Some(alarms) = alarms {
        builder = builder.with_alarm_levels(alarms);
    }

    Ok(builder.build()?)
}

fn required(name: &str, value: Option<f64>, fallback: Option<f64>) -> Result<f64> {
    value
        .or(fallback)
        .ok_or_else(|| anyhow!("missing required field {name:?}"))
}
