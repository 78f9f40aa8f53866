//! Validate command: simulate events and score them against observed levels.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, info_span, warn};

use creek_basin::BasinProfile;
use creek_soil::{RunOptions, run_event};
use creek_validate::{LevelSeries, ScoreSummary, ValidateConfig, ValidationReport, validate};

use crate::cli::ValidateArgs;
use crate::convert;
use crate::setup::{self, Setup};

#[derive(Serialize)]
struct EventReport {
    event: String,
    report: ValidationReport,
}

#[derive(Serialize)]
struct ValidationOutput {
    basin: String,
    summary: ScoreSummary,
    events: Vec<EventReport>,
}

/// Run the batch validation pipeline.
pub fn run(args: ValidateArgs) -> Result<()> {
    let _cmd = info_span!("validate").entered();

    // 1. Config, basin and run options
    let setup = Setup::load(args.config.as_deref())?;
    if setup.reader.level_column().is_none() {
        bail!("validation needs observed levels: set [io].level_column");
    }
    let profile = setup.profile(&args.basin)?;
    let options = convert::build_run_options(&setup.config.run, args.reseed_policy.as_deref())?;
    let validate_cfg = convert::build_validate_config(&setup.config.peaks, &setup.config.window)?;

    // 2. Score each event
    let mut events = Vec::with_capacity(args.events.len());
    for path in &args.events {
        let _event = info_span!("event", path = %path.display()).entered();
        let report = score_event(path, &args.soil, &setup, profile, &options, &validate_cfg)
            .with_context(|| format!("failed to validate event: {}", path.display()))?;
        if !report.warnings.is_empty() {
            warn!(warnings = ?report.warnings, "event scored with warnings");
        }
        events.push(EventReport {
            event: path.display().to_string(),
            report,
        });
    }

    // 3. Summarise and write
    let summary = ScoreSummary::from_reports(events.iter().map(|e| &e.report));
    info!(
        n_events = summary.n_events,
        n_matched_events = summary.n_matched_events,
        mean_correlation = ?summary.correlation.mean,
        "validation complete"
    );

    let out = ValidationOutput {
        basin: profile.id().to_string(),
        summary,
        events,
    };
    setup::write_json(&out, args.output.as_deref())
}

fn score_event(
    path: &Path,
    soil: &Path,
    setup: &Setup,
    profile: &BasinProfile,
    options: &RunOptions,
    validate_cfg: &ValidateConfig,
) -> Result<ValidationReport> {
    let event = setup::load_event(path, &setup.reader)?;
    let observed = event
        .observed_levels()?
        .context("event has no observed level column")?;
    let seeds = setup::load_seeds(soil, &event)?;

    let output = run_event(profile, &event.samples(), &seeds, options)?;
    let estimated = LevelSeries::new(output.timestamps(), output.water_levels())?;

    let report = validate(
        &observed,
        &estimated,
        validate_cfg,
        profile.default_shift_hours(),
    )?;
    Ok(report)
}
