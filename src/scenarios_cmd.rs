//! Scenarios command: one event under several antecedent soil states.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use creek_io::write_output;
use creek_soil::sweep;

use crate::cli::ScenariosArgs;
use crate::convert;
use crate::setup::{self, RunSummary, Setup};

#[derive(Serialize)]
struct ScenarioRow {
    label: String,
    deficit35: f64,
    deficit90: f64,
    #[serde(flatten)]
    summary: RunSummary,
}

/// Run the scenario sweep pipeline.
pub fn run(args: ScenariosArgs) -> Result<()> {
    let _cmd = info_span!("scenarios").entered();

    // 1. Config, basin, scenarios
    let setup = Setup::load(args.config.as_deref())?;
    let profile = setup.profile(&args.basin)?;
    let options = convert::build_run_options(&setup.config.run, None)?;
    let scenarios = convert::build_scenarios(&setup.config.scenarios, args.deficit90.as_deref())?;

    // 2. Event
    let event = setup::load_event(&args.event, &setup.reader)?;

    // 3. Sweep
    info!(n_scenarios = scenarios.len(), "running scenarios");
    let outcomes = sweep(profile, &event.samples(), &scenarios, &options)
        .with_context(|| format!("scenario sweep failed for {}", args.event.display()))?;

    // 4. Optional per-scenario series
    if let Some(dir) = &args.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
        for (i, outcome) in outcomes.iter().enumerate() {
            let path = dir.join(format!("scenario_{i:02}.csv"));
            write_output(&path, outcome.output.records())
                .with_context(|| format!("failed to write output: {}", path.display()))?;
        }
        info!(path = %dir.display(), n_files = outcomes.len(), "scenario series written");
    }

    // 5. Summary table
    let rows: Vec<ScenarioRow> = outcomes
        .iter()
        .map(|o| ScenarioRow {
            label: o.scenario.label.clone(),
            deficit35: o.scenario.deficit35,
            deficit90: o.scenario.deficit90,
            summary: RunSummary::new(profile, &o.output),
        })
        .collect();
    setup::write_json(&rows, args.output.as_deref())
}
