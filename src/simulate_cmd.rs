//! Simulate command: water levels for one event from its soil balance.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use creek_io::write_output;
use creek_soil::run_event;

use crate::cli::SimulateArgs;
use crate::convert;
use crate::setup::{self, RunSummary, Setup};

/// Run the single-event simulation pipeline.
pub fn run(args: SimulateArgs) -> Result<()> {
    let _cmd = info_span!("simulate").entered();

    // 1. Config, basin and run options
    let setup = Setup::load(args.config.as_deref())?;
    let profile = setup.profile(&args.basin)?;
    let options = convert::build_run_options(&setup.config.run, args.reseed_policy.as_deref())?;

    // 2. Event and soil seeds
    let event = setup::load_event(&args.event, &setup.reader)?;
    let seeds = setup::load_seeds(&args.soil, &event)?;
    info!(n_samples = event.len(), n_seeds = seeds.len(), "inputs loaded");

    // 3. Simulate
    let output = run_event(profile, &event.samples(), &seeds, &options)
        .with_context(|| format!("simulation failed for {}", args.event.display()))?;

    // 4. Write series and print the summary
    let out_path = args
        .output
        .unwrap_or_else(|| args.event.with_extension("simulated.csv"));
    write_output(&out_path, output.records())
        .with_context(|| format!("failed to write output: {}", out_path.display()))?;
    info!(path = %out_path.display(), "simulation output written");

    setup::write_json(&RunSummary::new(profile, &output), None)
}
