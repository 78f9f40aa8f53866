//! Parallel runs of one event under several antecedent soil states.

use rayon::prelude::*;
use tracing::info;

use creek_basin::BasinProfile;

use crate::error::SoilError;
use crate::reseed::DailySeed;
use crate::run::{RunOptions, Sample, SimulationOutput, run_event};

/// Default ratio of the 35 cm deficit to the 90 cm deficit.
pub const DEFAULT_SURFACE_RATIO: f64 = 0.4;

/// One antecedent soil state to test an event against.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub label: String,
    /// Deficit over 35 cm of soil (mm).
    pub deficit35: f64,
    /// Deficit over 90 cm of soil (mm).
    pub deficit90: f64,
}

impl Scenario {
    pub fn new(label: impl Into<String>, deficit35: f64, deficit90: f64) -> Self {
        Self {
            label: label.into(),
            deficit35,
            deficit90,
        }
    }

    /// Seed held for the whole run.
    pub fn seed(&self) -> DailySeed {
        DailySeed::from_deficits(self.deficit35, self.deficit90)
    }
}

/// Builds one scenario per 90 cm deficit, with
/// `deficit35 = surface_ratio * deficit90`.
pub fn deficit_scenarios(deficit90: &[f64], surface_ratio: f64) -> Vec<Scenario> {
    deficit90
        .iter()
        .map(|&d90| Scenario::new(format!("deficit90={d90}"), surface_ratio * d90, d90))
        .collect()
}

/// Output of one scenario run.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    pub output: SimulationOutput,
}

/// Runs `samples` once per scenario, in parallel.
///
/// Outcomes are returned in scenario order.
///
/// # Errors
///
/// Returns the first [`SoilError`] raised by any run; the input checks are
/// the same for every scenario, so either all runs fail or none do.
pub fn sweep(
    profile: &BasinProfile,
    samples: &[Sample],
    scenarios: &[Scenario],
    options: &RunOptions,
) -> Result<Vec<ScenarioOutcome>, SoilError> {
    let outcomes = scenarios
        .par_iter()
        .map(|scenario| {
            run_event(profile, samples, &[scenario.seed()], options).map(|output| ScenarioOutcome {
                scenario: scenario.clone(),
                output,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        basin = %profile.id(),
        n_scenarios = outcomes.len(),
        with_runoff = outcomes.iter().filter(|o| o.output.runoff_start().is_some()).count(),
        "scenario sweep complete"
    );
    Ok(outcomes)
}
