//! Single-sample state transition.
//!
//! Each step runs, in order:
//! 1. canopy interception, bounded by the month's free canopy storage;
//! 2. deep infiltration, bounded by the deficit-dependent capacity;
//! 3. the phase update selected by the sign of the incoming `swc`;
//! 4. the level transform of the new `swc`.

use creek_basin::{BasinProfile, INTERCEPTION_FRACTION, Month};
use serde::Serialize;

use crate::interval::SampleInterval;
use crate::state::{Phase, SimulationState};

/// Water moved during one step (mm).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StepFluxes {
    /// Rain captured by the canopy.
    pub interception: f64,
    /// Rain reaching the ground.
    pub rain_to_soil: f64,
    /// Water entering the deep soil layer.
    pub deep_infiltration: f64,
    /// Surface water leaving as runoff (phase 2 only).
    pub runoff: f64,
}

/// Outcome of applying one precipitation sample to a state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    /// Gauge level after the step (m).
    pub water_level: f64,
    /// State after the step.
    pub state: SimulationState,
    /// Phase the step ran in.
    pub phase: Phase,
    pub fluxes: StepFluxes,
}

/// Canopy interception for one sample.
///
/// Returns `(intercepted, new_leaf_storage)`. The new storage never exceeds
/// `capacity`.
pub fn leaf_interception(precipitation: f64, leaf_intercepted: f64, capacity: f64) -> (f64, f64) {
    let room = (capacity - leaf_intercepted).max(0.0);
    let intercepted = (precipitation * INTERCEPTION_FRACTION).min(room);
    let storage = (leaf_intercepted + intercepted).min(capacity);
    (intercepted, storage)
}

/// Deep infiltration (mm) for one sample given the rain reaching the soil.
pub fn deep_infiltration(
    profile: &BasinProfile,
    rain_to_soil: f64,
    deficit90: f64,
    interval: SampleInterval,
) -> f64 {
    let per_step = profile.infiltration().hourly_capacity(deficit90) / interval.intervals_per_hour();
    rain_to_soil.min(per_step)
}

/// Advances `state` by one precipitation sample (mm).
///
/// Total over finite inputs: the result is always a fully defined state and a
/// level in `[zero_level, zero_level + max_level]`.
pub fn step(
    profile: &BasinProfile,
    state: &SimulationState,
    precipitation: f64,
    month: Month,
    interval: SampleInterval,
) -> StepResult {
    let capacity = profile.interception_capacity(month);
    let (interception, leaf_intercepted) =
        leaf_interception(precipitation, state.leaf_intercepted, capacity);
    let rain_to_soil = precipitation - interception;
    let deep = deep_infiltration(profile, rain_to_soil, state.deficit90, interval);

    let phase = state.phase();
    let (swc, deficit90, runoff) = match phase {
        Phase::SoilFilling => (
            state.swc + rain_to_soil - deep,
            state.deficit90 - rain_to_soil,
            0.0,
        ),
        Phase::Runoff => {
            let stored = state.swc + rain_to_soil - deep;
            let decay = state.swc * (profile.runoff_decay_alpha() / interval.intervals_per_hour());
            // runoff never exceeds the water held after infiltration
            let runoff = decay.min(stored);
            (
                (stored - runoff).max(0.0),
                state.deficit90 - deep,
                runoff,
            )
        }
    };

    StepResult {
        water_level: profile.level(swc),
        state: SimulationState {
            swc,
            deficit90,
            leaf_intercepted,
        },
        phase,
        fluxes: StepFluxes {
            interception,
            rain_to_soil,
            deep_infiltration: deep,
            runoff,
        },
    }
}
