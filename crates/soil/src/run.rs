//! Event driver: threads the state through an ordered precipitation series.

use chrono::NaiveDateTime;
use creek_basin::{AlarmStage, BasinId, BasinProfile, Month};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::SoilError;
use crate::interval::SampleInterval;
use crate::reseed::{DailySeed, DayBoundaryCrossed, DayTracker, ReseedPolicy, reseed};
use crate::state::SimulationState;
use crate::step::{StepResult, step};

/// One precipitation sample (mm accumulated over the interval ending at
/// `timestamp`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    pub precipitation: f64,
}

/// Options for [`run_event`].
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    reseed_policy: ReseedPolicy,
    interval: Option<SampleInterval>,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how `swc` is reseeded at day boundaries during runoff.
    pub fn with_reseed_policy(mut self, policy: ReseedPolicy) -> Self {
        self.reseed_policy = policy;
        self
    }

    /// Uses a fixed interval instead of deriving it from the first two
    /// timestamps.
    pub fn with_interval(mut self, interval: SampleInterval) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn reseed_policy(&self) -> ReseedPolicy {
        self.reseed_policy
    }

    pub fn interval(&self) -> Option<SampleInterval> {
        self.interval
    }
}

/// Stateful stepping engine bound to one basin and one run.
#[derive(Debug, Clone)]
pub struct Simulator<'a> {
    profile: &'a BasinProfile,
    interval: SampleInterval,
    state: SimulationState,
}

impl<'a> Simulator<'a> {
    pub fn new(profile: &'a BasinProfile, interval: SampleInterval, initial: SimulationState) -> Self {
        Self {
            profile,
            interval,
            state: initial,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn interval(&self) -> SampleInterval {
        self.interval
    }

    /// Applies one sample and keeps the new state.
    pub fn advance(&mut self, sample: &Sample) -> StepResult {
        let result = step(
            self.profile,
            &self.state,
            sample.precipitation,
            Month::of(&sample.timestamp),
            self.interval,
        );
        self.state = result.state;
        result
    }

    /// Replaces the state from a daily seed at a day boundary.
    pub fn reseed(&mut self, event: &DayBoundaryCrossed, seed: &DailySeed, policy: ReseedPolicy) {
        let next = reseed(&self.state, seed, policy);
        debug!(
            day = event.day_index,
            date = %event.date,
            swc_before = self.state.swc,
            swc_after = next.swc,
            deficit90 = next.deficit90,
            "reseeded soil state"
        );
        self.state = next;
    }
}

/// Simulated values for one input sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutputRecord {
    pub timestamp: NaiveDateTime,
    pub precipitation: f64,
    pub water_level: f64,
    pub swc: f64,
    pub deficit90: f64,
    pub leaf_intercepted: f64,
    /// Discharge (m³/s) when the basin has a rating curve.
    pub discharge: Option<f64>,
}

/// First time the simulated level reached an alarm stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlarmExceedance {
    pub stage: AlarmStage,
    pub threshold: f64,
    pub first_at: NaiveDateTime,
}

/// Output series of one run, index-aligned to the input samples.
#[derive(Debug, Clone)]
pub struct SimulationOutput {
    basin: BasinId,
    interval: SampleInterval,
    records: Vec<OutputRecord>,
    final_state: SimulationState,
}

impl SimulationOutput {
    pub fn basin(&self) -> BasinId {
        self.basin
    }

    pub fn interval(&self) -> SampleInterval {
        self.interval
    }

    pub fn records(&self) -> &[OutputRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// State after the last sample.
    pub fn final_state(&self) -> &SimulationState {
        &self.final_state
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.records.iter().map(|r| r.timestamp).collect()
    }

    pub fn water_levels(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.water_level).collect()
    }

    /// First timestamp with positive surface storage; `None` if the event
    /// never produced runoff.
    pub fn runoff_start(&self) -> Option<NaiveDateTime> {
        self.records.iter().find(|r| r.swc > 0.0).map(|r| r.timestamp)
    }

    /// Cumulative precipitation over the run (mm).
    pub fn total_precipitation(&self) -> f64 {
        self.records.iter().map(|r| r.precipitation).sum()
    }

    /// Highest simulated level and its first occurrence.
    pub fn peak(&self) -> Option<(NaiveDateTime, f64)> {
        self.records.iter().fold(None, |best, r| match best {
            Some((_, lvl)) if lvl >= r.water_level => best,
            _ => Some((r.timestamp, r.water_level)),
        })
    }

    /// First exceedance of every alarm stage reached, mildest first.
    pub fn alarm_exceedances(&self, profile: &BasinProfile) -> Vec<AlarmExceedance> {
        let Some(levels) = profile.alarm_levels() else {
            return Vec::new();
        };
        AlarmStage::RAISED
            .iter()
            .filter_map(|&stage| {
                let threshold = levels.threshold(stage)?;
                self.records
                    .iter()
                    .find(|r| r.water_level >= threshold)
                    .map(|r| AlarmExceedance {
                        stage,
                        threshold,
                        first_at: r.timestamp,
                    })
            })
            .collect()
    }
}

/// Simulates one event with day-boundary reseeding.
///
/// `seeds[0]` initialises the run; `seeds[k]` is applied when the k-th day
/// boundary is crossed. Boundaries beyond the last seed keep the running
/// state.
///
/// # Errors
///
/// Returns [`SoilError::MissingSeed`] if `seeds` is empty,
/// [`SoilError::InsufficientSamples`] if the interval must be derived from
/// fewer than two samples, [`SoilError::NonPositiveInterval`] for
/// non-increasing timestamps, and [`SoilError::NonFinitePrecipitation`] for
/// NaN or infinite input.
pub fn run_event(
    profile: &BasinProfile,
    samples: &[Sample],
    seeds: &[DailySeed],
    options: &RunOptions,
) -> Result<SimulationOutput, SoilError> {
    let first_seed = seeds.first().ok_or(SoilError::MissingSeed)?;
    let interval = resolve_interval(samples, options)?;
    check_precipitation(samples)?;

    let mut sim = Simulator::new(profile, interval, first_seed.initial_state());
    let mut tracker = DayTracker::new();
    let mut records = Vec::with_capacity(samples.len());

    for sample in samples {
        if let Some(event) = tracker.observe(sample.timestamp)
            && let Some(seed) = seeds.get(event.day_index)
        {
            sim.reseed(&event, seed, options.reseed_policy());
        }
        let result = sim.advance(sample);
        records.push(record(profile, sample, &result));
    }

    let output = SimulationOutput {
        basin: profile.id(),
        interval,
        records,
        final_state: *sim.state(),
    };
    info!(
        basin = %profile.id(),
        n_samples = output.len(),
        runoff_start = ?output.runoff_start(),
        peak_level = ?output.peak().map(|(_, lvl)| lvl),
        "simulation complete"
    );
    Ok(output)
}

/// Simulates a series from an explicit initial state, without reseeding.
///
/// # Errors
///
/// Same interval and precipitation checks as [`run_event`].
pub fn run_from_state(
    profile: &BasinProfile,
    samples: &[Sample],
    initial: SimulationState,
    options: &RunOptions,
) -> Result<SimulationOutput, SoilError> {
    let interval = resolve_interval(samples, options)?;
    check_precipitation(samples)?;

    let mut sim = Simulator::new(profile, interval, initial);
    let records = samples
        .iter()
        .map(|sample| {
            let result = sim.advance(sample);
            record(profile, sample, &result)
        })
        .collect();

    Ok(SimulationOutput {
        basin: profile.id(),
        interval,
        records,
        final_state: *sim.state(),
    })
}

fn resolve_interval(samples: &[Sample], options: &RunOptions) -> Result<SampleInterval, SoilError> {
    match options.interval() {
        Some(interval) => Ok(interval),
        None => {
            let head: Vec<NaiveDateTime> = samples.iter().take(2).map(|s| s.timestamp).collect();
            SampleInterval::from_timestamps(&head)
        }
    }
}

fn check_precipitation(samples: &[Sample]) -> Result<(), SoilError> {
    match samples
        .iter()
        .enumerate()
        .find(|(_, s)| !s.precipitation.is_finite())
    {
        Some((index, s)) => Err(SoilError::NonFinitePrecipitation {
            index,
            value: s.precipitation,
        }),
        None => Ok(()),
    }
}

fn record(profile: &BasinProfile, sample: &Sample, result: &StepResult) -> OutputRecord {
    OutputRecord {
        timestamp: sample.timestamp,
        precipitation: sample.precipitation,
        water_level: result.water_level,
        swc: result.state.swc,
        deficit90: result.state.deficit90,
        leaf_intercepted: result.state.leaf_intercepted,
        discharge: profile
            .rating_curve()
            .map(|curve| curve.discharge(result.water_level)),
    }
}
