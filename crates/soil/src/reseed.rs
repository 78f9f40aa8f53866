//! Day-boundary detection and reseeding from daily soil-water balances.
//!
//! The per-sample [`step`](crate::step) knows nothing about days. A driver
//! feeds each timestamp to a [`DayTracker`]; when it reports a
//! [`DayBoundaryCrossed`] event, the driver applies [`reseed`] with the
//! matching [`DailySeed`] before stepping.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::state::SimulationState;

/// Daily soil state supplied by an external water-balance model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailySeed {
    /// Surface-layer water content (mm): the 35 cm deficit with inverted
    /// sign, so positive values mean wetter than field capacity.
    pub swc35: f64,
    /// Deficit over 90 cm of soil (mm).
    pub deficit90: f64,
}

impl DailySeed {
    /// Seed from the two deficits as reported by the water-balance model.
    pub fn from_deficits(deficit35: f64, deficit90: f64) -> Self {
        Self {
            swc35: -deficit35,
            deficit90,
        }
    }

    /// Initial state of a run: surface storage starts at or below zero.
    pub fn initial_state(&self) -> SimulationState {
        SimulationState::new(self.swc35.min(0.0), self.deficit90)
    }
}

/// How the surface water content is reseeded while runoff is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReseedPolicy {
    /// Keep the running `swc`; only `deficit90` is refreshed.
    #[default]
    KeepRunoff,
    /// Average the running `swc` with the seed, floored at zero.
    Blend,
}

/// A sample whose calendar day differs from the previous sample's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBoundaryCrossed {
    /// Number of boundaries crossed so far (1 for the first new day).
    pub day_index: usize,
    /// Calendar day being entered.
    pub date: NaiveDate,
}

/// Detects day changes in an ordered timestamp sequence.
#[derive(Debug, Clone)]
pub struct DayTracker {
    current: Option<NaiveDate>,
    day_index: usize,
}

impl DayTracker {
    pub fn new() -> Self {
        Self {
            current: None,
            day_index: 0,
        }
    }

    /// Registers the next timestamp; returns an event when a new day starts.
    ///
    /// The first timestamp only sets the starting day.
    pub fn observe(&mut self, timestamp: NaiveDateTime) -> Option<DayBoundaryCrossed> {
        let date = timestamp.date();
        match self.current {
            None => {
                self.current = Some(date);
                None
            }
            Some(prev) if prev != date => {
                self.current = Some(date);
                self.day_index += 1;
                Some(DayBoundaryCrossed {
                    day_index: self.day_index,
                    date,
                })
            }
            Some(_) => None,
        }
    }
}

impl Default for DayTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies a daily seed to a running state at a day boundary.
///
/// `deficit90` is always replaced. While the soil is still filling
/// (`swc < 0`) the surface content is replaced by `min(seed.swc35, 0)`;
/// during runoff the `policy` decides. The canopy store is kept.
pub fn reseed(state: &SimulationState, seed: &DailySeed, policy: ReseedPolicy) -> SimulationState {
    let swc = if state.swc < 0.0 {
        seed.swc35.min(0.0)
    } else {
        match policy {
            ReseedPolicy::KeepRunoff => state.swc,
            ReseedPolicy::Blend => ((state.swc + seed.swc35) / 2.0).max(0.0),
        }
    };
    SimulationState {
        swc,
        deficit90: seed.deficit90,
        leaf_intercepted: state.leaf_intercepted,
    }
}
