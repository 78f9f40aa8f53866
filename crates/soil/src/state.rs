//! Soil-moisture state carried from one sample to the next.

use serde::Serialize;

/// Operating phase selected by the sign of the incoming surface water content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// `swc < 0`: rain refills the soil, no runoff.
    SoilFilling,
    /// `swc >= 0`: surface storage drains as runoff.
    Runoff,
}

/// State of one simulation run.
///
/// * `swc` (mm): negative is the deficit left in the surface soil layer,
///   non-negative is water stored at the surface.
/// * `deficit90` (mm): deficit over 90 cm of soil; negative means wetter than
///   field capacity.
/// * `leaf_intercepted` (mm): water currently held by the canopy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationState {
    pub swc: f64,
    pub deficit90: f64,
    pub leaf_intercepted: f64,
}

impl SimulationState {
    /// State with an empty canopy.
    pub fn new(swc: f64, deficit90: f64) -> Self {
        Self {
            swc,
            deficit90,
            leaf_intercepted: 0.0,
        }
    }

    /// Phase the next step will run in.
    pub fn phase(&self) -> Phase {
        if self.swc < 0.0 {
            Phase::SoilFilling
        } else {
            Phase::Runoff
        }
    }
}
