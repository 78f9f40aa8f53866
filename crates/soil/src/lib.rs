//! # creek-soil
//!
//! Soil-moisture state machine that turns a precipitation series into a
//! creek water-level series for one basin.
//!
//! A negative surface water content (`swc`) is a soil deficit: rain refills
//! it and no runoff occurs. Once `swc` reaches zero the surface store drains
//! as runoff and the level follows the basin's sigmoid transform.
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use creek_basin::{BasinCatalog, BasinId};
//! use creek_soil::{DailySeed, RunOptions, Sample, run_event};
//!
//! let catalog = BasinCatalog::builtin();
//! let ravone = catalog.resolve(BasinId::Ravone).unwrap();
//!
//! let t0 = NaiveDate::from_ymd_opt(2024, 10, 19).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let samples: Vec<Sample> = (0..6)
//!     .map(|h| Sample {
//!         timestamp: t0 + chrono::Duration::hours(h),
//!         precipitation: 0.0,
//!     })
//!     .collect();
//!
//! let seeds = [DailySeed::from_deficits(30.0, 60.0)];
//! let out = run_event(ravone, &samples, &seeds, &RunOptions::default()).unwrap();
//! assert!(out.water_levels().iter().all(|&l| l == ravone.zero_level()));
//! assert_eq!(out.runoff_start(), None);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `interval` | Constant sample interval |
//! | `state` | Simulation state and phase |
//! | `step` | Single-sample transition |
//! | `reseed` | Day-boundary detection and daily seeds |
//! | `run` | Event driver and output series |
//! | `sweep` | Parallel antecedent-state scenarios |

mod error;
mod interval;
mod reseed;
mod run;
mod state;
mod step;
mod sweep;

pub use error::SoilError;
pub use interval::SampleInterval;
pub use reseed::{DailySeed, DayBoundaryCrossed, DayTracker, ReseedPolicy, reseed};
pub use run::{
    AlarmExceedance, OutputRecord, RunOptions, Sample, SimulationOutput, Simulator, run_event,
    run_from_state,
};
pub use state::{Phase, SimulationState};
pub use step::{StepFluxes, StepResult, deep_infiltration, leaf_interception, step};
pub use sweep::{DEFAULT_SURFACE_RATIO, Scenario, ScenarioOutcome, deficit_scenarios, sweep};
