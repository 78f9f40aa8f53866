//! # creek-io
//!
//! Read precipitation events and daily soil balances from CSV and write
//! simulation output back to CSV. Bridges the file formats into the
//! simulator's [`Sample`](creek_soil::Sample) and
//! [`DailySeed`](creek_soil::DailySeed) inputs and the validator's
//! [`LevelSeries`](creek_validate::LevelSeries).

mod error;
mod reader;
mod writer;

pub use error::IoError;
pub use reader::{EventData, ReaderConfig, SoilRecord, read_event, read_soil, seeds_for_event};
pub use writer::write_output;
