//! CSV writer for simulation output.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use creek_soil::OutputRecord;

use crate::error::IoError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Serialize)]
struct OutputRow {
    timestamp: String,
    precipitation: f64,
    water_level: f64,
    swc: f64,
    deficit90: f64,
    discharge: Option<f64>,
}

impl From<&OutputRecord> for OutputRow {
    fn from(r: &OutputRecord) -> Self {
        Self {
            timestamp: r.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            precipitation: r.precipitation,
            water_level: r.water_level,
            swc: r.swc,
            deficit90: r.deficit90,
            discharge: r.discharge,
        }
    }
}

/// Write simulation output with columns
/// `timestamp,precipitation,water_level,swc,deficit90,discharge`.
///
/// `discharge` is left empty for basins without a rating curve.
///
/// # Errors
///
/// Returns [`IoError::Csv`] if the file cannot be created or written.
pub fn write_output(path: &Path, records: &[OutputRecord]) -> Result<(), IoError> {
    let mut wtr = csv::Writer::from_path(path).map_err(|e| IoError::csv(path, e))?;
    for record in records {
        wtr.serialize(OutputRow::from(record))
            .map_err(|e| IoError::csv(path, e))?;
    }
    wtr.flush().map_err(|e| IoError::csv(path, e))?;

    info!(path = %path.display(), n_rows = records.len(), "wrote simulation output");
    Ok(())
}
