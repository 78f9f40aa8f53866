//! CSV readers for precipitation events and daily soil balances.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use creek_soil::{DailySeed, Sample};
use creek_validate::LevelSeries;

use crate::error::IoError;

/// Accepted timestamp layouts, tried in order.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Column names and missing-value marker for event files.
///
/// Header lookups ignore case and underscores, so `DEFICIT_35` matches
/// `deficit35`.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    timestamp_column: String,
    precipitation_column: String,
    /// Optional observed level column; absent columns are not an error.
    level_column: Option<String>,
    /// Level value that marks a missing reading.
    missing_value: f64,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            timestamp_column: "timestamp".into(),
            precipitation_column: "precipitation".into(),
            level_column: Some("level".into()),
            missing_value: -9999.0,
        }
    }
}

impl ReaderConfig {
    /// Set the timestamp column name.
    pub fn with_timestamp_column(mut self, name: impl Into<String>) -> Self {
        self.timestamp_column = name.into();
        self
    }

    /// Set the precipitation column name.
    pub fn with_precipitation_column(mut self, name: impl Into<String>) -> Self {
        self.precipitation_column = name.into();
        self
    }

    /// Set the observed level column name, or `None` to skip it.
    pub fn with_level_column(mut self, name: Option<impl Into<String>>) -> Self {
        self.level_column = name.map(Into::into);
        self
    }

    /// Set the missing-value marker for levels.
    pub fn with_missing_value(mut self, value: f64) -> Self {
        self.missing_value = value;
        self
    }

    pub fn level_column(&self) -> Option<&str> {
        self.level_column.as_deref()
    }

    pub fn missing_value(&self) -> f64 {
        self.missing_value
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] for empty column names or a NaN
    /// missing-value marker.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut problems = Vec::new();
        if self.timestamp_column.trim().is_empty() {
            problems.push("timestamp column name is empty".to_string());
        }
        if self.precipitation_column.trim().is_empty() {
            problems.push("precipitation column name is empty".to_string());
        }
        if self.missing_value.is_nan() {
            problems.push("missing value marker must not be NaN".to_string());
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: problems.len(),
                details: problems.join("; "),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// EventData
// ---------------------------------------------------------------------------

/// Precipitation series of one event, with observed levels when present.
#[derive(Debug, Clone, PartialEq)]
pub struct EventData {
    timestamps: Vec<NaiveDateTime>,
    precipitation: Vec<f64>,
    /// Observed level (m); NaN where missing.
    level: Option<Vec<f64>>,
}

impl EventData {
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn precipitation(&self) -> &[f64] {
        &self.precipitation
    }

    pub fn level(&self) -> Option<&[f64]> {
        self.level.as_deref()
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Calendar day of the first sample.
    pub fn first_day(&self) -> Option<NaiveDate> {
        self.timestamps.first().map(NaiveDateTime::date)
    }

    /// Simulator input samples.
    pub fn samples(&self) -> Vec<Sample> {
        self.timestamps
            .iter()
            .zip(&self.precipitation)
            .map(|(&timestamp, &precipitation)| Sample {
                timestamp,
                precipitation,
            })
            .collect()
    }

    /// Observed level series, if the file carried one.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the series cannot be built.
    pub fn observed_levels(&self) -> Result<Option<LevelSeries>, IoError> {
        match &self.level {
            None => Ok(None),
            Some(level) => LevelSeries::new(self.timestamps.clone(), level.clone())
                .map(Some)
                .map_err(|e| IoError::Validation {
                    count: 1,
                    details: e.to_string(),
                }),
        }
    }
}

/// Read an event file with columns `timestamp,precipitation[,level]`.
///
/// Empty level fields and the configured missing-value marker become NaN.
///
/// # Errors
///
/// Returns [`IoError`] for a missing file, CSV failures, missing columns,
/// unparseable fields, an empty file or timestamps that are not strictly
/// increasing.
pub fn read_event(path: &Path, config: &ReaderConfig) -> Result<EventData, IoError> {
    config.validate()?;
    let mut rdr = open(path)?;
    let headers = rdr.headers().map_err(|e| IoError::csv(path, e))?.clone();

    let ts_col = column(&headers, &config.timestamp_column, path)?;
    let precip_col = column(&headers, &config.precipitation_column, path)?;
    let level_col = config
        .level_column
        .as_deref()
        .and_then(|name| find_column(&headers, name));

    let mut timestamps = Vec::new();
    let mut precipitation = Vec::new();
    let mut level = level_col.map(|_| Vec::new());

    for (i, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| IoError::csv(path, e))?;
        let row = i + 1;
        timestamps.push(parse_timestamp(field(&record, ts_col), row)?);
        precipitation.push(parse_value(
            field(&record, precip_col),
            &config.precipitation_column,
            row,
        )?);
        if let (Some(col), Some(values)) = (level_col, level.as_mut()) {
            values.push(parse_level(field(&record, col), config, row)?);
        }
    }

    if timestamps.is_empty() {
        return Err(IoError::Empty {
            path: path.to_path_buf(),
        });
    }
    if let Some(i) = timestamps.windows(2).position(|w| w[1] <= w[0]) {
        return Err(IoError::Validation {
            count: 1,
            details: format!("timestamps not strictly increasing at row {}", i + 2),
        });
    }

    info!(
        path = %path.display(),
        n_samples = timestamps.len(),
        has_level = level.is_some(),
        "read event"
    );
    Ok(EventData {
        timestamps,
        precipitation,
        level,
    })
}

// ---------------------------------------------------------------------------
// Soil balance
// ---------------------------------------------------------------------------

/// Daily output of the soil water-balance model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilRecord {
    pub date: NaiveDate,
    /// Deficit over 35 cm (mm).
    pub deficit35: f64,
    /// Deficit over 90 cm (mm).
    pub deficit90: f64,
}

impl SoilRecord {
    pub fn seed(&self) -> DailySeed {
        DailySeed::from_deficits(self.deficit35, self.deficit90)
    }
}

/// Read a soil file with columns `date,deficit35,deficit90`.
///
/// # Errors
///
/// Returns [`IoError`] for a missing file, CSV failures, missing columns,
/// unparseable fields or an empty file.
pub fn read_soil(path: &Path) -> Result<Vec<SoilRecord>, IoError> {
    let mut rdr = open(path)?;
    let headers = rdr.headers().map_err(|e| IoError::csv(path, e))?.clone();
    let date_col = column(&headers, "date", path)?;
    let d35_col = column(&headers, "deficit35", path)?;
    let d90_col = column(&headers, "deficit90", path)?;

    let mut records = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| IoError::csv(path, e))?;
        let row = i + 1;
        let raw_date = field(&record, date_col);
        // Accept a trailing time part, as written by some exports.
        let date_part = raw_date.split([' ', 'T']).next().unwrap_or(raw_date);
        let date = NaiveDate::parse_from_str(date_part, DATE_FORMAT).map_err(|_| {
            IoError::InvalidTime {
                row,
                value: raw_date.to_string(),
            }
        })?;
        records.push(SoilRecord {
            date,
            deficit35: parse_value(field(&record, d35_col), "deficit35", row)?,
            deficit90: parse_value(field(&record, d90_col), "deficit90", row)?,
        });
    }

    if records.is_empty() {
        return Err(IoError::Empty {
            path: path.to_path_buf(),
        });
    }
    records.sort_by_key(|r| r.date);
    info!(path = %path.display(), n_days = records.len(), "read soil balance");
    Ok(records)
}

/// Daily seeds for an event starting on `first_day`.
///
/// The first seed is the balance of the day before the event; following
/// seeds are taken from consecutive days until the records end or a day is
/// missing.
///
/// # Errors
///
/// Returns [`IoError::MissingSoilDate`] if the day before `first_day` has no
/// record.
pub fn seeds_for_event(records: &[SoilRecord], first_day: NaiveDate) -> Result<Vec<DailySeed>, IoError> {
    let start = first_day.pred_opt().ok_or(IoError::MissingSoilDate { date: first_day })?;
    let from = records
        .iter()
        .position(|r| r.date == start)
        .ok_or(IoError::MissingSoilDate { date: start })?;

    let mut seeds = Vec::new();
    let mut expected = start;
    for r in &records[from..] {
        if r.date != expected {
            break;
        }
        seeds.push(r.seed());
        match expected.succ_opt() {
            Some(next) => expected = next,
            None => break,
        }
    }
    debug!(start = %start, n_seeds = seeds.len(), "selected daily seeds");
    Ok(seeds)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open(path: &Path) -> Result<csv::Reader<std::fs::File>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| IoError::csv(path, e))
}

fn normalise(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    let wanted = normalise(name);
    headers.iter().position(|h| normalise(h) == wanted)
}

fn column(headers: &StringRecord, name: &str, path: &Path) -> Result<usize, IoError> {
    find_column(headers, name).ok_or_else(|| IoError::MissingColumn {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

fn field(record: &StringRecord, col: usize) -> &str {
    record.get(col).unwrap_or("")
}

fn parse_timestamp(s: &str, row: usize) -> Result<NaiveDateTime, IoError> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| IoError::InvalidTime {
            row,
            value: s.to_string(),
        })
}

fn parse_value(s: &str, column: &str, row: usize) -> Result<f64, IoError> {
    s.parse::<f64>().map_err(|_| IoError::InvalidValue {
        column: column.to_string(),
        row,
        value: s.to_string(),
    })
}

fn parse_level(s: &str, config: &ReaderConfig, row: usize) -> Result<f64, IoError> {
    if s.is_empty() {
        return Ok(f64::NAN);
    }
    let v = parse_value(s, config.level_column.as_deref().unwrap_or("level"), row)?;
    Ok(if v == config.missing_value { f64::NAN } else { v })
}
