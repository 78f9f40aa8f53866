//! Error types for creek-io.

use std::path::PathBuf;

use chrono::NaiveDate;

/// Error type for all fallible operations in the creek-io crate.
///
/// This enum covers file access, CSV parsing, missing columns, unparseable
/// timestamps or values, and soil records that do not cover an event.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the CSV library.
    #[error("csv error in {}: {reason}", path.display())]
    Csv {
        /// File being read or written.
        path: PathBuf,
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Returned when a required column is not present in the header.
    #[error("column '{name}' not found in {}", path.display())]
    MissingColumn {
        /// Name of the missing column.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a timestamp or date cannot be parsed.
    #[error("invalid time at row {row}: '{value}'")]
    InvalidTime {
        /// 1-based data row.
        row: usize,
        /// The offending text.
        value: String,
    },

    /// Returned when a numeric field cannot be parsed.
    #[error("invalid value in column '{column}' at row {row}: '{value}'")]
    InvalidValue {
        /// Column name.
        column: String,
        /// 1-based data row.
        row: usize,
        /// The offending text.
        value: String,
    },

    /// Returned when a file holds a header but no data rows.
    #[error("no data rows in {}", path.display())]
    Empty {
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when no soil record exists for a required date.
    #[error("no soil record for {date}")]
    MissingSoilDate {
        /// Date that was looked up.
        date: NaiveDate,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },
}

impl IoError {
    pub(crate) fn csv(path: &std::path::Path, e: impl std::fmt::Display) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }
}
