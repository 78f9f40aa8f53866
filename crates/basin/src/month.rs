//! Validated calendar month.

use chrono::Datelike;

use crate::error::BasinError;

/// A calendar month in 1..=12.
///
/// Holding a `Month` is proof that monthly table lookups cannot go out of
/// range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(u8);

impl Month {
    /// Creates a month from its 1-based number.
    ///
    /// # Errors
    ///
    /// Returns [`BasinError::InvalidMonth`] if `month` is outside 1..=12.
    pub fn new(month: u32) -> Result<Self, BasinError> {
        if (1..=12).contains(&month) {
            Ok(Self(month as u8))
        } else {
            Err(BasinError::InvalidMonth { month })
        }
    }

    /// Month of a date or date-time.
    pub fn of<D: Datelike>(date: &D) -> Self {
        // chrono guarantees month() is in 1..=12
        Self(date.month() as u8)
    }

    /// 1-based month number.
    pub fn get(self) -> u8 {
        self.0
    }

    /// 0-based index into a 12-element table.
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }
}
