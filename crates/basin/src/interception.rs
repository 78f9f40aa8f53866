//! Monthly vegetation interception capacity.

use crate::error::BasinError;
use crate::month::Month;
use crate::transform::check_non_negative;

/// Share of each precipitation sample the canopy can capture.
pub const INTERCEPTION_FRACTION: f64 = 0.2;

/// Maximum canopy water storage (mm) for each calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterceptionTable {
    capacity: [f64; 12],
}

impl InterceptionTable {
    /// Creates a table from exactly twelve monthly capacities, January first.
    ///
    /// # Errors
    ///
    /// Returns [`BasinError::IncompleteInterception`] if `monthly` does not
    /// have 12 entries, or [`BasinError::InvalidParameter`] if any entry is
    /// negative or non-finite.
    pub fn from_monthly(monthly: &[f64]) -> Result<Self, BasinError> {
        let capacity: [f64; 12] =
            monthly
                .try_into()
                .map_err(|_| BasinError::IncompleteInterception {
                    got: monthly.len(),
                })?;
        for &c in &capacity {
            check_non_negative("interception_capacity", c)?;
        }
        Ok(Self { capacity })
    }

    /// Capacity (mm) for a month.
    pub fn capacity(&self, month: Month) -> f64 {
        self.capacity[month.index()]
    }

    /// All twelve capacities, January first.
    pub fn as_array(&self) -> &[f64; 12] {
        &self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: [f64; 12] = [2.0, 2.0, 3.0, 5.0, 6.0, 8.0, 10.0, 9.0, 7.0, 6.0, 5.0, 3.0];

    #[test]
    fn lookup_by_month() {
        let t = InterceptionTable::from_monthly(&TABLE).unwrap();
        assert_eq!(t.capacity(Month::new(1).unwrap()), 2.0);
        assert_eq!(t.capacity(Month::new(7).unwrap()), 10.0);
        assert_eq!(t.capacity(Month::new(12).unwrap()), 3.0);
    }

    #[test]
    fn missing_month_rejected() {
        let err = InterceptionTable::from_monthly(&TABLE[..11]).unwrap_err();
        assert_eq!(err, BasinError::IncompleteInterception { got: 11 });
    }

    #[test]
    fn negative_capacity_rejected() {
        let mut bad = TABLE;
        bad[4] = -1.0;
        assert!(InterceptionTable::from_monthly(&bad).is_err());
    }
}
