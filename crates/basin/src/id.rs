//! Basin identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BasinError;

/// Identifier of a gauged creek basin.
///
/// Parsing is case-insensitive. Unrecognised names are an error; there is no
/// default basin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasinId {
    /// Ravone creek (15-minute gauge).
    Ravone,
    /// Quaderna creek (30-minute gauge).
    Quaderna,
}

impl BasinId {
    /// All known basins, in declaration order.
    pub const ALL: [BasinId; 2] = [BasinId::Ravone, BasinId::Quaderna];

    /// Lowercase name used in configuration files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            BasinId::Ravone => "ravone",
            BasinId::Quaderna => "quaderna",
        }
    }
}

impl fmt::Display for BasinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BasinId {
    type Err = BasinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ravone" => Ok(BasinId::Ravone),
            "quaderna" => Ok(BasinId::Quaderna),
            _ => Err(BasinError::UnknownBasin {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_case_insensitive() {
        assert_eq!("Ravone".parse::<BasinId>().unwrap(), BasinId::Ravone);
        assert_eq!(" QUADERNA ".parse::<BasinId>().unwrap(), BasinId::Quaderna);
    }

    #[test]
    fn parse_unknown_is_error() {
        let err = "savena".parse::<BasinId>().unwrap_err();
        assert_eq!(
            err,
            BasinError::UnknownBasin {
                name: "savena".to_string()
            }
        );
    }

    #[test]
    fn display_round_trips() {
        for id in BasinId::ALL {
            assert_eq!(id.to_string().parse::<BasinId>().unwrap(), id);
        }
    }
}
