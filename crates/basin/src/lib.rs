//! # creek-basin
//!
//! Per-basin configuration for the creek water-level model: the sigmoid
//! transform from surface water content to gauge level, the deep
//! infiltration curve, monthly canopy interception, and the optional rating
//! curve and alarm thresholds.
//!
//! ## Quick Start
//!
//! ```
//! use creek_basin::{BasinCatalog, BasinId};
//!
//! let catalog = BasinCatalog::builtin();
//! let ravone = catalog.resolve(BasinId::Ravone).unwrap();
//!
//! // Below saturation the gauge reads its zero level.
//! assert_eq!(ravone.level(-10.0), ravone.zero_level());
//! assert!(ravone.level(40.0) > ravone.level(20.0));
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `id` | Closed set of basin identifiers |
//! | `month` | Validated calendar month for table lookups |
//! | `transform` | Sigmoid swc-to-level transform |
//! | `infiltration` | Deep-infiltration capacity curve |
//! | `interception` | Monthly canopy interception table |
//! | `rating` | Rating curve and alarm thresholds |
//! | `profile` | Immutable basin profile and its builder |
//! | `catalog` | Identifier-to-profile resolution |

mod catalog;
mod error;
mod id;
mod infiltration;
mod interception;
mod month;
mod profile;
mod rating;
mod transform;

pub use catalog::BasinCatalog;
pub use error::BasinError;
pub use id::BasinId;
pub use infiltration::InfiltrationCurve;
pub use interception::{INTERCEPTION_FRACTION, InterceptionTable};
pub use month::Month;
pub use profile::{BasinProfile, BasinProfileBuilder};
pub use rating::{AlarmLevels, AlarmStage, RatingCurve};
pub use transform::LevelTransform;
