//! # clearsky-calendar
//!
//! Gregorian date arithmetic for acquisition time series.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["AcqDate"] -->|".ce()"| B["continuous day count"]
//!     A -->|".doy()"| C["Doy (1..=366)"]
//!     C -->|"DoyMask::is_allowed()"| D["seasonal filter"]
//!     A -->|"MonthSteps::new()"| E["first-of-month sequence"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use clearsky_calendar::{AcqDate, DoyMask, MonthSteps};
//!
//! let start = AcqDate::new(2020, 1, 1).unwrap();
//! let end = AcqDate::new(2020, 7, 1).unwrap();
//! assert_eq!(end.ce() - start.ce(), 182);
//!
//! // Growing season, day 91 to day 273
//! let season = DoyMask::from_range(91, 273).unwrap();
//! assert!(!season.allows(start));
//!
//! // Quarterly steps through the first half of 2020
//! assert_eq!(MonthSteps::new(start, end, 3).count(), 2);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `date` | Gregorian date with continuous day count |
//! | `doy` | Day-of-year newtype and allow-mask |
//! | `sequence` | Month-step sequences |
//! | `error` | Error types |

mod date;
mod doy;
mod error;
mod sequence;

pub use date::AcqDate;
pub use doy::{DAYS_IN_LEAP_YEAR, Doy, DoyMask};
pub use error::CalendarError;
pub use sequence::MonthSteps;
