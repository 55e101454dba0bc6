//! Calendar windows and their temporal index.
//!
//! The analysis period is cut into windows of a fixed number of months,
//! each narrowed to the allowed days of the year. The temporal index maps
//! every window to the contiguous run of time-steps whose acquisition date
//! falls inside it; it is built once per run and reused for every pixel.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │  MonthSteps   │────▶│   WindowSet    │────▶│  TemporalIndex   │
//!  │ (nominal, w)  │     │ (DOY-narrowed) │     │ (first..=last t) │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```
//! use clearsky_calendar::{AcqDate, DoyMask};
//! use clearsky_window::{TemporalIndex, WindowSet};
//!
//! let start = AcqDate::new(2021, 1, 1).unwrap();
//! let end = AcqDate::new(2021, 7, 1).unwrap();
//! let mask = DoyMask::all();
//! let windows = WindowSet::build(start, end, 1, &mask).unwrap();
//! assert_eq!(windows.len(), 6);
//!
//! let dates = [AcqDate::new(2021, 1, 5).unwrap(), AcqDate::new(2021, 3, 8).unwrap()];
//! let index = TemporalIndex::build(&windows, &dates, &mask);
//! assert!(index.range(1).is_none());
//! ```

mod error;
mod index;
mod window;

pub use error::WindowError;
pub use index::{TemporalIndex, TimeRange};
pub use window::{Window, WindowSet};
