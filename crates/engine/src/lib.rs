//! # clearsky-engine
//!
//! Windowed clear-sky observation (CSO) statistics for one tile.
//!
//! For every pixel and every calendar window the engine measures how long
//! the pixel waited between clear-sky observations (the revisit gaps,
//! including the gaps to both window boundaries) and reduces those gaps
//! to the requested statistics: count, min/max/range, mean, standard
//! deviation, skewness, kurtosis, quantiles and the interquartile range.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph TD
//!     A["CsoConfig"] -->|"Registry::resolve()"| B["dense output slots"]
//!     A -->|"WindowSet::build()"| C["windows"]
//!     C -->|"TemporalIndex::build()"| D["time-step range per window"]
//!     E["TimeSeries"] --> F["accumulate_window() per pixel (rayon)"]
//!     D --> F
//!     F -->|"one-pass moments + GapScratch"| G["ProductSet"]
//!     B --> G
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use clearsky_calendar::AcqDate;
//! use clearsky_engine::{
//!     CsoConfig, NODATA, ProcessingMask, StatisticKind, StatisticSet, TimeSeries,
//!     clear_sky_observations,
//! };
//!
//! let d = |m, day| AcqDate::new(2020, m, day).unwrap();
//!
//! // Two pixels, three acquisitions; the second pixel is masked out.
//! let series = TimeSeries::from_rows(
//!     vec![d(1, 11), d(2, 5), d(2, 20)],
//!     &[vec![true, true], vec![true, false], vec![false, true]],
//!     2,
//! )
//! .unwrap();
//! let mask = ProcessingMask::new(vec![true, false]);
//!
//! let config = CsoConfig::new(d(1, 1), d(3, 1)).with_statistics(
//!     StatisticSet::new()
//!         .with(StatisticKind::Count)
//!         .with(StatisticKind::Max),
//! );
//! let products = clear_sky_observations(&series, Some(&mask), &config).unwrap();
//!
//! let max = products.get(StatisticKind::Max).unwrap();
//! assert_eq!(max.bands().len(), 2);
//! assert_eq!(max.value(0, 0), Some(21)); // Jan 11 to Feb 1
//! assert_eq!(max.value(1, 0), Some(25)); // Feb 5 to Mar 1
//! assert_eq!(max.value(0, 1), Some(NODATA));
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `statistic` | Statistic kinds, product codes and the enable set |
//! | `registry` | Dense slot assignment of the enabled statistics |
//! | `config` | Run configuration |
//! | `series` | Validated acquisitions and processing mask |
//! | `accumulate` | Per-pixel, per-window gap reduction and encoding |
//! | `product` | Output band stacks and naming |
//! | `engine` | Parallel run over a tile |
//! | `error` | Error types |

mod accumulate;
mod config;
mod engine;
mod error;
mod product;
mod registry;
mod series;
mod statistic;

pub use accumulate::{GapScratch, GapSummary, accumulate_window};
pub use config::CsoConfig;
pub use engine::clear_sky_observations;
pub use error::EngineError;
pub use product::{Band, NODATA, Product, ProductSet, product_basename};
pub use registry::Registry;
pub use series::{ProcessingMask, TimeSeries};
pub use statistic::{StatisticKind, StatisticSet};
