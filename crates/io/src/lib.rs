//! # clearsky-io
//!
//! Read acquisition tiles from JSON files and write the computed
//! clear-sky observation products back as JSON. Bridges files on disk
//! and the in-memory [`TimeSeries`](clearsky_engine::TimeSeries) /
//! [`ProductSet`](clearsky_engine::ProductSet) types of the engine.

mod error;
mod reader;
mod validate;
mod writer;

pub use error::IoError;
pub use reader::{TileData, TileId, parse_tile, read_tile};
pub use writer::{WriterConfig, product_dir, write_products};
