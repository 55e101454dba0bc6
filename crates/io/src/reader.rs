//! JSON tile reader.
//!
//! A tile file lists the acquisitions of one tile in chronological order,
//! each with its date and one 0/1 clear-sky flag per pixel, plus an
//! optional 0/1 processing mask:
//!
//! ```json
//! {
//!   "tile_x": 12,
//!   "tile_y": 7,
//!   "n_pixels": 3,
//!   "acquisitions": [
//!     { "date": "2021-04-06", "valid": [1, 0, 1] },
//!     { "date": "2021-04-21", "valid": [1, 1, 0] }
//!   ],
//!   "mask": [1, 1, 0]
//! }
//! ```

use std::path::Path;

use clearsky_calendar::AcqDate;
use clearsky_engine::{ProcessingMask, TimeSeries};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::IoError;
use crate::validate::{ValidationCollector, validate_bitmap, validate_chronology};

/// Grid position of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId {
    /// Column of the tile in the grid.
    pub x: i32,
    /// Row of the tile in the grid.
    pub y: i32,
}

impl TileId {
    /// Creates a tile id.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Directory name of the tile, `X{x:04}_Y{y:04}`.
    pub fn dirname(&self) -> String {
        format!("X{:04}_Y{:04}", self.x, self.y)
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.dirname())
    }
}

/// A tile read from disk, ready for the engine.
#[derive(Debug, Clone)]
pub struct TileData {
    tile: TileId,
    series: TimeSeries,
    mask: Option<ProcessingMask>,
}

impl TileData {
    /// Grid position of the tile.
    pub fn tile(&self) -> TileId {
        self.tile
    }

    /// Acquisitions and clear-sky flags.
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Processing mask, if the file carries one.
    pub fn mask(&self) -> Option<&ProcessingMask> {
        self.mask.as_ref()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TileFile {
    tile_x: i32,
    tile_y: i32,
    n_pixels: usize,
    acquisitions: Vec<AcquisitionRecord>,
    #[serde(default)]
    mask: Option<Vec<u8>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AcquisitionRecord {
    date: String,
    valid: Vec<u8>,
}

/// Read a tile from a JSON file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist,
/// [`IoError::Json`] if it is not a tile document, or
/// [`IoError::Validation`] listing every malformed date, bitmap and
/// out-of-order acquisition.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_tile(path: &Path) -> Result<TileData, IoError> {
    let text = std::fs::read_to_string(path).map_err(|e| IoError::from_io(path, &e))?;
    let tile = parse_tile(&text)?;
    info!(
        tile = %tile.tile,
        n_pixels = tile.series.n_pixels(),
        n_acquisitions = tile.series.len(),
        masked = tile.mask.is_some(),
        "tile read"
    );
    Ok(tile)
}

/// Parse a tile from a JSON document.
///
/// # Errors
///
/// See [`read_tile`].
pub fn parse_tile(text: &str) -> Result<TileData, IoError> {
    let file: TileFile = serde_json::from_str(text)?;
    let n_pixels = file.n_pixels;

    let mut c = ValidationCollector::new();
    let mut dates = Vec::with_capacity(file.acquisitions.len());
    for (t, acq) in file.acquisitions.iter().enumerate() {
        match acq.date.parse::<AcqDate>() {
            Ok(date) => dates.push(date),
            Err(e) => c.push(format!("acquisition {t}: {e}")),
        }
        c.merge(validate_bitmap(
            &format!("acquisition {t} valid"),
            &acq.valid,
            n_pixels,
        ));
    }
    if let Some(mask) = &file.mask {
        c.merge(validate_bitmap("mask", mask, n_pixels));
    }
    if c.is_empty() {
        c.merge(validate_chronology(&dates));
    }
    c.finish()?;

    let mut validity = Vec::with_capacity(dates.len() * n_pixels);
    for acq in &file.acquisitions {
        validity.extend(acq.valid.iter().map(|&v| v == 1));
    }
    let series = TimeSeries::new(dates, validity, n_pixels)?;
    let mask = file
        .mask
        .map(|bits| ProcessingMask::new(bits.into_iter().map(|b| b == 1).collect()));

    debug!(
        n_clear = (0..series.len())
            .map(|t| (0..n_pixels).filter(|&p| series.is_valid(t, p)).count())
            .sum::<usize>(),
        "clear-sky flags parsed"
    );

    Ok(TileData {
        tile: TileId::new(file.tile_x, file.tile_y),
        series,
        mask,
    })
}
