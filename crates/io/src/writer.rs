//! JSON product writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clearsky_engine::{Product, ProductSet};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::IoError;
use crate::reader::TileId;

/// Configuration for writing products.
#[derive(Debug, Clone, Default)]
pub struct WriterConfig {
    /// Write each product into a sub-directory named after its code.
    subfolders: bool,
    /// Indent the JSON output.
    pretty: bool,
}

impl WriterConfig {
    /// Sets whether each product goes to a sub-directory named after its code.
    pub fn with_subfolders(mut self, subfolders: bool) -> Self {
        self.subfolders = subfolders;
        self
    }

    /// Sets whether the JSON output is indented.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Returns whether products go to per-code sub-directories.
    pub fn subfolders(&self) -> bool {
        self.subfolders
    }

    /// Returns whether the JSON output is indented.
    pub fn pretty(&self) -> bool {
        self.pretty
    }
}

#[derive(Serialize)]
struct ProductDoc<'a> {
    product: &'a str,
    basename: &'a str,
    tile_x: i32,
    tile_y: i32,
    n_pixels: usize,
    nodata: i16,
    bands: Vec<BandDoc<'a>>,
}

#[derive(Serialize)]
struct BandDoc<'a> {
    index: usize,
    label: &'a str,
    date: String,
    values: &'a [i16],
}

/// Directory a product of `tile` is written to.
pub fn product_dir(root: &Path, tile: TileId, code: &str, config: &WriterConfig) -> PathBuf {
    let dir = root.join(tile.dirname());
    if config.subfolders {
        dir.join(code)
    } else {
        dir
    }
}

/// Write every product of `products` as one JSON document.
///
/// Files go to `root/X{x}_Y{y}[/{code}]/{basename}.json`. Bands whose save
/// flag is off are left out, and a product without any saved band is not
/// written at all. Returns the paths written, in product order.
///
/// # Errors
///
/// Returns [`IoError::Io`] if a directory or file cannot be created, or
/// [`IoError::Json`] if serialisation fails.
#[tracing::instrument(skip_all, fields(root = %root.display(), tile = %tile))]
pub fn write_products(
    root: &Path,
    tile: TileId,
    products: &ProductSet,
    config: &WriterConfig,
) -> Result<Vec<PathBuf>, IoError> {
    let mut written = Vec::with_capacity(products.len());
    for product in products {
        if !product.bands().iter().any(|b| b.save()) {
            debug!(product = product.code(), "no band to save, skipped");
            continue;
        }
        let dir = product_dir(root, tile, product.code(), config);
        std::fs::create_dir_all(&dir).map_err(|e| IoError::from_io(&dir, &e))?;
        let path = dir.join(format!("{}.json", product.basename()));
        write_product(&path, tile, products.n_pixels(), product, config)?;
        debug!(path = %path.display(), "product written");
        written.push(path);
    }
    info!(n_written = written.len(), "products written");
    Ok(written)
}

fn write_product(
    path: &Path,
    tile: TileId,
    n_pixels: usize,
    product: &Product,
    config: &WriterConfig,
) -> Result<(), IoError> {
    let doc = ProductDoc {
        product: product.code(),
        basename: product.basename(),
        tile_x: tile.x,
        tile_y: tile.y,
        n_pixels,
        nodata: product.bands().first().map_or(clearsky_engine::NODATA, |b| b.nodata()),
        bands: product
            .bands()
            .iter()
            .filter(|b| b.save())
            .map(|b| BandDoc {
                index: b.index(),
                label: b.label(),
                date: b.date().to_string(),
                values: b.values(),
            })
            .collect(),
    };

    let file = File::create(path).map_err(|e| IoError::from_io(path, &e))?;
    let mut out = BufWriter::new(file);
    if config.pretty {
        serde_json::to_writer_pretty(&mut out, &doc)?;
    } else {
        serde_json::to_writer(&mut out, &doc)?;
    }
    out.flush().map_err(|e| IoError::from_io(path, &e))?;
    Ok(())
}
