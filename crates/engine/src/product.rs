//! Output products: one band stack per active statistic, one band per window.

use clearsky_calendar::AcqDate;
use clearsky_window::WindowSet;
use rayon::prelude::*;

use crate::config::CsoConfig;
use crate::error::EngineError;
use crate::registry::Registry;
use crate::statistic::StatisticKind;

/// Nodata sentinel of every band.
pub const NODATA: i16 = i16::MIN;

/// Base file name of the product for statistic `code`.
///
/// `{y0}-{y1}_{doy0}-{doy1}-{step}_HL_CSO_{target}_{code}`, where `y0`/`y1`
/// are the years of the analysis period and `doy0`/`doy1` the bounds of the
/// day-of-year mask.
///
/// # Example
///
/// ```
/// use clearsky_calendar::{AcqDate, DoyMask};
/// use clearsky_engine::{CsoConfig, product_basename};
///
/// let config = CsoConfig::new(
///     AcqDate::new(2018, 1, 1).unwrap(),
///     AcqDate::new(2019, 12, 31).unwrap(),
/// )
/// .with_step(3)
/// .with_doy_mask(DoyMask::from_range(60, 300).unwrap())
/// .with_target("LNDLG");
///
/// assert_eq!(
///     product_basename(&config, "AVG"),
///     "2018-2019_060-300-03_HL_CSO_LNDLG_AVG"
/// );
/// ```
pub fn product_basename(config: &CsoConfig, code: &str) -> String {
    let (doy0, doy1) = config.doy_mask().bounds();
    format!(
        "{:04}-{:04}_{:03}-{:03}-{:02}_HL_CSO_{}_{}",
        config.start().year(),
        config.end().year(),
        doy0.get(),
        doy1.get(),
        config.step(),
        config.target(),
        code
    )
}

/// One window of one product.
#[derive(Debug, Clone)]
pub struct Band {
    index: usize,
    date: AcqDate,
    label: String,
    nodata: i16,
    save: bool,
    values: Vec<i16>,
}

impl Band {
    /// 1-based band number (window order).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Nominal start date of the window.
    pub fn date(&self) -> AcqDate {
        self.date
    }

    /// Band label, the window start as `YYYYMMDD`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Nodata sentinel.
    pub fn nodata(&self) -> i16 {
        self.nodata
    }

    /// Whether the band is written out.
    pub fn save(&self) -> bool {
        self.save
    }

    /// Sets whether the band is written out.
    pub fn set_save(&mut self, save: bool) {
        self.save = save;
    }

    /// One value per pixel.
    pub fn values(&self) -> &[i16] {
        &self.values
    }
}

/// Band stack of one statistic.
#[derive(Debug, Clone)]
pub struct Product {
    kind: StatisticKind,
    code: String,
    basename: String,
    bands: Vec<Band>,
}

impl Product {
    /// Statistic held by this product.
    pub fn kind(&self) -> StatisticKind {
        self.kind
    }

    /// Short product code, e.g. `"NUM"`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Base file name.
    pub fn basename(&self) -> &str {
        &self.basename
    }

    /// Bands in window order.
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Mutable bands in window order.
    pub fn bands_mut(&mut self) -> &mut [Band] {
        &mut self.bands
    }

    /// Value of `pixel` in window `w`.
    pub fn value(&self, w: usize, pixel: usize) -> Option<i16> {
        self.bands.get(w)?.values.get(pixel).copied()
    }
}

/// All products of one run, in slot order, with the window table.
#[derive(Debug, Clone)]
pub struct ProductSet {
    products: Vec<Product>,
    windows: WindowSet,
    n_pixels: usize,
}

/// Allocates `len` values filled with [`NODATA`] without aborting on failure.
pub(crate) fn try_nodata_vec(len: usize, product: &str) -> Result<Vec<i16>, EngineError> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(len)
        .map_err(|_| EngineError::Allocation {
            product: product.to_string(),
            bytes: len.saturating_mul(std::mem::size_of::<i16>()),
        })?;
    values.resize(len, NODATA);
    Ok(values)
}

impl ProductSet {
    /// Allocates one product per registry slot, each with one band of
    /// `n_pixels` nodata values per window.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Allocation`] if any band cannot be allocated;
    /// everything allocated so far is dropped.
    pub fn allocate(
        registry: &Registry,
        windows: WindowSet,
        n_pixels: usize,
        config: &CsoConfig,
    ) -> Result<Self, EngineError> {
        let mut products = Vec::with_capacity(registry.len());
        for (_, kind) in registry.iter() {
            let code = kind.code();
            let mut bands = Vec::with_capacity(windows.len());
            for (w, window) in windows.iter().enumerate() {
                let date = window.nominal_start();
                bands.push(Band {
                    index: w + 1,
                    date,
                    label: date.compact(),
                    nodata: NODATA,
                    save: true,
                    values: try_nodata_vec(n_pixels, &code)?,
                });
            }
            products.push(Product {
                kind,
                basename: product_basename(config, &code),
                code,
                bands,
            });
        }
        Ok(Self {
            products,
            windows,
            n_pixels,
        })
    }

    /// Copies a pixel-major block of results into the bands.
    ///
    /// `block` covers the pixels `first_pixel..first_pixel + n` and holds
    /// `stride = n_products * n_windows` values per pixel, laid out as
    /// `block[i * stride + slot * n_windows + w]` for pixel `first_pixel + i`.
    pub(crate) fn scatter(&mut self, first_pixel: usize, block: &[i16]) {
        let n_windows = self.windows.len();
        let stride = self.products.len() * n_windows;
        if stride == 0 {
            return;
        }
        let n = block.len() / stride;
        self.products
            .par_iter_mut()
            .enumerate()
            .for_each(|(slot, product)| {
                for (w, band) in product.bands.iter_mut().enumerate() {
                    let offset = slot * n_windows + w;
                    let dst = &mut band.values[first_pixel..first_pixel + n];
                    for (value, chunk) in dst.iter_mut().zip(block.chunks_exact(stride)) {
                        *value = chunk[offset];
                    }
                }
            });
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns `true` if there is no product.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Number of pixels per band.
    pub fn n_pixels(&self) -> usize {
        self.n_pixels
    }

    /// Window table the bands follow.
    pub fn windows(&self) -> &WindowSet {
        &self.windows
    }

    /// Products in slot order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Mutable products in slot order.
    pub fn products_mut(&mut self) -> &mut [Product] {
        &mut self.products
    }

    /// Product of `kind`, if enabled.
    pub fn get(&self, kind: StatisticKind) -> Option<&Product> {
        self.products.iter().find(|p| p.kind == kind)
    }

    /// Product with code `code` (case-sensitive), if enabled.
    pub fn by_code(&self, code: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.code == code)
    }

    /// Iterates products in slot order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }
}

impl<'a> IntoIterator for &'a ProductSet {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
