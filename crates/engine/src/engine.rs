//! Pixel-parallel clear-sky observation run over one tile.

use clearsky_calendar::DoyMask;
use clearsky_window::{TemporalIndex, WindowSet};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::accumulate::{GapScratch, accumulate_window, encode};
use crate::config::CsoConfig;
use crate::error::EngineError;
use crate::product::{NODATA, ProductSet, try_nodata_vec};
use crate::registry::Registry;
use crate::series::{ProcessingMask, TimeSeries};

/// Pixels reduced per block; each block is scattered into the bands before
/// the next one starts.
pub(crate) const PIXEL_BLOCK: usize = 4096;

/// Computes the clear-sky observation statistics of every pixel of a tile.
///
/// Builds the windows of `config`, maps them to the acquisitions of
/// `series`, then reduces the pixels block by block, in parallel within a
/// block. Each worker thread owns one [`GapScratch`] sized to the largest
/// window; results land in a bounded block buffer and are copied into the
/// product bands.
///
/// Pixels rejected by `mask` and windows that narrowing collapsed hold
/// nodata in every product.
///
/// # Errors
///
/// Fails before any per-pixel work if the configuration is invalid, the
/// mask does not match the tile, no statistic is enabled or the period
/// holds no window. Fails with [`EngineError::Allocation`] if the products
/// cannot be allocated; nothing is returned in that case.
///
/// # Example
///
/// ```
/// use clearsky_calendar::AcqDate;
/// use clearsky_engine::{
///     CsoConfig, StatisticKind, StatisticSet, TimeSeries, clear_sky_observations,
/// };
///
/// let d = |m, day| AcqDate::new(2020, m, day).unwrap();
/// let series = TimeSeries::new(vec![d(4, 6), d(4, 21)], vec![true, true], 1).unwrap();
/// let config = CsoConfig::new(d(4, 1), d(5, 1))
///     .with_statistics(StatisticSet::new().with(StatisticKind::Count));
///
/// let products = clear_sky_observations(&series, None, &config).unwrap();
/// let num = products.get(StatisticKind::Count).unwrap();
/// assert_eq!(num.value(0, 0), Some(2));
/// ```
#[tracing::instrument(skip_all, fields(n_pixels = series.n_pixels(), n_timesteps = series.len()))]
pub fn clear_sky_observations(
    series: &TimeSeries,
    mask: Option<&ProcessingMask>,
    config: &CsoConfig,
) -> Result<ProductSet, EngineError> {
    config.validate()?;
    if let Some(mask) = mask {
        mask.check(series.n_pixels())?;
    }
    let registry = Registry::resolve(config.statistics())?;

    let windows = WindowSet::build(
        config.start(),
        config.end(),
        config.step(),
        config.doy_mask(),
    )?;
    if windows.is_empty() {
        return Err(EngineError::NoWindows {
            start: config.start().to_string(),
            end: config.end().to_string(),
            step: config.step(),
        });
    }
    let index = TemporalIndex::build(&windows, series.dates(), config.doy_mask());

    let n_pixels = series.n_pixels();
    let mut products = ProductSet::allocate(&registry, windows.clone(), n_pixels, config)?;
    let n_windows = windows.len();
    let stride = registry.len() * n_windows;
    let block_pixels = PIXEL_BLOCK.min(n_pixels);
    let mut block = try_nodata_vec(block_pixels.saturating_mul(stride), "pixel block")?;

    let max_samples = index.max_samples();
    debug!(
        n_products = registry.len(),
        n_windows, max_samples, block_pixels, "products allocated"
    );

    let kernel = PixelKernel {
        series,
        mask,
        windows: &windows,
        index: &index,
        registry: &registry,
        doy_mask: config.doy_mask(),
    };
    for first in (0..n_pixels).step_by(PIXEL_BLOCK) {
        let n = PIXEL_BLOCK.min(n_pixels - first);
        let buf = &mut block[..n * stride];
        buf.fill(NODATA);
        buf.par_chunks_mut(stride).enumerate().for_each_init(
            || GapScratch::with_capacity(max_samples),
            |scratch, (i, out)| kernel.run(first + i, out, scratch),
        );
        products.scatter(first, buf);
    }

    info!(
        n_products = products.len(),
        n_windows,
        n_used = products.windows().n_used(),
        n_processed = mask.map_or(n_pixels, ProcessingMask::n_processed),
        "clear-sky observation statistics computed"
    );
    Ok(products)
}

/// Read-only state shared by every pixel of a run.
struct PixelKernel<'a> {
    series: &'a TimeSeries,
    mask: Option<&'a ProcessingMask>,
    windows: &'a WindowSet,
    index: &'a TemporalIndex,
    registry: &'a Registry,
    doy_mask: &'a DoyMask,
}

impl PixelKernel<'_> {
    /// Fills `out` (`slot * n_windows + w`) for one pixel. `out` starts as nodata.
    fn run(&self, pixel: usize, out: &mut [i16], scratch: &mut GapScratch) {
        if self.mask.is_some_and(|m| !m.is_processed(pixel)) {
            return;
        }
        let n_windows = self.windows.len();
        let needs_samples = self.registry.needs_samples();

        for (w, window) in self.windows.iter().enumerate() {
            if !window.is_used() {
                continue;
            }
            let summary = accumulate_window(
                self.series,
                pixel,
                window,
                self.index.range(w),
                self.doy_mask,
                needs_samples.then_some(&mut *scratch),
            );
            let sorted: &[f64] = if needs_samples {
                scratch.sort();
                scratch.as_slice()
            } else {
                &[]
            };
            encode(self.registry, &summary, sorted, |slot, value| {
                out[slot * n_windows + w] = value;
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistic::{StatisticKind, StatisticSet};
    use clearsky_calendar::AcqDate;

    fn d(m: u32, day: u32) -> AcqDate {
        AcqDate::new(2020, m, day).unwrap()
    }

    #[test]
    fn results_cross_block_boundaries() {
        let n_pixels = 2 * PIXEL_BLOCK + 5;
        // pixel p % 4: 0 both dates, 1 first only, 2 second only, 3 none
        let mut validity = Vec::with_capacity(2 * n_pixels);
        validity.extend((0..n_pixels).map(|p| p % 4 == 0 || p % 4 == 1));
        validity.extend((0..n_pixels).map(|p| p % 4 == 0 || p % 4 == 2));
        let series = TimeSeries::new(vec![d(4, 6), d(4, 21)], validity, n_pixels).unwrap();
        let mut bits = vec![true; n_pixels];
        bits[PIXEL_BLOCK] = false;
        let mask = ProcessingMask::new(bits);
        let config = CsoConfig::new(d(4, 1), d(5, 1)).with_statistics(
            StatisticSet::new()
                .with(StatisticKind::Count)
                .with(StatisticKind::Max),
        );

        let products = clear_sky_observations(&series, Some(&mask), &config).unwrap();
        let num = products.get(StatisticKind::Count).unwrap();
        let max = products.get(StatisticKind::Max).unwrap();
        for p in 0..n_pixels {
            let expected = if p == PIXEL_BLOCK {
                (NODATA, NODATA)
            } else {
                match p % 4 {
                    0 => (2, 15),
                    1 => (1, 25),
                    2 => (1, 20),
                    _ => (0, 30),
                }
            };
            assert_eq!(
                (num.value(0, p), max.value(0, p)),
                (Some(expected.0), Some(expected.1)),
                "pixel {p}"
            );
        }
    }
}
