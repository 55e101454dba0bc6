//! Per-pixel, per-window reduction of valid acquisitions into revisit gaps.

use clearsky_calendar::DoyMask;
use clearsky_stats::{Moments, quantile_type7};
use clearsky_window::{TimeRange, Window};

use crate::product::NODATA;
use crate::registry::Registry;
use crate::series::TimeSeries;
use crate::statistic::StatisticKind;

/// Scale applied to skewness and kurtosis before integer encoding.
const SHAPE_SCALE: f64 = 1000.0;
/// Encoded skewness and kurtosis are clamped to `[-SHAPE_LIMIT, SHAPE_LIMIT]`.
const SHAPE_LIMIT: f64 = 30000.0;

/// Reusable buffer for the gap samples of one pixel-window.
///
/// One scratch is owned by each worker thread and sized once to the
/// worst-case sample count of any window, so the pixel loop never
/// reallocates.
///
/// # Example
///
/// ```
/// use clearsky_engine::GapScratch;
///
/// let mut scratch = GapScratch::with_capacity(64);
/// scratch.push(15.0);
/// scratch.push(5.0);
/// scratch.sort();
/// assert_eq!(scratch.as_slice(), &[5.0, 15.0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GapScratch {
    gaps: Vec<f64>,
}

impl GapScratch {
    /// Creates a scratch buffer with room for `capacity` gaps.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            gaps: Vec::with_capacity(capacity),
        }
    }

    /// Removes all gaps, keeping the allocation.
    pub fn clear(&mut self) {
        self.gaps.clear();
    }

    /// Appends one gap.
    pub fn push(&mut self, gap: f64) {
        self.gaps.push(gap);
    }

    /// Sorts the gaps in ascending order.
    pub fn sort(&mut self) {
        self.gaps.sort_unstable_by(f64::total_cmp);
    }

    /// Number of buffered gaps.
    pub fn len(&self) -> usize {
        self.gaps.len()
    }

    /// Returns `true` if no gap is buffered.
    pub fn is_empty(&self) -> bool {
        self.gaps.is_empty()
    }

    /// Allocated capacity in gaps.
    pub fn capacity(&self) -> usize {
        self.gaps.capacity()
    }

    /// Buffered gaps.
    pub fn as_slice(&self) -> &[f64] {
        &self.gaps
    }
}

/// Revisit-gap summary of one pixel in one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapSummary {
    n_obs: usize,
    moments: Moments,
    min: f64,
    max: f64,
    window_length: f64,
}

impl GapSummary {
    fn empty(window_length: i32) -> Self {
        Self {
            n_obs: 0,
            moments: Moments::new(),
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            window_length: f64::from(window_length),
        }
    }

    fn fold(&mut self, gap: f64, samples: Option<&mut GapScratch>) {
        self.min = self.min.min(gap);
        self.max = self.max.max(gap);
        self.moments.push(gap);
        if let Some(samples) = samples {
            samples.push(gap);
        }
    }

    /// Number of valid acquisitions in the window.
    pub fn n_obs(&self) -> usize {
        self.n_obs
    }

    /// Number of gaps folded in, trailing gap included.
    pub fn n_gaps(&self) -> usize {
        self.moments.count()
    }

    /// Moment accumulator over the gaps.
    pub fn moments(&self) -> &Moments {
        &self.moments
    }

    /// Shortest gap; the window length if there is none.
    pub fn min(&self) -> f64 {
        if self.n_gaps() == 0 {
            return self.window_length;
        }
        self.min
    }

    /// Longest gap; the window length if there is none.
    pub fn max(&self) -> f64 {
        if self.n_gaps() == 0 {
            return self.window_length;
        }
        self.max
    }

    /// Mean gap; the window length if there is none.
    pub fn mean(&self) -> f64 {
        if self.n_gaps() == 0 {
            return self.window_length;
        }
        self.moments.mean()
    }

    /// Window length in days.
    pub fn window_length(&self) -> f64 {
        self.window_length
    }
}

/// Reduces the acquisitions of `pixel` inside `window` to revisit gaps.
///
/// `range` is the window's entry of the temporal index; `None` means no
/// acquisition falls inside the window. Walking the range, invalid
/// acquisitions and acquisitions on days rejected by `doy_mask` are
/// skipped. Every other acquisition counts as an observation and, if it
/// lies after the running left boundary, closes a gap. The distance from
/// the last observation to the window end closes the trailing gap.
///
/// When `samples` is given it is cleared and receives every gap, unsorted.
pub fn accumulate_window(
    series: &TimeSeries,
    pixel: usize,
    window: &Window,
    range: Option<TimeRange>,
    doy_mask: &DoyMask,
    mut samples: Option<&mut GapScratch>,
) -> GapSummary {
    if let Some(s) = samples.as_deref_mut() {
        s.clear();
    }
    let mut summary = GapSummary::empty(window.length());
    let Some(range) = range else {
        return summary;
    };

    let mut left = window.start().ce();
    for t in range.indices() {
        if !series.is_valid(t, pixel) {
            continue;
        }
        let date = series.date(t);
        if !doy_mask.allows(date) {
            continue;
        }
        summary.n_obs += 1;
        let ce = date.ce();
        if ce > left {
            summary.fold(f64::from(ce - left), samples.as_deref_mut());
            left = ce;
        }
    }

    let end = window.end().ce();
    if end > left {
        summary.fold(f64::from(end - left), samples);
    }
    summary
}

/// Truncates toward zero and saturates into `i16`. NaN maps to 0.
fn to_i16(x: f64) -> i16 {
    x as i16
}

/// Scales skewness or kurtosis by 1000 and clamps to +-30000.
/// Undefined or non-finite values encode as 0.
fn scale_shape(value: Option<f64>) -> i16 {
    match value {
        Some(v) if v.is_finite() => to_i16((v * SHAPE_SCALE).clamp(-SHAPE_LIMIT, SHAPE_LIMIT)),
        _ => 0,
    }
}

/// Quartiles computed at most once per pixel-window.
struct Quantiles<'a> {
    sorted: &'a [f64],
    q25: Option<f64>,
    q75: Option<f64>,
}

impl<'a> Quantiles<'a> {
    fn new(sorted: &'a [f64]) -> Self {
        Self {
            sorted,
            q25: None,
            q75: None,
        }
    }

    /// Quantile at `p`, truncated to whole days.
    fn get(&mut self, p: f64) -> f64 {
        let cached = if p == 0.25 {
            &mut self.q25
        } else if p == 0.75 {
            &mut self.q75
        } else {
            return quantile_type7(self.sorted, p).trunc();
        };
        *cached.get_or_insert_with(|| quantile_type7(self.sorted, p).trunc())
    }
}

/// Encodes every active statistic of one pixel-window.
///
/// `sorted` holds the ascending gap sample when the registry needs it.
/// `emit` receives `(slot, value)` for every active slot.
pub(crate) fn encode<F>(registry: &Registry, summary: &GapSummary, sorted: &[f64], mut emit: F)
where
    F: FnMut(usize, i16),
{
    let observed = summary.n_obs() > 0;
    let mut quantiles = Quantiles::new(sorted);
    let has_sample = observed && !sorted.is_empty();

    for (slot, kind) in registry.iter() {
        let value = match kind {
            StatisticKind::Count => i16::try_from(summary.n_obs()).unwrap_or(i16::MAX),
            StatisticKind::Min => to_i16(summary.min()),
            StatisticKind::Max => to_i16(summary.max()),
            StatisticKind::Range => to_i16(summary.max() - summary.min()),
            StatisticKind::Mean => to_i16(summary.mean()),
            StatisticKind::StdDev if observed => to_i16(summary.moments().std_dev()),
            StatisticKind::Skewness if observed => scale_shape(summary.moments().skewness()),
            StatisticKind::Kurtosis if observed => {
                scale_shape(summary.moments().excess_kurtosis())
            }
            StatisticKind::StdDev | StatisticKind::Skewness | StatisticKind::Kurtosis => 0,
            StatisticKind::Iqr if has_sample => to_i16(quantiles.get(0.75) - quantiles.get(0.25)),
            StatisticKind::Quantile(p) if has_sample => to_i16(quantiles.get(p)),
            StatisticKind::Iqr | StatisticKind::Quantile(_) => NODATA,
        };
        emit(slot, value);
    }
}
