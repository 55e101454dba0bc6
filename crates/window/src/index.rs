//! Mapping of windows to the time-steps that fall inside them.

use clearsky_calendar::{AcqDate, DoyMask};
use tracing::debug;

use crate::window::WindowSet;

/// Inclusive range of time-step indices overlapping one window.
///
/// `first <= last` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    first: usize,
    last: usize,
}

impl TimeRange {
    /// Creates a range; `last` is raised to `first` if smaller.
    pub fn new(first: usize, last: usize) -> Self {
        Self {
            first,
            last: last.max(first),
        }
    }

    /// First time-step index.
    pub fn first(&self) -> usize {
        self.first
    }

    /// Last time-step index (inclusive).
    pub fn last(&self) -> usize {
        self.last
    }

    /// Number of time-steps covered.
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    /// Always `false`; a range covers at least one time-step.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Upper bound on revisit gaps one pixel can produce in this range:
    /// one per time-step plus the trailing gap to the window end.
    pub fn max_gaps(&self) -> usize {
        self.len() + 1
    }

    /// Iterates the covered time-step indices.
    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.first..=self.last
    }
}

/// Per-window time-step ranges, computed once and shared by every pixel.
#[derive(Debug, Clone, Default)]
pub struct TemporalIndex {
    ranges: Vec<Option<TimeRange>>,
}

impl TemporalIndex {
    /// Maps each window of `windows` to the time-steps of `dates` inside it.
    ///
    /// `dates` must be in chronological order. Acquisitions on days rejected
    /// by `mask` are skipped entirely and unused windows map to `None`, as do
    /// windows without any acquisition.
    ///
    /// Both inputs are ordered, so the scan for window `w + 1` resumes at the
    /// last index matched by window `w`; the total cost is
    /// O(windows + time-steps).
    #[tracing::instrument(skip_all, fields(n_windows = windows.len(), n_timesteps = dates.len()))]
    pub fn build(windows: &WindowSet, dates: &[AcqDate], mask: &DoyMask) -> Self {
        let mut ranges = Vec::with_capacity(windows.len());
        let mut t_left = 0;

        for (w, window) in windows.iter().enumerate() {
            if !window.is_used() {
                ranges.push(None);
                continue;
            }

            let mut range: Option<TimeRange> = None;
            for (t, &date) in dates.iter().enumerate().skip(t_left) {
                if !mask.allows(date) {
                    continue;
                }
                if window.contains(date) {
                    range = Some(match range {
                        Some(r) => TimeRange::new(r.first(), t),
                        None => TimeRange::new(t, t),
                    });
                } else if date >= window.end() {
                    break;
                }
            }

            if let Some(r) = range {
                t_left = r.last();
            }
            debug!(w, range = ?range, "time-steps per window");
            ranges.push(range);
        }

        Self { ranges }
    }

    /// Range for window `w`; `None` if the window is unused, empty or out of bounds.
    pub fn range(&self, w: usize) -> Option<TimeRange> {
        self.ranges.get(w).copied().flatten()
    }

    /// All ranges in window order.
    pub fn ranges(&self) -> &[Option<TimeRange>] {
        &self.ranges
    }

    /// Number of windows indexed.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns `true` if no window was indexed.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Worst-case number of gap samples in any window, at least 1.
    ///
    /// Sizes per-thread scratch so it never grows inside the pixel loop.
    pub fn max_samples(&self) -> usize {
        self.ranges
            .iter()
            .flatten()
            .map(TimeRange::max_gaps)
            .max()
            .unwrap_or(0)
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> AcqDate {
        AcqDate::new(y, m, day).unwrap()
    }

    fn monthly(start: AcqDate, end: AcqDate) -> WindowSet {
        WindowSet::build(start, end, 1, &DoyMask::all()).unwrap()
    }

    #[test]
    fn time_range_accessors() {
        let r = TimeRange::new(3, 7);
        assert_eq!(r.first(), 3);
        assert_eq!(r.last(), 7);
        assert_eq!(r.len(), 5);
        assert_eq!(r.max_gaps(), 6);
        assert_eq!(r.indices().collect::<Vec<_>>(), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn time_range_orders_bounds() {
        let r = TimeRange::new(5, 2);
        assert_eq!(r.first(), 5);
        assert_eq!(r.last(), 5);
    }

    #[test]
    fn ranges_follow_months() {
        let windows = monthly(d(2021, 1, 1), d(2021, 4, 1));
        let dates = [
            d(2021, 1, 3),
            d(2021, 1, 20),
            d(2021, 2, 10),
            d(2021, 3, 1),
            d(2021, 3, 31),
            d(2021, 4, 1),
        ];
        let index = TemporalIndex::build(&windows, &dates, &DoyMask::all());
        assert_eq!(index.len(), 3);
        assert_eq!(index.range(0), Some(TimeRange::new(0, 1)));
        assert_eq!(index.range(1), Some(TimeRange::new(2, 2)));
        assert_eq!(index.range(2), Some(TimeRange::new(3, 4)));
        assert_eq!(index.max_samples(), 3);
    }

    #[test]
    fn empty_window_has_no_range() {
        let windows = monthly(d(2021, 1, 1), d(2021, 4, 1));
        let dates = [d(2021, 1, 3), d(2021, 3, 5)];
        let index = TemporalIndex::build(&windows, &dates, &DoyMask::all());
        assert_eq!(index.range(0), Some(TimeRange::new(0, 0)));
        assert_eq!(index.range(1), None);
        assert_eq!(index.range(2), Some(TimeRange::new(1, 1)));
    }

    #[test]
    fn disallowed_acquisitions_are_skipped() {
        // Jan 1 .. Jan 15 only
        let mask = DoyMask::from_range(1, 15).unwrap();
        let windows = WindowSet::build(d(2021, 1, 1), d(2021, 2, 1), 1, &mask).unwrap();
        let dates = [d(2021, 1, 2), d(2021, 1, 10), d(2021, 1, 14)];
        let index = TemporalIndex::build(&windows, &dates, &mask);
        // window narrowed to [Jan 1, Jan 15): Jan 14 is the last inside
        assert_eq!(index.range(0), Some(TimeRange::new(0, 2)));

        let mask = DoyMask::from_range(5, 15).unwrap();
        let index = TemporalIndex::build(&windows, &dates, &mask);
        assert_eq!(index.range(0), Some(TimeRange::new(1, 2)));
    }

    #[test]
    fn unused_windows_map_to_none() {
        let mask = DoyMask::from_range(60, 366).unwrap();
        let windows = WindowSet::build(d(2021, 1, 1), d(2021, 4, 1), 1, &mask).unwrap();
        let dates = [d(2021, 1, 10), d(2021, 2, 10), d(2021, 3, 10)];
        let index = TemporalIndex::build(&windows, &dates, &mask);
        assert_eq!(index.range(0), None);
        assert_eq!(index.range(1), None);
        assert_eq!(index.range(2), Some(TimeRange::new(2, 2)));
    }

    #[test]
    fn no_acquisitions() {
        let windows = monthly(d(2021, 1, 1), d(2021, 4, 1));
        let index = TemporalIndex::build(&windows, &[], &DoyMask::all());
        assert_eq!(index.len(), 3);
        assert!(index.ranges().iter().all(Option::is_none));
        assert_eq!(index.max_samples(), 1);
    }

    #[test]
    fn acquisitions_before_period_are_ignored() {
        let windows = monthly(d(2021, 2, 1), d(2021, 3, 1));
        let dates = [d(2020, 12, 1), d(2021, 1, 31), d(2021, 2, 1)];
        let index = TemporalIndex::build(&windows, &dates, &DoyMask::all());
        assert_eq!(index.range(0), Some(TimeRange::new(2, 2)));
    }

    #[test]
    fn out_of_bounds_window() {
        let index = TemporalIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.range(4), None);
    }
}
