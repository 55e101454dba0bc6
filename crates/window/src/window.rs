//! Calendar windows over the analysis period, narrowed to the allowed season.

use clearsky_calendar::{AcqDate, DoyMask, MonthSteps};
use tracing::debug;

use crate::error::WindowError;

/// One aggregation window `[start, end)`.
///
/// `nominal_start` is the first-of-month boundary the window was built
/// from and labels the window in every product. `start`/`end` are the
/// boundaries after narrowing to the allowed days of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    nominal_start: AcqDate,
    start: AcqDate,
    end: AcqDate,
    used: bool,
}

impl Window {
    /// Builds a window from its nominal boundaries and narrows it to `mask`.
    ///
    /// The start moves forward one day and the end backward one day while
    /// either falls on a disallowed day and `start < end`. A window that
    /// collapses (`start >= end`) is marked unused.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::Calendar`] if a boundary leaves the calendar range.
    pub fn narrowed(
        nominal_start: AcqDate,
        nominal_end: AcqDate,
        mask: &DoyMask,
    ) -> Result<Self, WindowError> {
        let mut start = nominal_start;
        let mut end = nominal_end;
        while start < end && (!mask.allows(start) || !mask.allows(end)) {
            if !mask.allows(start) {
                start = start.add_days(1)?;
            }
            if !mask.allows(end) {
                end = end.add_days(-1)?;
            }
        }
        Ok(Self {
            nominal_start,
            start,
            end,
            used: start < end,
        })
    }

    /// First-of-month date the window was derived from.
    pub fn nominal_start(&self) -> AcqDate {
        self.nominal_start
    }

    /// Inclusive left boundary.
    pub fn start(&self) -> AcqDate {
        self.start
    }

    /// Exclusive right boundary.
    pub fn end(&self) -> AcqDate {
        self.end
    }

    /// `false` if narrowing collapsed the window; such windows hold only nodata.
    pub fn is_used(&self) -> bool {
        self.used
    }

    /// Window length in days; 0 for collapsed windows.
    pub fn length(&self) -> i32 {
        (self.end.ce() - self.start.ce()).max(0)
    }

    /// Returns `true` if `date` lies in `[start, end)`.
    pub fn contains(&self, date: AcqDate) -> bool {
        date >= self.start && date < self.end
    }
}

/// Ordered, non-overlapping windows spanning an analysis period.
#[derive(Debug, Clone, Default)]
pub struct WindowSet {
    windows: Vec<Window>,
    step: u32,
}

impl WindowSet {
    /// Builds the windows for the period `start..end` in steps of `step` months.
    ///
    /// Window `w` nominally covers `[m_w, m_w + step months)` where `m_w`
    /// is the `w`-th item of [`MonthSteps`]; each window is then narrowed
    /// by `mask`. A period shorter than one step yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::InvalidStep`] if `step` is zero,
    /// [`WindowError::InvertedPeriod`] if `end < start`, or
    /// [`WindowError::Calendar`] on date overflow.
    #[tracing::instrument(skip(mask))]
    pub fn build(
        start: AcqDate,
        end: AcqDate,
        step: u32,
        mask: &DoyMask,
    ) -> Result<Self, WindowError> {
        if step == 0 {
            return Err(WindowError::InvalidStep { step });
        }
        if end < start {
            return Err(WindowError::InvertedPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        let windows = MonthSteps::new(start, end, step)
            .map(|nominal_start| {
                let nominal_end = nominal_start.add_months(step)?;
                Window::narrowed(nominal_start, nominal_end, mask)
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (w, window) in windows.iter().enumerate() {
            if window.is_used() {
                debug!(w, start = %window.start(), end = %window.end(), "window");
            } else {
                debug!(w, nominal_start = %window.nominal_start(), "window not used");
            }
        }

        let set = Self { windows, step };
        debug!(n_windows = set.len(), n_used = set.n_used(), "windows built");
        Ok(set)
    }

    /// Number of windows.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Returns `true` if the period holds no window.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Step between windows in months.
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Windows in chronological order.
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// Returns window `w`, if any.
    pub fn get(&self, w: usize) -> Option<&Window> {
        self.windows.get(w)
    }

    /// Iterates windows in chronological order.
    pub fn iter(&self) -> std::slice::Iter<'_, Window> {
        self.windows.iter()
    }

    /// Number of windows that survived narrowing.
    pub fn n_used(&self) -> usize {
        self.windows.iter().filter(|w| w.is_used()).count()
    }
}

impl<'a> IntoIterator for &'a WindowSet {
    type Item = &'a Window;
    type IntoIter = std::slice::Iter<'a, Window>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
