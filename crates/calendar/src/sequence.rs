//! Month-step sequences over an analysis period.

use crate::date::AcqDate;

/// Iterator over first-of-month dates spaced `step` months apart.
///
/// Starts at the first day of `start`'s month and yields while the
/// `(year, month)` of the current item is strictly before that of `end`.
/// A `step` of zero yields nothing.
///
/// # Example
///
/// ```
/// use clearsky_calendar::{AcqDate, MonthSteps};
///
/// let start = AcqDate::new(2020, 11, 15).unwrap();
/// let end = AcqDate::new(2021, 3, 31).unwrap();
/// let months: Vec<_> = MonthSteps::new(start, end, 2).map(|d| d.compact()).collect();
/// assert_eq!(months, ["20201101", "20210101"]);
/// ```
#[derive(Debug, Clone)]
pub struct MonthSteps {
    next: Option<AcqDate>,
    end: (i32, u32),
    step: u32,
}

impl MonthSteps {
    /// Creates the sequence for the period `start..end` with the given step.
    pub fn new(start: AcqDate, end: AcqDate, step: u32) -> Self {
        Self {
            next: (step > 0).then(|| start.first_of_month()),
            end: (end.year(), end.month()),
            step,
        }
    }
}

impl Iterator for MonthSteps {
    type Item = AcqDate;

    fn next(&mut self) -> Option<AcqDate> {
        let current = self.next?;
        if (current.year(), current.month()) >= self.end {
            self.next = None;
            return None;
        }
        self.next = current.add_months(self.step).ok();
        Some(current)
    }
}
