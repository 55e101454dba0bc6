//! Gregorian acquisition date with a continuous day count.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::doy::Doy;
use crate::error::CalendarError;

/// A calendar date in the proleptic Gregorian calendar.
///
/// Dates carry a continuous day count ([`ce`](Self::ce)) that is monotonic
/// across month and year boundaries, so the distance between two dates is a
/// plain subtraction. Ordering follows the day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AcqDate(NaiveDate);

impl AcqDate {
    /// Creates a new `AcqDate` from year, month and day.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12,
    /// or [`CalendarError::InvalidDay`] if the day does not exist in that
    /// month (leap years are honoured).
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(CalendarError::InvalidDay { year, month, day })
    }

    /// Creates an `AcqDate` from a continuous day count.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] if `ce` does not map to a
    /// representable date.
    pub fn from_ce(ce: i32) -> Result<Self, CalendarError> {
        NaiveDate::from_num_days_from_ce_opt(ce)
            .map(Self)
            .ok_or_else(|| CalendarError::OutOfRange {
                what: format!("ce {ce}"),
            })
    }

    /// Wraps an existing [`NaiveDate`].
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the underlying [`NaiveDate`].
    pub fn naive(self) -> NaiveDate {
        self.0
    }

    /// Continuous day count; January 1 of year 1 is day 1.
    pub fn ce(self) -> i32 {
        self.0.num_days_from_ce()
    }

    /// Returns the day-of-year (1..=366).
    pub fn doy(self) -> Doy {
        Doy::from_ordinal(self.0.ordinal())
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// Returns the day within the month (1..=31).
    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// Returns the first day of this date's month.
    pub fn first_of_month(self) -> Self {
        Self(self.0.with_day(1).unwrap_or(self.0))
    }

    /// Shifts the date by a signed number of days.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] if the result is not representable.
    pub fn add_days(self, days: i32) -> Result<Self, CalendarError> {
        let magnitude = Days::new(u64::from(days.unsigned_abs()));
        let shifted = if days >= 0 {
            self.0.checked_add_days(magnitude)
        } else {
            self.0.checked_sub_days(magnitude)
        };
        shifted.map(Self).ok_or_else(|| CalendarError::OutOfRange {
            what: format!("{self} {days:+} days"),
        })
    }

    /// Advances the date by `months` calendar months, carrying into the year.
    ///
    /// The day is clamped to the last day of the target month, so the
    /// operation is exact for first-of-month dates.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] if the result is not representable.
    pub fn add_months(self, months: u32) -> Result<Self, CalendarError> {
        self.0
            .checked_add_months(Months::new(months))
            .map(Self)
            .ok_or_else(|| CalendarError::OutOfRange {
                what: format!("{self} + {months} months"),
            })
    }

    /// Compact `YYYYMMDD` representation used as band label.
    pub fn compact(self) -> String {
        format!("{:04}{:02}{:02}", self.year(), self.month(), self.day())
    }
}

impl std::fmt::Display for AcqDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::str::FromStr for AcqDate {
    type Err = CalendarError;

    /// Parses an ISO `YYYY-MM-DD` date.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|e| CalendarError::OutOfRange {
                what: format!("{s:?}: {e}"),
            })
    }
}
