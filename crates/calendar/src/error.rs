//! Error types for the clearsky-calendar crate.

/// Error type for all fallible operations in the clearsky-calendar crate.
///
/// This enum covers validation failures for calendar dates, day-of-year
/// values and day-of-year ranges, plus date arithmetic that leaves the
/// representable range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum CalendarError {
    /// Returned when a day-of-year value is outside the valid range 1..=366.
    #[error("invalid day of year: {doy} (must be 1..=366)")]
    InvalidDoy {
        /// The invalid day-of-year value that was provided.
        doy: u16,
    },

    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u32,
    },

    /// Returned when a day number does not exist in the given month.
    #[error("invalid day: {day} for {year:04}-{month:02}")]
    InvalidDay {
        /// The year of the rejected date.
        year: i32,
        /// The month of the rejected date.
        month: u32,
        /// The invalid day number that was provided.
        day: u32,
    },

    /// Returned when date arithmetic leaves the supported calendar range.
    #[error("date out of range: {what}")]
    OutOfRange {
        /// Description of the operation that overflowed.
        what: String,
    },
}
