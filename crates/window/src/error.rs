//! Error types for the clearsky-window crate.

/// Error type for all fallible operations in the clearsky-window crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WindowError {
    /// Returned when the window step is zero months.
    #[error("window step must be >= 1 month, got {step}")]
    InvalidStep {
        /// The invalid step value.
        step: u32,
    },

    /// Returned when the analysis period ends before it starts.
    #[error("analysis period ends ({end}) before it starts ({start})")]
    InvertedPeriod {
        /// First day of the analysis period.
        start: String,
        /// Last day of the analysis period.
        end: String,
    },

    /// Calendar error.
    #[error(transparent)]
    Calendar(#[from] clearsky_calendar::CalendarError),
}
