//! Error types for the clearsky-engine crate.

/// Error type for all fallible operations in the clearsky-engine crate.
///
/// Every variant is fatal for the tile being processed: it is detected
/// before per-pixel work starts, or it aborts product assembly as a whole.
/// Per-pixel numeric edge cases are not errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Returned when configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a requested quantile probability is not in (0, 1).
    #[error("quantile probability must be in (0, 1), got {p}")]
    InvalidQuantile {
        /// The rejected probability.
        p: f64,
    },

    /// Returned when two requested statistics map to the same product code.
    #[error("statistic {code} requested more than once")]
    DuplicateStatistic {
        /// The product code requested twice.
        code: String,
    },

    /// Returned when a statistic code is not recognised.
    #[error("unknown statistic: {code:?}")]
    UnknownStatistic {
        /// The unrecognised code.
        code: String,
    },

    /// Returned when no statistic is enabled.
    #[error("no statistic enabled")]
    NoStatistics,

    /// Returned when the analysis period holds no window.
    #[error("no window between {start} and {end} with a step of {step} month(s)")]
    NoWindows {
        /// First day of the analysis period.
        start: String,
        /// Last day of the analysis period.
        end: String,
        /// Window step in months.
        step: u32,
    },

    /// Returned when array lengths don't match.
    #[error("{field}: expected {expected} elements, got {got}")]
    LengthMismatch {
        /// Name of the mismatched field.
        field: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when acquisition dates are not in chronological order.
    #[error("acquisition {index} ({date}) is earlier than its predecessor")]
    UnorderedDates {
        /// Index of the first out-of-order acquisition.
        index: usize,
        /// Its date.
        date: String,
    },

    /// Returned when the processing mask does not match the tile.
    #[error("processing mask has {got} pixels, tile has {expected}")]
    MaskShape {
        /// Pixels in the tile.
        expected: usize,
        /// Pixels in the mask.
        got: usize,
    },

    /// Returned when an output product cannot be allocated.
    #[error("unable to allocate {bytes} bytes for product {product}")]
    Allocation {
        /// Code of the product that failed.
        product: String,
        /// Requested size in bytes.
        bytes: usize,
    },

    /// Window error.
    #[error(transparent)]
    Window(#[from] clearsky_window::WindowError),

    /// Calendar error.
    #[error(transparent)]
    Calendar(#[from] clearsky_calendar::CalendarError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_quantile() {
        let e = EngineError::InvalidQuantile { p: 1.5 };
        assert_eq!(e.to_string(), "quantile probability must be in (0, 1), got 1.5");
    }

    #[test]
    fn display_duplicate() {
        let e = EngineError::DuplicateStatistic {
            code: "Q25".to_string(),
        };
        assert_eq!(e.to_string(), "statistic Q25 requested more than once");
    }

    #[test]
    fn display_no_windows() {
        let e = EngineError::NoWindows {
            start: "2020-01-05".to_string(),
            end: "2020-01-20".to_string(),
            step: 1,
        };
        assert_eq!(
            e.to_string(),
            "no window between 2020-01-05 and 2020-01-20 with a step of 1 month(s)"
        );
    }

    #[test]
    fn display_length_mismatch() {
        let e = EngineError::LengthMismatch {
            field: "validity",
            expected: 100,
            got: 99,
        };
        assert_eq!(e.to_string(), "validity: expected 100 elements, got 99");
    }

    #[test]
    fn display_mask_shape() {
        let e = EngineError::MaskShape {
            expected: 4,
            got: 3,
        };
        assert_eq!(e.to_string(), "processing mask has 3 pixels, tile has 4");
    }

    #[test]
    fn display_allocation() {
        let e = EngineError::Allocation {
            product: "AVG".to_string(),
            bytes: 64,
        };
        assert_eq!(e.to_string(), "unable to allocate 64 bytes for product AVG");
    }

    #[test]
    fn window_error_is_transparent() {
        let e: EngineError = clearsky_window::WindowError::InvalidStep { step: 0 }.into();
        assert_eq!(e.to_string(), "window step must be >= 1 month, got 0");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<EngineError>();
    }
}
