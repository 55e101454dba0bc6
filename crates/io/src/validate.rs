//! Accumulated validation utilities.
//!
//! Provides [`ValidationCollector`] for gathering multiple validation errors
//! into a single [`IoError::Validation`], plus standalone checks on the raw
//! contents of a tile file.

use crate::error::IoError;

// ---------------------------------------------------------------------------
// ValidationCollector
// ---------------------------------------------------------------------------

/// Accumulates validation errors and converts them into a single
/// [`IoError::Validation`].
///
/// Create a collector, push zero or more error messages, then call
/// [`finish`](Self::finish) to obtain `Ok(())` when everything is valid or a
/// single `Err` that summarises every violation.
#[derive(Debug, Default)]
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Move every error of `other` into this collector.
    pub(crate) fn merge(&mut self, other: ValidationCollector) {
        self.errors.extend(other.errors);
    }

    /// Returns `true` when no errors have been recorded.
    pub(crate) fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of recorded errors.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or `Err(IoError::Validation { count, details })` otherwise.
    ///
    /// The `details` string joins all messages with `"; "`.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Standalone validation helpers
// ---------------------------------------------------------------------------

/// Check that a 0/1 bitmap has `n_pixels` entries and holds only 0 and 1.
///
/// `what` names the bitmap in the messages.
pub(crate) fn validate_bitmap(what: &str, bits: &[u8], n_pixels: usize) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    if bits.len() != n_pixels {
        c.push(format!("{what} length {} != n_pixels {n_pixels}", bits.len()));
    }
    if let Some((i, &v)) = bits.iter().enumerate().find(|(_, v)| **v > 1) {
        c.push(format!("{what} holds {v} at pixel {i}, expected 0 or 1"));
    }

    c
}

/// Check that dates never decrease.
///
/// Records one message per offending index.
pub(crate) fn validate_chronology<T: PartialOrd + std::fmt::Display>(
    dates: &[T],
) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    for (i, pair) in dates.windows(2).enumerate() {
        if pair[1] < pair[0] {
            c.push(format!(
                "acquisition {} ({}) is earlier than acquisition {i} ({})",
                i + 1,
                pair[1],
                pair[0]
            ));
        }
    }

    c
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- ValidationCollector -------------------------------------------------

    #[test]
    fn collector_empty_is_ok() {
        let c = ValidationCollector::new();
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
        assert!(c.finish().is_ok());
    }

    #[test]
    fn collector_non_empty_is_err_with_correct_count() {
        let mut c = ValidationCollector::new();
        c.push("error one");
        let mut other = ValidationCollector::new();
        other.push("error two");
        c.merge(other);
        assert!(!c.is_empty());
        assert_eq!(c.len(), 2);

        let err = c.finish().unwrap_err();
        match err {
            IoError::Validation { count, details } => {
                assert_eq!(count, 2);
                assert_eq!(details, "error one; error two");
            }
            other => panic!("expected IoError::Validation, got {other:?}"),
        }
    }

    // -- validate_bitmap -----------------------------------------------------

    #[test]
    fn bitmap_ok() {
        assert!(validate_bitmap("mask", &[0, 1, 1], 3).is_empty());
    }

    #[test]
    fn bitmap_wrong_length_and_value() {
        let c = validate_bitmap("mask", &[0, 2], 3);
        assert_eq!(c.len(), 2);
        let err = c.finish().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("mask length 2 != n_pixels 3"));
        assert!(msg.contains("mask holds 2 at pixel 1"));
    }

    // -- validate_chronology -------------------------------------------------

    #[test]
    fn chronology_non_decreasing_is_empty() {
        assert!(validate_chronology(&[1, 2, 2, 5]).is_empty());
    }

    #[test]
    fn chronology_violations_produce_errors() {
        let c = validate_chronology(&[3, 1, 4, 2]);
        assert_eq!(c.len(), 2);
        let msg = c.finish().unwrap_err().to_string();
        assert!(msg.contains("acquisition 1 (1) is earlier than acquisition 0 (3)"));
        assert!(msg.contains("acquisition 3 (2) is earlier than acquisition 2 (4)"));
    }
}
