//! Validated per-time-step inputs: acquisition dates, per-pixel validity
//! and the optional processing mask.

use clearsky_calendar::AcqDate;

use crate::error::EngineError;

/// Chronologically ordered acquisitions of one tile.
///
/// Each time-step carries an acquisition date and one validity bit per
/// pixel (clear-sky observation or not). Validity is stored time-major:
/// the bit for time-step `t` and pixel `p` is at `t * n_pixels + p`.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    dates: Vec<AcqDate>,
    validity: Vec<bool>,
    n_pixels: usize,
}

impl TimeSeries {
    /// Creates a series from dates and time-major validity bits.
    ///
    /// Several acquisitions may share a date; dates must never decrease.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::LengthMismatch`] if `validity` does not hold
    /// `dates.len() * n_pixels` entries, or [`EngineError::UnorderedDates`]
    /// if a date is earlier than its predecessor.
    pub fn new(
        dates: Vec<AcqDate>,
        validity: Vec<bool>,
        n_pixels: usize,
    ) -> Result<Self, EngineError> {
        let expected = dates.len().saturating_mul(n_pixels);
        if validity.len() != expected {
            return Err(EngineError::LengthMismatch {
                field: "validity",
                expected,
                got: validity.len(),
            });
        }
        if let Some(i) = dates.windows(2).position(|w| w[1] < w[0]) {
            return Err(EngineError::UnorderedDates {
                index: i + 1,
                date: dates[i + 1].to_string(),
            });
        }
        Ok(Self {
            dates,
            validity,
            n_pixels,
        })
    }

    /// Creates a series from one validity row per time-step.
    ///
    /// # Errors
    ///
    /// As [`new`](Self::new); additionally every row must hold `n_pixels`
    /// entries and there must be one row per date.
    pub fn from_rows(
        dates: Vec<AcqDate>,
        rows: &[Vec<bool>],
        n_pixels: usize,
    ) -> Result<Self, EngineError> {
        if rows.len() != dates.len() {
            return Err(EngineError::LengthMismatch {
                field: "validity rows",
                expected: dates.len(),
                got: rows.len(),
            });
        }
        if let Some(row) = rows.iter().find(|r| r.len() != n_pixels) {
            return Err(EngineError::LengthMismatch {
                field: "validity row",
                expected: n_pixels,
                got: row.len(),
            });
        }
        Self::new(dates, rows.concat(), n_pixels)
    }

    /// Number of time-steps.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns `true` if the series holds no acquisition.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of pixels per time-step.
    pub fn n_pixels(&self) -> usize {
        self.n_pixels
    }

    /// Acquisition dates in chronological order.
    pub fn dates(&self) -> &[AcqDate] {
        &self.dates
    }

    /// Date of time-step `t`.
    ///
    /// # Panics
    ///
    /// Panics if `t` is out of bounds.
    pub fn date(&self, t: usize) -> AcqDate {
        self.dates[t]
    }

    /// Returns `true` if pixel `p` is a clear-sky observation at time-step `t`.
    ///
    /// # Panics
    ///
    /// Panics if `t` or `p` is out of bounds.
    pub fn is_valid(&self, t: usize, p: usize) -> bool {
        debug_assert!(p < self.n_pixels);
        self.validity[t * self.n_pixels + p]
    }
}

/// Binary processing mask: one bit per pixel, `true` means processed.
#[derive(Debug, Clone)]
pub struct ProcessingMask {
    bits: Vec<bool>,
}

impl ProcessingMask {
    /// Wraps per-pixel mask bits.
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Number of pixels covered by the mask.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns `true` if the mask covers no pixel.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns `true` if pixel `p` is processed.
    pub fn is_processed(&self, p: usize) -> bool {
        self.bits.get(p).copied().unwrap_or(false)
    }

    /// Number of processed pixels.
    pub fn n_processed(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Checks that the mask matches a tile of `n_pixels`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MaskShape`] on mismatch.
    pub fn check(&self, n_pixels: usize) -> Result<(), EngineError> {
        if self.bits.len() != n_pixels {
            return Err(EngineError::MaskShape {
                expected: n_pixels,
                got: self.bits.len(),
            });
        }
        Ok(())
    }
}
