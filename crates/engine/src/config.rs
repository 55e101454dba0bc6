//! Configuration of a clear-sky observation run.

use clearsky_calendar::{AcqDate, DoyMask};

use crate::error::EngineError;
use crate::statistic::StatisticSet;

/// Analysis period, window step, season and statistics of a run.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use clearsky_calendar::{AcqDate, DoyMask};
/// use clearsky_engine::{CsoConfig, StatisticKind, StatisticSet};
///
/// let config = CsoConfig::new(
///     AcqDate::new(2018, 1, 1).unwrap(),
///     AcqDate::new(2018, 12, 31).unwrap(),
/// )
/// .with_step(3)
/// .with_doy_mask(DoyMask::from_range(60, 300).unwrap())
/// .with_statistics(StatisticSet::new().with(StatisticKind::Count));
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CsoConfig {
    /// First day of the analysis period.
    start: AcqDate,
    /// Last day of the analysis period.
    end: AcqDate,
    /// Window length and spacing in months.
    step: u32,
    /// Allowed days of the year.
    doy_mask: DoyMask,
    /// Statistics to compute.
    statistics: StatisticSet,
    /// Sensor/target label used in product names.
    target: String,
}

impl CsoConfig {
    /// Creates a new configuration for the period from `start` to `end`.
    ///
    /// Windows start in the month of `start` and in every `step`-th month
    /// after it that is strictly before the month of `end`.
    ///
    /// Defaults: `step = 1`, every day of the year allowed, no statistics,
    /// `target = "ARD"`.
    pub fn new(start: AcqDate, end: AcqDate) -> Self {
        Self {
            start,
            end,
            step: 1,
            doy_mask: DoyMask::all(),
            statistics: StatisticSet::new(),
            target: "ARD".to_string(),
        }
    }

    /// Sets the window step in months.
    pub fn with_step(mut self, step: u32) -> Self {
        self.step = step;
        self
    }

    /// Sets the allowed days of the year.
    pub fn with_doy_mask(mut self, mask: DoyMask) -> Self {
        self.doy_mask = mask;
        self
    }

    /// Sets the statistics to compute.
    pub fn with_statistics(mut self, statistics: StatisticSet) -> Self {
        self.statistics = statistics;
        self
    }

    /// Sets the sensor/target label used in product names.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Returns the first day of the analysis period.
    pub fn start(&self) -> AcqDate {
        self.start
    }

    /// Returns the last day of the analysis period.
    pub fn end(&self) -> AcqDate {
        self.end
    }

    /// Returns the window step in months.
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Returns the allowed days of the year.
    pub fn doy_mask(&self) -> &DoyMask {
        &self.doy_mask
    }

    /// Returns the statistics to compute.
    pub fn statistics(&self) -> &StatisticSet {
        &self.statistics
    }

    /// Returns the sensor/target label.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Validates this configuration.
    ///
    /// Returns an error if the step is zero, the period is inverted, the
    /// target label is empty, or the statistic set is invalid.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.step < 1 {
            return Err(EngineError::InvalidConfig {
                reason: format!("window step must be >= 1 month, got {}", self.step),
            });
        }
        if self.end < self.start {
            return Err(EngineError::InvalidConfig {
                reason: format!("period end {} is before start {}", self.end, self.start),
            });
        }
        if self.target.trim().is_empty() {
            return Err(EngineError::InvalidConfig {
                reason: "target label must not be empty".to_string(),
            });
        }
        self.statistics.validate()
    }
}
