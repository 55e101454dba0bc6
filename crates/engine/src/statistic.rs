//! Statistic kinds and the set of statistics enabled for a run.

use std::str::FromStr;

use crate::error::EngineError;

/// A statistic of the revisit-gap distribution in one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatisticKind {
    /// Number of valid acquisitions.
    Count,
    /// Shortest gap.
    Min,
    /// Longest gap.
    Max,
    /// Longest minus shortest gap.
    Range,
    /// Mean gap.
    Mean,
    /// Sample standard deviation of the gaps.
    StdDev,
    /// Skewness of the gaps, scaled by 1000.
    Skewness,
    /// Excess kurtosis of the gaps, scaled by 1000.
    Kurtosis,
    /// Interquartile range, `Q75 - Q25`.
    Iqr,
    /// Quantile at probability `p` in (0, 1).
    Quantile(f64),
}

/// Fixed (non-quantile) statistics in slot order.
pub(crate) const FIXED_KINDS: [StatisticKind; 9] = [
    StatisticKind::Count,
    StatisticKind::Min,
    StatisticKind::Max,
    StatisticKind::Range,
    StatisticKind::Mean,
    StatisticKind::StdDev,
    StatisticKind::Skewness,
    StatisticKind::Kurtosis,
    StatisticKind::Iqr,
];

impl StatisticKind {
    /// Short product code, e.g. `"AVG"` or `"Q25"`.
    pub fn code(&self) -> String {
        match self {
            Self::Count => "NUM".to_string(),
            Self::Min => "MIN".to_string(),
            Self::Max => "MAX".to_string(),
            Self::Range => "RNG".to_string(),
            Self::Mean => "AVG".to_string(),
            Self::StdDev => "STD".to_string(),
            Self::Skewness => "SKW".to_string(),
            Self::Kurtosis => "KRT".to_string(),
            Self::Iqr => "IQR".to_string(),
            Self::Quantile(p) => format!("Q{:02.0}", p * 100.0),
        }
    }

    /// Returns `true` if the statistic needs the sorted gap sample.
    pub fn needs_samples(&self) -> bool {
        matches!(self, Self::Iqr | Self::Quantile(_))
    }
}

impl std::fmt::Display for StatisticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code())
    }
}

impl FromStr for StatisticKind {
    type Err = EngineError;

    /// Parses a fixed product code (case-insensitive) or `Qnn` for the
    /// quantile at `nn / 100`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        if let Some(kind) = FIXED_KINDS.iter().find(|k| k.code() == upper) {
            return Ok(*kind);
        }
        if let Some(digits) = upper.strip_prefix('Q')
            && !digits.is_empty()
            && digits.chars().all(|c| c.is_ascii_digit())
            && let Ok(pct) = digits.parse::<u32>()
        {
            return Ok(Self::Quantile(f64::from(pct) / 100.0));
        }
        Err(EngineError::UnknownStatistic {
            code: s.to_string(),
        })
    }
}

/// The statistics enabled for a run.
///
/// Built with [`with`](Self::with); the default enables nothing.
///
/// # Example
///
/// ```
/// use clearsky_engine::{StatisticKind, StatisticSet};
///
/// let set = StatisticSet::new()
///     .with(StatisticKind::Count)
///     .with(StatisticKind::Mean)
///     .with_quantiles([0.25, 0.75]);
/// assert_eq!(set.enabled().len(), 4);
/// assert!(set.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticSet {
    fixed: [bool; FIXED_KINDS.len()],
    quantiles: Vec<f64>,
}

impl StatisticSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every fixed statistic (no quantiles).
    pub fn all_fixed() -> Self {
        Self {
            fixed: [true; FIXED_KINDS.len()],
            quantiles: Vec::new(),
        }
    }

    /// Enables `kind`. Quantiles are appended in request order.
    pub fn with(mut self, kind: StatisticKind) -> Self {
        match kind {
            StatisticKind::Quantile(p) => self.quantiles.push(p),
            fixed => {
                if let Some(i) = FIXED_KINDS.iter().position(|k| *k == fixed) {
                    self.fixed[i] = true;
                }
            }
        }
        self
    }

    /// Enables a quantile for every probability in `ps`.
    pub fn with_quantiles<I>(mut self, ps: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        self.quantiles.extend(ps);
        self
    }

    /// Requested quantile probabilities in request order.
    pub fn quantiles(&self) -> &[f64] {
        &self.quantiles
    }

    /// Returns `true` if `kind` is enabled.
    pub fn is_enabled(&self, kind: StatisticKind) -> bool {
        match kind {
            StatisticKind::Quantile(p) => self.quantiles.contains(&p),
            fixed => FIXED_KINDS
                .iter()
                .position(|k| *k == fixed)
                .is_some_and(|i| self.fixed[i]),
        }
    }

    /// Enabled statistics: fixed kinds in code order, then quantiles.
    pub fn enabled(&self) -> Vec<StatisticKind> {
        FIXED_KINDS
            .iter()
            .zip(self.fixed)
            .filter_map(|(k, on)| on.then_some(*k))
            .chain(self.quantiles.iter().map(|&p| StatisticKind::Quantile(p)))
            .collect()
    }

    /// Validates this set.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidQuantile`] for a probability outside
    /// (0, 1), or [`EngineError::DuplicateStatistic`] if two quantiles share
    /// a product code.
    pub fn validate(&self) -> Result<(), EngineError> {
        let mut codes: Vec<String> = Vec::with_capacity(self.quantiles.len());
        for &p in &self.quantiles {
            if !(p > 0.0 && p < 1.0) {
                return Err(EngineError::InvalidQuantile { p });
            }
            let code = StatisticKind::Quantile(p).code();
            if codes.contains(&code) {
                return Err(EngineError::DuplicateStatistic { code });
            }
            codes.push(code);
        }
        Ok(())
    }
}
