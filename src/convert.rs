//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use crate::config::*;

use clearsky_calendar::{AcqDate, DoyMask};
use clearsky_engine::{CsoConfig, StatisticKind, StatisticSet};
use clearsky_io::WriterConfig;

/// Parses an ISO `YYYY-MM-DD` date; `what` names the field in errors.
pub fn parse_date(s: &str, what: &str) -> Result<AcqDate> {
    s.parse::<AcqDate>()
        .with_context(|| format!("invalid {what} date"))
}

/// Builds the day-of-year mask from the TOML period.
///
/// `doy_min > doy_max` selects a season that wraps across the year end.
pub fn build_doy_mask(period: &PeriodToml) -> Result<DoyMask> {
    DoyMask::from_range(period.doy_min, period.doy_max).context("invalid day-of-year range")
}

/// Parses product codes and extra quantile probabilities into a
/// [`StatisticSet`].
pub fn build_statistic_set(stats: &StatisticsToml) -> Result<StatisticSet> {
    let mut set = StatisticSet::new();
    for code in &stats.metrics {
        let kind: StatisticKind = code.parse()?;
        if set.is_enabled(kind) {
            bail!("statistic {kind} listed twice");
        }
        set = set.with(kind);
    }
    set = set.with_quantiles(stats.quantiles.iter().copied());
    set.validate()?;
    if set.enabled().is_empty() {
        bail!("no statistic requested: set [statistics].metrics or [statistics].quantiles");
    }
    Ok(set)
}

/// Builds a [`CsoConfig`] from the TOML configuration.
pub fn build_cso_config(config: &ClearskyConfig) -> Result<CsoConfig> {
    let start = parse_date(&config.period.start, "period start")?;
    let end = parse_date(&config.period.end, "period end")?;
    let cfg = CsoConfig::new(start, end)
        .with_step(config.period.step)
        .with_doy_mask(build_doy_mask(&config.period)?)
        .with_statistics(build_statistic_set(&config.statistics)?)
        .with_target(config.io.target.clone());
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoToml) -> WriterConfig {
    WriterConfig::default()
        .with_subfolders(io.subfolders)
        .with_pretty(io.pretty)
}
