use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level clearsky configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClearskyConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Analysis period, window step and season.
    pub period: PeriodToml,

    /// Statistics to compute.
    #[serde(default)]
    pub statistics: StatisticsToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default = "default_target")]
    pub target: String,
    #[serde(default)]
    pub subfolders: bool,
    #[serde(default)]
    pub pretty: bool,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            target: default_target(),
            subfolders: false,
            pretty: false,
        }
    }
}

fn default_target() -> String {
    "ARD".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeriodToml {
    /// First day, `YYYY-MM-DD`.
    pub start: String,
    /// Last day, `YYYY-MM-DD`.
    pub end: String,
    #[serde(default = "default_step")]
    pub step: u32,
    #[serde(default = "default_doy_min")]
    pub doy_min: u16,
    #[serde(default = "default_doy_max")]
    pub doy_max: u16,
}

fn default_step() -> u32 {
    1
}
fn default_doy_min() -> u16 {
    1
}
fn default_doy_max() -> u16 {
    366
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatisticsToml {
    /// Product codes, e.g. `["NUM", "AVG", "Q25"]`.
    #[serde(default = "default_metrics")]
    pub metrics: Vec<String>,
    /// Extra quantile probabilities in (0, 1).
    #[serde(default)]
    pub quantiles: Vec<f64>,
}

impl Default for StatisticsToml {
    fn default() -> Self {
        Self {
            metrics: default_metrics(),
            quantiles: Vec::new(),
        }
    }
}

fn default_metrics() -> Vec<String> {
    ["NUM", "MIN", "MAX", "RNG", "AVG", "STD", "SKW", "KRT", "IQR"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Reads and parses a TOML configuration file.
pub fn load(path: &Path) -> Result<ClearskyConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}
