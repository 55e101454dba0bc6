use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Clear-sky observation statistics for satellite image time series.
#[derive(Parser)]
#[command(
    name = "clearsky",
    version,
    about = "Per-pixel clear-sky observation statistics over calendar windows"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compute the statistics of one tile and write the products.
    Run(RunArgs),
    /// Print the season-adjusted window table of a configuration.
    Windows(WindowsArgs),
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "clearsky.toml")]
    pub config: PathBuf,

    /// Override input tile path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override output directory from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `windows` subcommand.
#[derive(clap::Args)]
pub struct WindowsArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "clearsky.toml")]
    pub config: PathBuf,
}
