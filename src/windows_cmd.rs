use anyhow::{Context, Result};
use tracing::info;

use clearsky_window::WindowSet;

use crate::cli::WindowsArgs;
use crate::config;
use crate::convert;

/// Run the `windows` subcommand: print the window table of a configuration.
pub fn run(args: WindowsArgs) -> Result<()> {
    let _span = tracing::info_span!("windows").entered();

    let config = config::load(&args.config)?;
    let cso_cfg = convert::build_cso_config(&config)?;
    let windows = WindowSet::build(
        cso_cfg.start(),
        cso_cfg.end(),
        cso_cfg.step(),
        cso_cfg.doy_mask(),
    )
    .context("failed to build windows")?;

    println!(
        "{:>5}  {:<10}  {:<10}  {:<10}  {:>4}  {:>5}",
        "band", "nominal", "start", "end", "used", "days"
    );
    for (w, window) in windows.iter().enumerate() {
        println!(
            "{:>5}  {:<10}  {:<10}  {:<10}  {:>4}  {:>5}",
            w + 1,
            window.nominal_start().to_string(),
            window.start().to_string(),
            window.end().to_string(),
            if window.is_used() { "yes" } else { "no" },
            window.length(),
        );
    }

    info!(
        n_windows = windows.len(),
        n_used = windows.n_used(),
        "window table printed"
    );
    Ok(())
}
