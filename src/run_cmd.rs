use anyhow::{Context, Result};
use tracing::info;

use clearsky_engine::clear_sky_observations;
use clearsky_io::{read_tile, write_products};

use crate::cli::RunArgs;
use crate::config;
use crate::convert;

/// Run the `run` subcommand: read one tile, compute its products, write them.
pub fn run(args: RunArgs) -> Result<()> {
    let _span = tracing::info_span!("run").entered();

    let mut config = config::load(&args.config)?;

    // Step 1: CLI overrides
    if let Some(input) = args.input {
        config.io.input = Some(input);
    }
    if let Some(output) = args.output {
        config.io.output = Some(output);
    }
    let input = config.io.input.as_ref().ok_or_else(|| {
        anyhow::anyhow!("no input path: set [io].input in config or use --input")
    })?;
    let output = config.io.output.as_ref().ok_or_else(|| {
        anyhow::anyhow!("no output path: set [io].output in config or use --output")
    })?;

    // Step 2: Build configs from TOML
    let cso_cfg = convert::build_cso_config(&config)?;
    let writer_cfg = convert::build_writer_config(&config.io);

    // Step 3: Read the tile
    let tile = read_tile(input)
        .with_context(|| format!("failed to read tile: {}", input.display()))?;

    // Step 4: Compute
    let products = clear_sky_observations(tile.series(), tile.mask(), &cso_cfg)
        .with_context(|| format!("clear-sky statistics failed for tile {}", tile.tile()))?;

    // Step 5: Write
    let written = write_products(output, tile.tile(), &products, &writer_cfg)
        .with_context(|| format!("failed to write products to {}", output.display()))?;

    info!(
        tile = %tile.tile(),
        n_products = products.len(),
        n_windows = products.windows().len(),
        n_files = written.len(),
        "run complete"
    );
    Ok(())
}
