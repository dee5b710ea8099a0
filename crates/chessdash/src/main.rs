//! chessdash - temporal breakdowns of a chess.com archive

use anyhow::{anyhow, Context, Result};
use chessdash::{render_report, Args};
use chessdash_common::init_logging;
use chessdash_config::ConfigLoader;
use clap::Parser;
use tracing::debug;

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
    .context("failed to load configuration")?;

    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    init_logging(&config.logging).map_err(|e| anyhow!("failed to initialize logging: {e}"))?;
    debug!(?config, "Loaded configuration");

    println!("{}", render_report(&args, &config)?);
    Ok(())
}
