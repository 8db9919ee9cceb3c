// src/commands/convert.rs

//! Batch conversion command

use super::progress::tracker_for;
use crate::cli::ConvertArgs;
use anyhow::{Context, Result};
use segyconv::discovery::discover;
use segyconv::{BatchDriver, BatchOptions, Config, ExternalBackend};
use std::io::{self, Write};
use tracing::{info, warn};

/// Convert every cube matched by the configured or given patterns
pub fn cmd_convert(args: ConvertArgs, quiet: bool) -> Result<()> {
    let mut config = Config::load_or_default(args.config.as_deref())?;
    config.run.apply(args.overrides());

    if config.run.paths.is_empty() {
        return Err(anyhow::anyhow!(
            "No cube patterns given; pass them on the command line or set [run] paths"
        ));
    }

    let cubes = discover(&config.run.paths)?;
    info!(
        "Discovered {} cube(s) from {} pattern(s)",
        cubes.len(),
        config.run.paths.len()
    );
    if cubes.is_empty() {
        warn!("No cubes matched {:?}", config.run.paths);
    }

    let backend = ExternalBackend::new(config.converter.clone());
    if !config.run.dry_run {
        let program = backend
            .ensure_available()
            .context("Converter program is not usable")?;
        info!("Using converter {}", program.display());
    }

    let options = BatchOptions::from_config(&config);
    let driver = BatchDriver::new(&backend, options);
    let progress = tracker_for(cubes.len() as u64, quiet);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = driver.run(&cubes, &mut out, progress.as_ref())?;

    writeln!(out, "{}", report)?;
    Ok(())
}
