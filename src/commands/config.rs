// src/commands/config.rs

//! Configuration display command

use anyhow::Result;
use segyconv::Config;
use std::path::Path;

/// Print the effective configuration as TOML
///
/// Without a file this shows every default, which makes a useful starting
/// point for a new configuration.
pub fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}
