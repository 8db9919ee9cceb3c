// src/commands/inspect.rs

//! Cube inspection command
//!
//! Reads only the file-level headers, so it works on cubes of any size
//! and needs no converter program.

use anyhow::Result;
use segyconv::geometry::meta_path;
use segyconv::{Config, SegyHeader};
use std::path::Path;

/// Print the headers of one SEG-Y cube
pub fn cmd_inspect(path: &Path, json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let options = config.geometry.options();
    let header = SegyHeader::read(path, &options.headers)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&header)?);
        return Ok(());
    }

    println!("{}", header);
    let meta = meta_path(path);
    if meta.exists() {
        println!("{:<28}{}", "Statistics cache:", meta.display());
    }
    println!();
    println!("{}", header.textual_header());
    Ok(())
}
