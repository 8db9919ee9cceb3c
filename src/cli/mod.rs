// src/cli/mod.rs
//! CLI definitions for segyconv
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.
//!
//! - `convert` - Convert discovered SEG-Y cubes
//! - `inspect` - Print file-level headers of one cube
//! - `config` - Print the effective configuration
//! - `completions` - Generate shell completions

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use segyconv::{RunOverrides, TargetFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "segyconv")]
#[command(author = "segyconv contributors")]
#[command(version)]
#[command(about = "Batch conversion of SEG-Y cubes to HDF5/BLOSC", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert SEG-Y cubes matching the given patterns
    Convert(ConvertArgs),

    /// Print file-level headers of a SEG-Y cube
    Inspect {
        /// Path to the SEG-Y file
        path: PathBuf,

        /// Emit JSON instead of a text summary
        #[arg(long)]
        json: bool,

        /// Configuration file (selects which trace header fields are shown)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Configuration file to load
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Glob patterns or literal cube paths (replace configured paths)
    pub patterns: Vec<String>,

    /// Configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Target format
    #[arg(short, long, value_enum)]
    pub format: Option<TargetFormat>,

    /// Quantize amplitudes
    #[arg(long, overrides_with = "no_quantize")]
    pub quantize: bool,

    /// Store amplitudes unquantized
    #[arg(long, overrides_with = "quantize")]
    pub no_quantize: bool,

    /// Convert even if the artifact already exists
    #[arg(long, overrides_with = "no_recreate")]
    pub recreate: bool,

    /// Keep existing artifacts (overrides `recreate = true` in the config)
    #[arg(long, overrides_with = "recreate")]
    pub no_recreate: bool,

    /// Print and render diagnostics for every converted cube
    #[arg(long, overrides_with = "no_show")]
    pub show: bool,

    /// Skip diagnostics (overrides `show = true` in the config)
    #[arg(long, overrides_with = "show")]
    pub no_show: bool,

    /// Show what would be converted without converting
    #[arg(long, overrides_with = "no_dry_run")]
    pub dry_run: bool,

    /// Really convert (overrides `dry_run = true` in the config)
    #[arg(long, overrides_with = "dry_run")]
    pub no_dry_run: bool,
}

/// Resolve an `--x`/`--no-x` flag pair; `None` leaves the configured value
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl ConvertArgs {
    /// Command-line adjustments to the configured run
    pub fn overrides(&self) -> RunOverrides {
        RunOverrides {
            paths: self.patterns.clone(),
            recreate: switch(self.recreate, self.no_recreate),
            format: self.format,
            quantize: switch(self.quantize, self.no_quantize),
            show: switch(self.show, self.no_show),
            dry_run: switch(self.dry_run, self.no_dry_run),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_overrides() {
        let cli = Cli::parse_from([
            "segyconv", "convert", "/d/*.sgy", "--format", "h5py", "--no-quantize", "--dry-run",
        ]);
        let Some(Commands::Convert(args)) = cli.command else {
            panic!("expected convert");
        };

        let overrides = args.overrides();
        assert_eq!(overrides.paths, vec!["/d/*.sgy"]);
        assert_eq!(overrides.format, Some(TargetFormat::Hdf5));
        assert_eq!(overrides.quantize, Some(false));
        assert_eq!(overrides.dry_run, Some(true));
        assert_eq!(overrides.recreate, None);
    }

    #[test]
    fn test_quantize_left_to_config() {
        let cli = Cli::parse_from(["segyconv", "-v", "convert"]);
        assert_eq!(cli.verbose, 1);
        let Some(Commands::Convert(args)) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.overrides().quantize, None);
        assert!(args.overrides().paths.is_empty());
    }

    #[test]
    fn test_negated_switches() {
        let cli = Cli::parse_from([
            "segyconv", "convert", "--no-dry-run", "--no-recreate", "--show", "--no-show",
        ]);
        let Some(Commands::Convert(args)) = cli.command else {
            panic!("expected convert");
        };

        let overrides = args.overrides();
        assert_eq!(overrides.dry_run, Some(false));
        assert_eq!(overrides.recreate, Some(false));
        assert_eq!(overrides.show, Some(false));
        assert_eq!(overrides.quantize, None);
    }
}
