// src/main.rs

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

/// Default log filter for the given verbosity flags
fn default_filter(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v/-q
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(default_filter(cli.verbose, cli.quiet))
            }),
        )
        .init();

    match cli.command {
        Some(Commands::Convert(args)) => commands::cmd_convert(args, cli.quiet),
        Some(Commands::Inspect { path, json, config }) => {
            commands::cmd_inspect(&path, json, config.as_deref())
        }
        Some(Commands::Config { config }) => commands::cmd_config_show(config.as_deref()),
        Some(Commands::Completions { shell }) => commands::cmd_completions(shell),
        None => {
            println!("segyconv v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'segyconv --help' for usage information");
            Ok(())
        }
    }
}
