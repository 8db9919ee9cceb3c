// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: configuration file
fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("PATH")
        .help("Configuration file")
}

fn build_cli() -> Command {
    Command::new("segyconv")
        .version(env!("CARGO_PKG_VERSION"))
        .author("segyconv contributors")
        .about("Batch conversion of SEG-Y cubes to HDF5/BLOSC")
        .subcommand_required(false)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Increase log verbosity (-v debug, -vv trace)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Only log warnings and errors"),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert SEG-Y cubes matching the given patterns")
                .arg(
                    Arg::new("patterns")
                        .num_args(0..)
                        .help("Glob patterns or literal cube paths (replace configured paths)"),
                )
                .arg(config_arg())
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .value_parser(["hdf5", "h5py", "blosc"])
                        .help("Target format"),
                )
                .arg(
                    Arg::new("quantize")
                        .long("quantize")
                        .action(ArgAction::SetTrue)
                        .help("Quantize amplitudes"),
                )
                .arg(
                    Arg::new("no_quantize")
                        .long("no-quantize")
                        .action(ArgAction::SetTrue)
                        .help("Store amplitudes unquantized"),
                )
                .arg(
                    Arg::new("recreate")
                        .long("recreate")
                        .action(ArgAction::SetTrue)
                        .help("Convert even if the artifact already exists"),
                )
                .arg(
                    Arg::new("no_recreate")
                        .long("no-recreate")
                        .action(ArgAction::SetTrue)
                        .help("Keep existing artifacts (overrides `recreate = true` in the config)"),
                )
                .arg(
                    Arg::new("show")
                        .long("show")
                        .action(ArgAction::SetTrue)
                        .help("Print and render diagnostics for every converted cube"),
                )
                .arg(
                    Arg::new("no_show")
                        .long("no-show")
                        .action(ArgAction::SetTrue)
                        .help("Skip diagnostics (overrides `show = true` in the config)"),
                )
                .arg(
                    Arg::new("dry_run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Show what would be converted without converting"),
                )
                .arg(
                    Arg::new("no_dry_run")
                        .long("no-dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Really convert (overrides `dry_run = true` in the config)"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print file-level headers of a SEG-Y cube")
                .arg(Arg::new("path").required(true).help("Path to the SEG-Y file"))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Emit JSON instead of a text summary"),
                )
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("config")
                .about("Print the effective configuration as TOML")
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(Arg::new("shell").required(true).help("Shell to generate completions for")),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("segyconv.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
