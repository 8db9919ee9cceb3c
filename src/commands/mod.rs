// src/commands/mod.rs
//! Command handlers for the segyconv CLI

mod completions;
mod config;
mod convert;
mod inspect;
pub mod progress;

pub use completions::cmd_completions;
pub use config::cmd_config_show;
pub use convert::cmd_convert;
pub use inspect::cmd_inspect;
