// src/lib.rs

//! segyconv: batch SEG-Y conversion
//!
//! Converts collections of SEG-Y seismic cubes into HDF5 or BLOSC storage,
//! placing each artifact next to its source.
//!
//! # Architecture
//!
//! - Discovery: glob patterns expand to a sorted, de-duplicated cube list
//! - Gate: a cube is converted only if it exists and, unless recreating,
//!   has no artifact yet; dry-run stops just before any work
//! - Geometry: construction and conversion sit behind a backend trait, with
//!   an external-program backend for production use
//! - Driver: one cube at a time, first failure ends the run

pub mod config;
pub mod discovery;
pub mod driver;
mod error;
pub mod format;
pub mod gate;
pub mod geometry;
pub mod progress;
pub mod segy;

pub use config::{Config, RunOverrides};
pub use driver::{BatchDriver, BatchOptions, BatchReport, CubeOutcome, CubeReport};
pub use error::{Error, Result};
pub use format::{converted_path, TargetFormat};
pub use geometry::{ConstructOptions, ExternalBackend, Geometry, GeometryBackend};
pub use progress::{LogProgress, ProgressTracker, SilentProgress};
pub use segy::SegyHeader;
