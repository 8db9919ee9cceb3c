// src/geometry/mod.rs

//! Geometry collaborator contract
//!
//! Geometry construction, statistics, quality maps and format conversion
//! belong to an external geometry library. This module pins down the
//! narrow interface the batch driver needs from it:
//!
//! - [`GeometryBackend::construct`] builds a [`Geometry`] for one cube
//! - a [`Geometry`] can describe itself, render diagnostics, and convert
//!   itself into another on-disk format, returning a handle to the result
//!
//! [`ExternalBackend`] is the production implementation, delegating the
//! heavy lifting to a configured converter program.

mod external;

pub use external::{ExternalBackend, ExternalGeometry, RenderKind};

use crate::error::Result;
use crate::format::TargetFormat;
use crate::segy::{join_fields, HeaderField};
use std::path::{Path, PathBuf};

/// Parameters for building a geometry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructOptions {
    /// Trace header fields to load
    pub headers: Vec<HeaderField>,
    /// Trace header fields used as the trace index
    pub index_headers: Vec<HeaderField>,
    /// Make a full pass over the cube to collect amplitude statistics
    pub collect_stats: bool,
    /// Also collect per-trace (spatial) statistics maps
    pub spatial: bool,
    /// Ignore a cached statistics file and collect again
    pub recollect: bool,
}

impl Default for ConstructOptions {
    fn default() -> Self {
        use crate::segy::{HeaderPreset, IndexPreset, Preset};
        Self {
            headers: HeaderPreset::Post.fields().to_vec(),
            index_headers: IndexPreset::Post.fields().to_vec(),
            collect_stats: true,
            spatial: true,
            recollect: false,
        }
    }
}

impl ConstructOptions {
    /// Comma-separated header names
    pub fn headers_list(&self) -> String {
        join_fields(&self.headers, ",")
    }

    /// Comma-separated index header names
    pub fn index_list(&self) -> String {
        join_fields(&self.index_headers, ",")
    }
}

/// Location of the statistics cache kept next to a cube
pub fn meta_path(cube: &Path) -> PathBuf {
    cube.with_extension("meta")
}

/// A queryable description of one cube
pub trait Geometry {
    /// Path of the cube this geometry describes
    fn path(&self) -> &Path;

    /// Multi-line textual summary
    fn summary(&self) -> String;

    /// Textual (card image) header, if the underlying format has one
    fn textual_header(&self) -> Option<String>;

    /// Render a visual summary of the cube
    fn show(&self) -> Result<()>;

    /// Compute and render the quality map
    fn show_quality_map(&self) -> Result<()>;

    /// Convert into `format` at `destination`, returning the new geometry
    fn convert(
        &self,
        format: TargetFormat,
        quantize: bool,
        destination: &Path,
    ) -> Result<Box<dyn Geometry>>;
}

/// Something that can build geometries
pub trait GeometryBackend {
    /// Build the geometry for the cube at `path`
    fn construct(&self, path: &Path, options: &ConstructOptions) -> Result<Box<dyn Geometry>>;
}
