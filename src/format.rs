// src/format.rs

//! Target formats and converted-path naming
//!
//! A converted cube lives next to its source, with the source extension
//! replaced by a tag made of an optional quantization marker (`q`) and the
//! lowercase format name: `a.sgy` becomes `a.hdf5`, or `a.qblosc` when
//! quantizing to BLOSC.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumString};

/// Marker prepended to the format tag for quantized output
pub const QUANTIZED_MARKER: &str = "q";

/// On-disk formats a cube can be converted to
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum TargetFormat {
    /// HDF5 container with per-axis projections
    #[default]
    #[serde(alias = "h5py")]
    #[strum(to_string = "hdf5", serialize = "h5py")]
    #[value(alias = "h5py")]
    Hdf5,
    /// BLOSC-compressed chunk store
    #[strum(to_string = "blosc")]
    Blosc,
}

impl TargetFormat {
    /// File extension for this format, with the quantization marker if requested
    pub fn extension(&self, quantize: bool) -> String {
        if quantize {
            format!("{}{}", QUANTIZED_MARKER, self)
        } else {
            self.to_string()
        }
    }
}

/// Derive the converted artifact path for a cube
///
/// Pure function of its three inputs, so re-running with the same
/// configuration always targets the same file.
pub fn converted_path(cube: &Path, format: TargetFormat, quantize: bool) -> PathBuf {
    cube.with_extension(format.extension(quantize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_plain_hdf5_path() {
        assert_eq!(
            converted_path(Path::new("/d/a.sgy"), TargetFormat::Hdf5, false),
            PathBuf::from("/d/a.hdf5")
        );
    }

    #[test]
    fn test_quantized_blosc_path() {
        assert_eq!(
            converted_path(Path::new("/d/a.sgy"), TargetFormat::Blosc, true),
            PathBuf::from("/d/a.qblosc")
        );
    }

    #[test]
    fn test_only_last_extension_replaced() {
        assert_eq!(
            converted_path(Path::new("/data/survey.v2.segy"), TargetFormat::Hdf5, true),
            PathBuf::from("/data/survey.v2.qhdf5")
        );
    }

    #[test]
    fn test_path_without_extension() {
        assert_eq!(
            converted_path(Path::new("/d/cube"), TargetFormat::Blosc, false),
            PathBuf::from("/d/cube.blosc")
        );
    }

    #[test]
    fn test_converted_path_is_deterministic() {
        let cube = Path::new("/mnt/seismic/field_A/raw.sgy");
        let first = converted_path(cube, TargetFormat::Hdf5, true);
        for _ in 0..3 {
            assert_eq!(converted_path(cube, TargetFormat::Hdf5, true), first);
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(TargetFormat::from_str("hdf5").unwrap(), TargetFormat::Hdf5);
        assert_eq!(TargetFormat::from_str("h5py").unwrap(), TargetFormat::Hdf5);
        assert_eq!(TargetFormat::from_str("BLOSC").unwrap(), TargetFormat::Blosc);
        assert!(TargetFormat::from_str("zarr").is_err());
    }

    #[test]
    fn test_format_display() {
        assert_eq!(TargetFormat::Hdf5.to_string(), "hdf5");
        assert_eq!(TargetFormat::Blosc.to_string(), "blosc");
    }
}
