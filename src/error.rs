// src/error.rs

//! Error types for segyconv

use std::path::PathBuf;
use thiserror::Error;

/// Result type for library operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while discovering, inspecting or converting cubes
#[derive(Error, Debug)]
pub enum Error {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A discovery pattern could not be compiled
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// Configuration file could not be parsed
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration is structurally valid but unusable
    #[error("configuration error: {0}")]
    Config(String),

    /// Trace header field name not recognized
    #[error("unknown trace header field '{name}' (known fields: {known})")]
    UnknownHeader { name: String, known: String },

    /// SEG-Y file headers are truncated or inconsistent
    #[error("malformed SEG-Y file {path}: {reason}")]
    Segy { path: PathBuf, reason: String },

    /// External converter or renderer program could not be located
    #[error("external program '{0}' not found on PATH")]
    ProgramNotFound(String),

    /// External converter ran but did not produce the artifact
    #[error("conversion of {path} failed: {reason}")]
    Conversion { path: PathBuf, reason: String },
}

impl Error {
    /// Create a SEG-Y format error for the given file
    pub fn segy(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Segy {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a conversion error for the given source cube
    pub fn conversion(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Conversion {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
