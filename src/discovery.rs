// src/discovery.rs

//! Cube path discovery
//!
//! Expands glob patterns into a sorted, de-duplicated list of candidate
//! cube files. Entries without glob metacharacters are taken as literal
//! paths and kept even when they do not exist, so the policy gate can
//! report them as missing instead of them vanishing silently.

use crate::error::{Error, Result};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Check whether a string uses any glob metacharacters
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Expand patterns into a lexicographically sorted list of cube paths
///
/// An empty result is valid and means there is nothing to process.
pub fn discover<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();

        if !is_glob_pattern(pattern) {
            found.push(PathBuf::from(pattern));
            continue;
        }

        let entries = glob::glob(pattern).map_err(|source| Error::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let mut matched = 0usize;
        for entry in entries {
            match entry {
                Ok(path) => {
                    matched += 1;
                    found.push(path);
                }
                Err(e) => warn!("Skipping unreadable path {}: {}", e.path().display(), e),
            }
        }
        debug!("Pattern '{}' matched {} path(s)", pattern, matched);
    }

    // Byte order of the whole path, not component-wise `PathBuf` order
    found.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    found.dedup();
    Ok(found)
}
