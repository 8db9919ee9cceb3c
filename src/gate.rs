// src/gate.rs

//! Per-cube policy gate
//!
//! Decides, before any geometry is built, whether a cube is processed.
//! The checks run in a fixed order so skipped cubes never pay for
//! construction:
//!
//! 1. source missing: skip silently
//! 2. source is itself a converted artifact: skip with a notice
//! 3. converted artifact present and `recreate` off: skip with a notice
//! 4. dry-run: report the source/destination pair and skip
//! 5. otherwise proceed

use std::path::Path;
use tracing::debug;

/// Outcome of the policy gate for one cube
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Source cube is gone (stale match)
    SkipMissing,
    /// Source already carries the target extension, so it would convert onto itself
    SkipArtifact,
    /// Converted artifact already exists and recreate is off
    SkipExists,
    /// Dry-run: would convert, but nothing is touched
    SkipDryRun,
    /// Build the geometry and convert
    Proceed,
}

impl Decision {
    /// Whether the cube goes on to construction and conversion
    pub fn proceeds(&self) -> bool {
        matches!(self, Self::Proceed)
    }
}

/// Apply the policy to already-known filesystem facts
pub fn evaluate(
    source_exists: bool,
    is_artifact: bool,
    target_exists: bool,
    recreate: bool,
    dry_run: bool,
) -> Decision {
    if !source_exists {
        Decision::SkipMissing
    } else if is_artifact {
        Decision::SkipArtifact
    } else if target_exists && !recreate {
        Decision::SkipExists
    } else if dry_run {
        Decision::SkipDryRun
    } else {
        Decision::Proceed
    }
}

/// Filesystem-backed policy gate
#[derive(Debug, Clone, Copy, Default)]
pub struct Gate {
    recreate: bool,
    dry_run: bool,
}

impl Gate {
    /// Create a gate with the given recreate and dry-run flags
    pub fn new(recreate: bool, dry_run: bool) -> Self {
        Self { recreate, dry_run }
    }

    /// Decide what to do with `cube`, whose artifact would be `converted`
    pub fn check(&self, cube: &Path, converted: &Path) -> Decision {
        let source_exists = cube.exists();
        let is_artifact = cube == converted;
        // Short-circuit: a missing source never looks at the target.
        let target_exists = source_exists && converted.exists();
        let decision = evaluate(
            source_exists,
            is_artifact,
            target_exists,
            self.recreate,
            self.dry_run,
        );
        debug!(
            "Gate for {} -> {}: {:?}",
            cube.display(),
            converted.display(),
            decision
        );
        decision
    }
}
