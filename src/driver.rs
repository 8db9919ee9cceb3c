// src/driver.rs

//! Sequential batch conversion driver
//!
//! Each discovered cube goes through the policy gate and, if admitted,
//! through construction, optional diagnostics and conversion before the
//! next cube is looked at. Per cube:
//!
//! ```text
//! DISCOVERED -> SKIPPED_MISSING
//!            -> SKIPPED_ARTIFACT
//!            -> SKIPPED_EXISTS
//!            -> SKIPPED_DRYRUN
//!            -> CONSTRUCTED -> (DIAGNOSED) -> CONVERTED -> (DIAGNOSED)
//! ```
//!
//! Every state is terminal for its cube. Errors from construction or
//! conversion are returned as-is and end the run; nothing already written
//! is cleaned up.

use crate::config::Config;
use crate::error::Result;
use crate::format::{converted_path, TargetFormat};
use crate::gate::{Decision, Gate};
use crate::geometry::{ConstructOptions, Geometry, GeometryBackend};
use crate::progress::ProgressTracker;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Settings for one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOptions {
    pub recreate: bool,
    pub format: TargetFormat,
    pub quantize: bool,
    pub show: bool,
    pub dry_run: bool,
    pub construct: ConstructOptions,
}

impl BatchOptions {
    /// Take run and geometry settings from a resolved configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            recreate: config.run.recreate,
            format: config.run.format,
            quantize: config.run.quantize,
            show: config.run.show,
            dry_run: config.run.dry_run,
            construct: config.geometry.options(),
        }
    }
}

/// Terminal state of one cube
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeOutcome {
    SkippedMissing,
    /// The discovered file is itself a converted artifact
    SkippedArtifact,
    SkippedExists,
    SkippedDryRun,
    Converted { diagnosed: bool },
}

/// What happened to one cube
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub outcome: CubeOutcome,
}

/// Outcomes of a whole run, in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub cubes: Vec<CubeReport>,
}

impl BatchReport {
    fn count(&self, predicate: impl Fn(&CubeOutcome) -> bool) -> usize {
        self.cubes.iter().filter(|c| predicate(&c.outcome)).count()
    }

    /// Number of cubes converted
    pub fn converted(&self) -> usize {
        self.count(|o| matches!(o, CubeOutcome::Converted { .. }))
    }

    /// Number of cubes whose source was missing
    pub fn missing(&self) -> usize {
        self.count(|o| *o == CubeOutcome::SkippedMissing)
    }

    /// Number of cubes skipped because they are already converted
    pub fn existing(&self) -> usize {
        self.count(|o| matches!(o, CubeOutcome::SkippedExists | CubeOutcome::SkippedArtifact))
    }

    /// Number of cubes only reported by dry-run
    pub fn planned(&self) -> usize {
        self.count(|o| *o == CubeOutcome::SkippedDryRun)
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cube(s): {} converted, {} already converted, {} missing",
            self.cubes.len(),
            self.converted(),
            self.existing(),
            self.missing()
        )?;
        if self.planned() > 0 {
            write!(f, ", {} planned (dry-run)", self.planned())?;
        }
        Ok(())
    }
}

/// Runs the per-cube pipeline against a geometry backend
pub struct BatchDriver<'a, B: GeometryBackend + ?Sized> {
    backend: &'a B,
    options: BatchOptions,
    gate: Gate,
}

impl<'a, B: GeometryBackend + ?Sized> BatchDriver<'a, B> {
    /// Create a driver for the given backend and settings
    pub fn new(backend: &'a B, options: BatchOptions) -> Self {
        let gate = Gate::new(options.recreate, options.dry_run);
        Self {
            backend,
            options,
            gate,
        }
    }

    /// Settings this driver was created with
    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Process every cube in order, stopping at the first failure
    pub fn run(
        &self,
        cubes: &[PathBuf],
        out: &mut dyn Write,
        progress: &dyn ProgressTracker,
    ) -> Result<BatchReport> {
        let mut report = BatchReport::default();

        for cube in cubes {
            progress.set_message(&cube.display().to_string());
            match self.process(cube, out) {
                Ok(cube_report) => report.cubes.push(cube_report),
                Err(e) => {
                    progress.finish_with_error(&format!("{}: {}", cube.display(), e));
                    return Err(e);
                }
            }
            progress.increment(1);
        }

        progress.finish_with_message(&report.to_string());
        Ok(report)
    }

    /// Take one cube through the gate and, if admitted, convert it
    pub fn process(&self, cube: &Path, out: &mut dyn Write) -> Result<CubeReport> {
        let destination = converted_path(cube, self.options.format, self.options.quantize);

        let outcome = match self.gate.check(cube, &destination) {
            Decision::SkipMissing => {
                debug!("Source {} does not exist, skipping", cube.display());
                CubeOutcome::SkippedMissing
            }
            Decision::SkipArtifact => {
                writeln!(
                    out,
                    "[SKIP] {} is already a {} artifact",
                    cube.display(),
                    self.options.format
                )?;
                CubeOutcome::SkippedArtifact
            }
            Decision::SkipExists => {
                writeln!(
                    out,
                    "[SKIP] {} already exists, not converting {}",
                    destination.display(),
                    cube.display()
                )?;
                CubeOutcome::SkippedExists
            }
            Decision::SkipDryRun => {
                writeln!(
                    out,
                    "[DRY-RUN] Would convert {} -> {}",
                    cube.display(),
                    destination.display()
                )?;
                CubeOutcome::SkippedDryRun
            }
            Decision::Proceed => self.convert(cube, &destination, out)?,
        };

        Ok(CubeReport {
            source: cube.to_path_buf(),
            destination,
            outcome,
        })
    }

    fn convert(&self, cube: &Path, destination: &Path, out: &mut dyn Write) -> Result<CubeOutcome> {
        let geometry = self.backend.construct(cube, &self.options.construct)?;

        if self.options.show {
            diagnose(geometry.as_ref(), out)?;
        }

        let converted = geometry.convert(self.options.format, self.options.quantize, destination)?;

        if self.options.show {
            writeln!(out, "{}", converted.summary())?;
        }

        info!("Converted {} -> {}", cube.display(), converted.path().display());
        writeln!(out, "[OK] {} -> {}", cube.display(), converted.path().display())?;

        Ok(CubeOutcome::Converted {
            diagnosed: self.options.show,
        })
    }
}

/// Print textual diagnostics and request visual ones
fn diagnose(geometry: &dyn Geometry, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", geometry.summary())?;
    if let Some(text) = geometry.textual_header() {
        writeln!(out)?;
        writeln!(out, "{}", text)?;
    }
    geometry.show()?;
    geometry.show_quality_map()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::progress::SilentProgress;
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;

    type CallLog = Rc<RefCell<Vec<String>>>;

    /// Backend that records every collaborator call
    #[derive(Default)]
    struct Recorder {
        calls: CallLog,
        fail_convert: bool,
    }

    impl Recorder {
        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    struct Recorded {
        path: PathBuf,
        calls: CallLog,
        fail_convert: bool,
    }

    impl Recorded {
        fn log(&self, call: &str) {
            self.calls.borrow_mut().push(call.to_string());
        }
    }

    impl Geometry for Recorded {
        fn path(&self) -> &Path {
            &self.path
        }

        fn summary(&self) -> String {
            format!("summary of {}", self.path.display())
        }

        fn textual_header(&self) -> Option<String> {
            Some("C 1 RECORDED".to_string())
        }

        fn show(&self) -> Result<()> {
            self.log("show");
            Ok(())
        }

        fn show_quality_map(&self) -> Result<()> {
            self.log("quality_map");
            Ok(())
        }

        fn convert(
            &self,
            format: TargetFormat,
            quantize: bool,
            destination: &Path,
        ) -> Result<Box<dyn Geometry>> {
            self.log(&format!("convert {} {}", format, quantize));
            if self.fail_convert {
                return Err(Error::conversion(&self.path, "disk full"));
            }
            fs::write(destination, b"converted")?;
            Ok(Box::new(Recorded {
                path: destination.to_path_buf(),
                calls: Rc::clone(&self.calls),
                fail_convert: false,
            }))
        }
    }

    impl GeometryBackend for Recorder {
        fn construct(&self, path: &Path, _options: &ConstructOptions) -> Result<Box<dyn Geometry>> {
            self.calls.borrow_mut().push("construct".to_string());
            Ok(Box::new(Recorded {
                path: path.to_path_buf(),
                calls: Rc::clone(&self.calls),
                fail_convert: self.fail_convert,
            }))
        }
    }

    fn cube(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, b"segy").unwrap();
        path
    }

    fn run(backend: &Recorder, options: BatchOptions, cubes: &[PathBuf]) -> (BatchReport, String) {
        let mut out = Vec::new();
        let report = BatchDriver::new(backend, options)
            .run(cubes, &mut out, &SilentProgress::new())
            .unwrap();
        (report, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_missing_source_is_silent() {
        let dir = TempDir::new().unwrap();
        let backend = Recorder::default();

        let (report, out) = run(&backend, BatchOptions::default(), &[dir.path().join("gone.sgy")]);

        assert_eq!(report.cubes[0].outcome, CubeOutcome::SkippedMissing);
        assert!(out.is_empty());
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_existing_artifact_skipped_with_notice() {
        let dir = TempDir::new().unwrap();
        let source = cube(&dir, "a.sgy");
        fs::write(dir.path().join("a.hdf5"), b"old").unwrap();
        let backend = Recorder::default();

        let (report, out) = run(&backend, BatchOptions::default(), &[source]);

        assert_eq!(report.cubes[0].outcome, CubeOutcome::SkippedExists);
        assert!(out.contains("[SKIP]"));
        assert!(out.contains("a.hdf5"));
        assert!(backend.calls().is_empty());
        assert_eq!(fs::read(dir.path().join("a.hdf5")).unwrap(), b"old");
    }

    #[test]
    fn test_recreate_converts_over_existing_artifact() {
        let dir = TempDir::new().unwrap();
        let source = cube(&dir, "a.sgy");
        fs::write(dir.path().join("a.hdf5"), b"old").unwrap();
        let backend = Recorder::default();
        let options = BatchOptions {
            recreate: true,
            ..Default::default()
        };

        let (report, _) = run(&backend, options, &[source]);

        assert_eq!(report.cubes[0].outcome, CubeOutcome::Converted { diagnosed: false });
        assert_eq!(report.cubes[0].destination, dir.path().join("a.hdf5"));
        assert_eq!(backend.calls(), vec!["construct", "convert hdf5 false"]);
        assert_eq!(fs::read(dir.path().join("a.hdf5")).unwrap(), b"converted");
    }

    #[test]
    fn test_dry_run_makes_no_calls() {
        let dir = TempDir::new().unwrap();
        let source = cube(&dir, "a.sgy");
        let backend = Recorder::default();
        let options = BatchOptions {
            dry_run: true,
            recreate: true,
            ..Default::default()
        };

        let (report, out) = run(&backend, options, &[source.clone()]);

        assert_eq!(report.cubes[0].outcome, CubeOutcome::SkippedDryRun);
        assert!(out.contains(&format!("{} -> {}", source.display(), dir.path().join("a.hdf5").display())));
        assert!(backend.calls().is_empty());
        assert!(!dir.path().join("a.hdf5").exists());
    }

    #[test]
    fn test_show_diagnoses_before_and_after() {
        let dir = TempDir::new().unwrap();
        let source = cube(&dir, "a.sgy");
        let backend = Recorder::default();
        let options = BatchOptions {
            show: true,
            quantize: true,
            format: TargetFormat::Blosc,
            ..Default::default()
        };

        let (report, out) = run(&backend, options, &[source]);

        assert_eq!(report.cubes[0].outcome, CubeOutcome::Converted { diagnosed: true });
        assert_eq!(
            backend.calls(),
            vec!["construct", "show", "quality_map", "convert blosc true"]
        );
        assert!(out.contains("summary of"));
        assert!(out.contains("C 1 RECORDED"));
        assert!(out.contains("a.qblosc"));
    }

    #[test]
    fn test_failure_aborts_remaining_cubes() {
        let dir = TempDir::new().unwrap();
        let first = cube(&dir, "a.sgy");
        let second = cube(&dir, "b.sgy");
        let backend = Recorder {
            fail_convert: true,
            ..Default::default()
        };
        let progress = SilentProgress::with_length(2);

        let mut out = Vec::new();
        let result = BatchDriver::new(&backend, BatchOptions::default()).run(
            &[first, second],
            &mut out,
            &progress,
        );

        assert!(matches!(result, Err(Error::Conversion { .. })));
        assert_eq!(backend.calls(), vec!["construct", "convert hdf5 false"]);
        assert!(progress.is_finished());
        assert_eq!(progress.position(), 0);
    }

    #[test]
    fn test_converted_file_matched_as_cube_is_skipped() {
        let dir = TempDir::new().unwrap();
        let artifact = dir.path().join("a.hdf5");
        fs::write(&artifact, b"hdf5").unwrap();
        let backend = Recorder::default();
        let options = BatchOptions {
            recreate: true,
            ..Default::default()
        };

        let (report, out) = run(&backend, options, &[artifact]);

        assert_eq!(report.cubes[0].outcome, CubeOutcome::SkippedArtifact);
        assert_eq!(report.existing(), 1);
        assert!(out.contains("is already a hdf5 artifact"));
        assert!(backend.calls().is_empty());
        assert_eq!(fs::read(dir.path().join("a.hdf5")).unwrap(), b"hdf5");
    }

    #[test]
    fn test_report_counts() {
        let dir = TempDir::new().unwrap();
        let a = cube(&dir, "a.sgy");
        let b = cube(&dir, "b.sgy");
        fs::write(dir.path().join("b.hdf5"), b"old").unwrap();
        let backend = Recorder::default();

        let (report, _) = run(
            &backend,
            BatchOptions::default(),
            &[a, b, dir.path().join("c.sgy")],
        );

        assert_eq!(report.converted(), 1);
        assert_eq!(report.existing(), 1);
        assert_eq!(report.missing(), 1);
        assert_eq!(
            report.to_string(),
            "3 cube(s): 1 converted, 1 already converted, 1 missing"
        );
    }
}
