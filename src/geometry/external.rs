// src/geometry/external.rs

//! Geometry backend that delegates to external programs
//!
//! Construction reads the SEG-Y file headers directly so summaries and
//! textual headers are available without the external library. Statistics
//! collection, quality maps and conversion are handed to the configured
//! converter and renderer programs; the construction options are passed
//! along through argument placeholders.

use super::{meta_path, ConstructOptions, Geometry, GeometryBackend};
use crate::config::ConverterConfig;
use crate::error::{Error, Result};
use crate::format::TargetFormat;
use crate::segy::{format_bytes, SegyHeader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;
use strum_macros::Display;
use tracing::{debug, info, warn};

/// Kind of visual diagnostic requested from the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum RenderKind {
    Summary,
    QualityMap,
}

/// Backend running the configured converter program
#[derive(Debug, Clone)]
pub struct ExternalBackend {
    config: Arc<ConverterConfig>,
}

impl ExternalBackend {
    /// Create a backend from converter settings
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Check that the converter program is configured and on PATH
    pub fn ensure_available(&self) -> Result<PathBuf> {
        let program = self.config.program.as_deref().ok_or_else(|| {
            Error::Config("no converter program configured; set [converter] program".to_string())
        })?;
        resolve_program(program)
    }
}

impl GeometryBackend for ExternalBackend {
    fn construct(&self, path: &Path, options: &ConstructOptions) -> Result<Box<dyn Geometry>> {
        let header = SegyHeader::read(path, &options.headers)?;
        debug!(
            "Constructed geometry for {} ({} traces)",
            path.display(),
            header.trace_count
        );
        Ok(Box::new(ExternalGeometry {
            path: path.to_path_buf(),
            kind: Described::Segy(Box::new(header)),
            options: options.clone(),
            config: Arc::clone(&self.config),
        }))
    }
}

#[derive(Debug)]
enum Described {
    /// Source cube with parsed file headers
    Segy(Box<SegyHeader>),
    /// Artifact produced by the converter
    Converted { format: TargetFormat, quantized: bool },
}

/// Geometry handle backed by external programs
#[derive(Debug)]
pub struct ExternalGeometry {
    path: PathBuf,
    kind: Described,
    options: ConstructOptions,
    config: Arc<ConverterConfig>,
}

impl ExternalGeometry {
    /// Run the renderer, if one is configured
    ///
    /// Diagnostics never abort a run: failures are logged and swallowed.
    fn render(&self, kind: RenderKind) -> Result<()> {
        let Some(renderer) = &self.config.renderer else {
            info!("No renderer configured; skipping {} of {}", kind, self.path.display());
            return Ok(());
        };

        let program = match resolve_program(&renderer.program) {
            Ok(program) => program,
            Err(e) => {
                warn!("Cannot render {} of {}: {}", kind, self.path.display(), e);
                return Ok(());
            }
        };

        let src = self.path.display().to_string();
        let kind_name = kind.to_string();
        let args = expand_args(&renderer.args, &[("src", src.as_str()), ("kind", kind_name.as_str())]);

        debug!("Rendering: {} {:?}", program.display(), args);
        match Command::new(&program).args(&args).stdin(Stdio::null()).status() {
            Ok(status) if status.success() => {}
            Ok(status) => warn!(
                "Renderer '{}' exited with code {} for {}",
                renderer.program,
                status.code().unwrap_or(-1),
                self.path.display()
            ),
            Err(e) => warn!("Failed to spawn renderer '{}': {}", renderer.program, e),
        }
        Ok(())
    }

    fn converter_args(&self, format: TargetFormat, quantize: bool, destination: &Path) -> Vec<String> {
        let src = self.path.display().to_string();
        let dst = destination.display().to_string();
        let format_name = format.to_string();
        let headers = self.options.headers_list();
        let index_headers = self.options.index_list();
        let flag = |b: bool| if b { "true" } else { "false" };

        let vars = [
            ("src", src.as_str()),
            ("dst", dst.as_str()),
            ("format", format_name.as_str()),
            ("quantize", flag(quantize)),
            ("headers", headers.as_str()),
            ("index_headers", index_headers.as_str()),
            ("collect_stats", flag(self.options.collect_stats)),
            ("spatial", flag(self.options.spatial)),
            ("recollect", flag(self.options.recollect)),
        ];

        let mut args = expand_args(&self.config.args, &vars);
        if quantize {
            args.extend(expand_args(&self.config.quantize_args, &vars));
        }
        args
    }
}

impl Geometry for ExternalGeometry {
    fn path(&self) -> &Path {
        &self.path
    }

    fn summary(&self) -> String {
        match &self.kind {
            Described::Segy(header) => {
                let meta = meta_path(&self.path);
                let stats = if !self.options.collect_stats {
                    "not collected".to_string()
                } else if meta.exists() && !self.options.recollect {
                    format!("cached at {}", meta.display())
                } else if self.options.spatial {
                    "collected during conversion (spatial)".to_string()
                } else {
                    "collected during conversion".to_string()
                };
                format!(
                    "{}\n{:<28}{}\n{:<28}{}\n{:<28}{}",
                    header,
                    "Headers:",
                    self.options.headers_list(),
                    "Index headers:",
                    self.options.index_list(),
                    "Statistics:",
                    stats
                )
            }
            Described::Converted { format, quantized } => {
                let size = std::fs::metadata(&self.path)
                    .map(|m| format_bytes(m.len()))
                    .unwrap_or_else(|_| "unknown".to_string());
                format!(
                    "{:<28}{}\n{:<28}{}{}\n{:<28}{}",
                    "Converted cube:",
                    self.path.display(),
                    "Format:",
                    format,
                    if *quantized { " (quantized)" } else { "" },
                    "File size:",
                    size
                )
            }
        }
    }

    fn textual_header(&self) -> Option<String> {
        match &self.kind {
            Described::Segy(header) => Some(header.textual_header()),
            Described::Converted { .. } => None,
        }
    }

    fn show(&self) -> Result<()> {
        self.render(RenderKind::Summary)
    }

    fn show_quality_map(&self) -> Result<()> {
        self.render(RenderKind::QualityMap)
    }

    fn convert(
        &self,
        format: TargetFormat,
        quantize: bool,
        destination: &Path,
    ) -> Result<Box<dyn Geometry>> {
        let program_name = self.config.program.as_deref().ok_or_else(|| {
            Error::Config("no converter program configured; set [converter] program".to_string())
        })?;
        let program = resolve_program(program_name)?;
        let args = self.converter_args(format, quantize, destination);

        info!(
            "Converting {} -> {} ({}{})",
            self.path.display(),
            destination.display(),
            if quantize { "quantized " } else { "" },
            format
        );
        debug!("Executing: {} {:?}", program.display(), args);

        if destination == self.path {
            return Err(Error::conversion(
                &self.path,
                "destination is the source cube itself",
            ));
        }
        remove_stale(destination)?;

        let output = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| Error::conversion(&self.path, format!("failed to spawn '{}': {}", program_name, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stdout.lines() {
            debug!("[{}] {}", program_name, line);
        }
        for line in stderr.lines() {
            debug!("[{}] {}", program_name, line);
        }

        if !output.status.success() {
            return Err(Error::conversion(
                &self.path,
                format!(
                    "'{}' exited with code {}: {}",
                    program_name,
                    output.status.code().unwrap_or(-1),
                    stderr.trim()
                ),
            ));
        }

        if !destination.exists() {
            return Err(Error::conversion(
                &self.path,
                format!(
                    "'{}' succeeded but {} was not created",
                    program_name,
                    destination.display()
                ),
            ));
        }

        Ok(Box::new(ExternalGeometry {
            path: destination.to_path_buf(),
            kind: Described::Converted {
                format,
                quantized: quantize,
            },
            options: self.options.clone(),
            config: Arc::clone(&self.config),
        }))
    }
}

/// Remove an artifact left by an earlier run so the converter must write it anew
fn remove_stale(destination: &Path) -> Result<()> {
    let Ok(metadata) = std::fs::symlink_metadata(destination) else {
        return Ok(());
    };
    debug!("Removing existing artifact {}", destination.display());
    if metadata.is_dir() {
        std::fs::remove_dir_all(destination)?;
    } else {
        std::fs::remove_file(destination)?;
    }
    Ok(())
}

/// Locate a program, either by explicit path or on PATH
fn resolve_program(program: &str) -> Result<PathBuf> {
    which::which(program).map_err(|_| Error::ProgramNotFound(program.to_string()))
}

/// Substitute `{name}` placeholders in each template
pub fn expand_args(templates: &[String], vars: &[(&str, &str)]) -> Vec<String> {
    templates
        .iter()
        .map(|template| {
            vars.iter().fold(template.clone(), |acc, (name, value)| {
                acc.replace(&format!("{{{}}}", name), value)
            })
        })
        .collect()
}
