// src/config.rs

//! Run configuration
//!
//! Configuration is read once at startup from an optional TOML file and
//! then adjusted by command-line overrides. It is never mutated while
//! cubes are being processed.
//!
//! ```toml
//! [run]
//! paths = ["/data/seismic/*/*.sgy"]
//! recreate = false
//! format = "hdf5"
//! quantize = true
//! show = false
//! dry_run = false
//!
//! [geometry]
//! headers = "post-full"
//! index_headers = "post"
//! collect_stats = true
//! spatial = true
//! recollect = false
//!
//! [converter]
//! program = "seismic-convert"
//! args = ["{src}", "{dst}", "--format", "{format}"]
//! quantize_args = ["--quantize"]
//!
//! [converter.renderer]
//! program = "seismic-show"
//! args = ["{kind}", "{src}"]
//! ```

use crate::error::{Error, Result};
use crate::format::TargetFormat;
use crate::geometry::ConstructOptions;
use crate::segy::{FieldSelection, HeaderPreset, IndexPreset};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Complete configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub run: RunConfig,
    pub geometry: GeometryConfig,
    pub converter: ConverterConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))
    }
}

/// Batch run flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Glob patterns or literal cube paths
    pub paths: Vec<String>,
    /// Rebuild artifacts that already exist
    pub recreate: bool,
    /// Target format
    pub format: TargetFormat,
    /// Quantize amplitudes in the converted cube
    pub quantize: bool,
    /// Print and render diagnostics for every converted cube
    pub show: bool,
    /// Report what would be converted without touching anything
    pub dry_run: bool,
}

impl RunConfig {
    /// Apply command-line overrides
    ///
    /// Paths given on the command line replace configured paths. Each
    /// switch left unset keeps the configured value.
    pub fn apply(&mut self, overrides: RunOverrides) {
        if !overrides.paths.is_empty() {
            self.paths = overrides.paths;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        let switches = [
            (&mut self.recreate, overrides.recreate),
            (&mut self.quantize, overrides.quantize),
            (&mut self.show, overrides.show),
            (&mut self.dry_run, overrides.dry_run),
        ];
        for (setting, value) in switches {
            if let Some(value) = value {
                *setting = value;
            }
        }
    }
}

/// Command-line adjustments to [`RunConfig`]
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub paths: Vec<String>,
    pub recreate: Option<bool>,
    pub format: Option<TargetFormat>,
    pub quantize: Option<bool>,
    pub show: Option<bool>,
    pub dry_run: Option<bool>,
}

/// Geometry construction settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeometryConfig {
    pub headers: FieldSelection<HeaderPreset>,
    pub index_headers: FieldSelection<IndexPreset>,
    pub collect_stats: bool,
    pub spatial: bool,
    pub recollect: bool,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            headers: FieldSelection::default(),
            index_headers: FieldSelection::default(),
            collect_stats: true,
            spatial: true,
            recollect: false,
        }
    }
}

impl GeometryConfig {
    /// Resolve into construction options
    pub fn options(&self) -> ConstructOptions {
        ConstructOptions {
            headers: self.headers.resolve(),
            index_headers: self.index_headers.resolve(),
            collect_stats: self.collect_stats,
            spatial: self.spatial,
            recollect: self.recollect,
        }
    }
}

/// External converter program and its argument templates
///
/// Placeholders: `{src}`, `{dst}`, `{format}`, `{quantize}`, `{headers}`,
/// `{index_headers}`, `{collect_stats}`, `{spatial}`, `{recollect}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    pub args: Vec<String>,
    /// Appended to `args` when quantizing
    pub quantize_args: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renderer: Option<RendererConfig>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program: None,
            args: ["{src}", "{dst}", "--format", "{format}"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            quantize_args: vec!["--quantize".to_string()],
            renderer: None,
        }
    }
}

/// External program used for visual diagnostics
///
/// Placeholders: `{src}`, `{kind}` (`summary` or `quality-map`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RendererConfig {
    pub program: String,
    #[serde(default = "default_renderer_args")]
    pub args: Vec<String>,
}

fn default_renderer_args() -> Vec<String> {
    vec!["{kind}".to_string(), "{src}".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segy::HeaderField;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.run.paths.is_empty());
        assert!(!config.run.recreate);
        assert_eq!(config.run.format, TargetFormat::Hdf5);
        assert!(!config.run.quantize);
        assert!(!config.run.dry_run);
        assert!(config.geometry.collect_stats);
        assert!(config.converter.program.is_none());
    }

    #[test]
    fn test_parse_full_file() {
        let config: Config = toml::from_str(
            r#"
            [run]
            paths = ["/data/*/*.sgy"]
            recreate = true
            format = "blosc"
            quantize = true

            [geometry]
            headers = "post-full"
            index_headers = ["CDP_Y", "CDP_X"]
            recollect = true

            [converter]
            program = "seismic-convert"

            [converter.renderer]
            program = "seismic-show"
            "#,
        )
        .unwrap();

        assert_eq!(config.run.paths, vec!["/data/*/*.sgy"]);
        assert!(config.run.recreate);
        assert_eq!(config.run.format, TargetFormat::Blosc);
        assert!(config.run.quantize);
        assert!(!config.run.show);

        let options = config.geometry.options();
        assert_eq!(options.headers.len(), 4);
        assert_eq!(options.index_headers, vec![HeaderField::CdpY, HeaderField::CdpX]);
        assert!(options.collect_stats);
        assert!(options.recollect);

        assert_eq!(config.converter.program.as_deref(), Some("seismic-convert"));
        assert_eq!(config.converter.args.len(), 4);
        let renderer = config.converter.renderer.unwrap();
        assert_eq!(renderer.args, vec!["{kind}", "{src}"]);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[run]\nrecreat = true\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_header_rejected() {
        let result: std::result::Result<Config, _> =
            toml::from_str("[geometry]\nheaders = [\"INLINE\"]\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[run\n").unwrap();

        match Config::load(&path) {
            Err(Error::ConfigParse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.run.paths = vec!["/d/*.sgy".to_string()];
        config.converter.program = Some("convert".to_string());

        let text = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_overrides() {
        let mut run = RunConfig {
            paths: vec!["/configured/*.sgy".to_string()],
            quantize: true,
            ..Default::default()
        };

        run.apply(RunOverrides {
            paths: vec!["/cli/a.sgy".to_string()],
            quantize: Some(false),
            format: Some(TargetFormat::Blosc),
            dry_run: Some(true),
            ..Default::default()
        });

        assert_eq!(run.paths, vec!["/cli/a.sgy"]);
        assert!(!run.quantize);
        assert_eq!(run.format, TargetFormat::Blosc);
        assert!(run.dry_run);
        assert!(!run.recreate);
    }

    #[test]
    fn test_overrides_turn_configured_switches_off() {
        let mut run = RunConfig {
            recreate: true,
            show: true,
            dry_run: true,
            ..Default::default()
        };

        run.apply(RunOverrides {
            recreate: Some(false),
            show: Some(false),
            dry_run: Some(false),
            ..Default::default()
        });

        assert!(!run.recreate);
        assert!(!run.show);
        assert!(!run.dry_run);
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let mut run = RunConfig {
            paths: vec!["/configured/*.sgy".to_string()],
            recreate: true,
            ..Default::default()
        };
        let before = run.clone();
        run.apply(RunOverrides::default());
        assert_eq!(run, before);
    }
}
