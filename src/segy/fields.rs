// src/segy/fields.rs

//! Trace header fields and header schemas
//!
//! Field names follow the conventional SEG-Y trace header mnemonics
//! (`INLINE_3D`, `CDP_X`, `FieldRecord`, ...). Positions are 1-based byte
//! offsets within the 240-byte trace header, as listed in the SEG-Y
//! standard.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// A field of the 240-byte trace header
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum HeaderField {
    #[strum(serialize = "TRACE_SEQUENCE_LINE")]
    TraceSequenceLine,
    #[strum(serialize = "TRACE_SEQUENCE_FILE")]
    TraceSequenceFile,
    #[strum(serialize = "FieldRecord")]
    FieldRecord,
    #[strum(serialize = "TraceNumber")]
    TraceNumber,
    #[strum(serialize = "EnergySourcePoint")]
    EnergySourcePoint,
    #[strum(serialize = "CDP")]
    Cdp,
    #[strum(serialize = "CDP_TRACE")]
    CdpTrace,
    #[strum(serialize = "TraceIdentificationCode")]
    TraceIdentificationCode,
    #[strum(serialize = "offset")]
    Offset,
    #[strum(serialize = "DelayRecordingTime")]
    DelayRecordingTime,
    #[strum(serialize = "TRACE_SAMPLE_COUNT")]
    TraceSampleCount,
    #[strum(serialize = "TRACE_SAMPLE_INTERVAL")]
    TraceSampleInterval,
    #[strum(serialize = "CDP_X")]
    CdpX,
    #[strum(serialize = "CDP_Y")]
    CdpY,
    #[strum(serialize = "INLINE_3D")]
    Inline3d,
    #[strum(serialize = "CROSSLINE_3D")]
    Crossline3d,
    #[strum(serialize = "ShotPoint")]
    ShotPoint,
}

impl HeaderField {
    /// 1-based byte position within the trace header
    pub fn byte(&self) -> usize {
        match self {
            Self::TraceSequenceLine => 1,
            Self::TraceSequenceFile => 5,
            Self::FieldRecord => 9,
            Self::TraceNumber => 13,
            Self::EnergySourcePoint => 17,
            Self::Cdp => 21,
            Self::CdpTrace => 25,
            Self::TraceIdentificationCode => 29,
            Self::Offset => 37,
            Self::DelayRecordingTime => 109,
            Self::TraceSampleCount => 115,
            Self::TraceSampleInterval => 117,
            Self::CdpX => 181,
            Self::CdpY => 185,
            Self::Inline3d => 189,
            Self::Crossline3d => 193,
            Self::ShotPoint => 197,
        }
    }

    /// Width of the field in bytes (2 or 4)
    pub fn width(&self) -> usize {
        match self {
            Self::TraceIdentificationCode
            | Self::DelayRecordingTime
            | Self::TraceSampleCount
            | Self::TraceSampleInterval => 2,
            _ => 4,
        }
    }

    /// Read this field from a raw big-endian trace header
    pub fn read(&self, header: &[u8]) -> Option<i32> {
        let start = self.byte() - 1;
        let bytes = header.get(start..start + self.width())?;
        Some(match bytes {
            [a, b] => i16::from_be_bytes([*a, *b]) as i32,
            [a, b, c, d] => i32::from_be_bytes([*a, *b, *c, *d]),
            _ => return None,
        })
    }

    /// Parse a field name, mapping failures to the crate error type
    pub fn parse(name: &str) -> Result<Self> {
        Self::from_str(name).map_err(|_| Error::UnknownHeader {
            name: name.to_string(),
            known: join_fields(&Self::all(), ", "),
        })
    }

    /// Every supported field, in trace header order
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

impl TryFrom<String> for HeaderField {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<HeaderField> for String {
    fn from(field: HeaderField) -> Self {
        field.to_string()
    }
}

/// A named set of header fields
pub trait Preset {
    /// Fields this preset stands for, in order
    fn fields(&self) -> &'static [HeaderField];
}

/// Header sets loaded from the trace headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum HeaderPreset {
    /// Post-stack line numbers
    #[default]
    Post,
    /// Post-stack line numbers plus CDP coordinates
    PostFull,
    /// Pre-stack acquisition headers
    PreFull,
}

impl Preset for HeaderPreset {
    fn fields(&self) -> &'static [HeaderField] {
        use HeaderField::*;
        match self {
            Self::Post => &[Inline3d, Crossline3d],
            Self::PostFull => &[Inline3d, Crossline3d, CdpX, CdpY],
            Self::PreFull => &[FieldRecord, TraceNumber, TraceSequenceFile, Cdp, CdpTrace, Offset],
        }
    }
}

/// Header sets used to index traces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum IndexPreset {
    /// Inline/crossline index
    #[default]
    Post,
    /// Field record/trace number index
    Pre,
    /// CDP coordinate index
    Cdp,
}

impl Preset for IndexPreset {
    fn fields(&self) -> &'static [HeaderField] {
        use HeaderField::*;
        match self {
            Self::Post => &[Inline3d, Crossline3d],
            Self::Pre => &[FieldRecord, TraceNumber],
            Self::Cdp => &[CdpY, CdpX],
        }
    }
}

/// Either a preset or an explicit list of fields
///
/// In TOML this is written as `headers = "post-full"` or
/// `headers = ["INLINE_3D", "CROSSLINE_3D", "CDP_X"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSelection<P> {
    Preset(P),
    Fields(Vec<HeaderField>),
}

impl<P: Preset> FieldSelection<P> {
    /// Resolve to a concrete, ordered field list
    pub fn resolve(&self) -> Vec<HeaderField> {
        match self {
            Self::Preset(preset) => preset.fields().to_vec(),
            Self::Fields(fields) => fields.clone(),
        }
    }
}

impl<P: Default> Default for FieldSelection<P> {
    fn default() -> Self {
        Self::Preset(P::default())
    }
}

/// Join field names for display and command templates
pub fn join_fields(fields: &[HeaderField], separator: &str) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}
