// src/segy/mod.rs

//! SEG-Y file-level header reader
//!
//! Reads only what is needed to describe a cube: the textual header, the
//! binary file header, and the first trace header. Trace data is never
//! touched; the trace count is derived from the file length.
//!
//! Layout (all integers big-endian):
//!
//! | Offset | Size           | Content                       |
//! |--------|----------------|-------------------------------|
//! | 0      | 3200           | Textual header                |
//! | 3200   | 400            | Binary file header            |
//! | 3600   | 3200 * n       | Extended textual headers      |
//! | ...    | 240 + ns * bps | Trace header + samples, each  |

mod fields;
mod text;

pub use fields::{
    join_fields, FieldSelection, HeaderField, HeaderPreset, IndexPreset, Preset,
};
pub use text::{decode_cards, TextEncoding, CARD_WIDTH, TEXT_HEADER_LEN};

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Size of the binary file header
pub const BINARY_HEADER_LEN: usize = 400;

/// Size of each trace header
pub const TRACE_HEADER_LEN: usize = 240;

/// Offset of the first byte after the mandatory file headers
pub const FILE_HEADER_LEN: usize = TEXT_HEADER_LEN + BINARY_HEADER_LEN;

/// Sample encodings from the binary header format code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleFormat {
    IbmFloat32,
    Int32,
    Int16,
    FixedPointGain32,
    IeeeFloat32,
    IeeeFloat64,
    Int24,
    Int8,
    Int64,
    UInt32,
    UInt16,
    UInt64,
    UInt24,
    UInt8,
}

impl SampleFormat {
    /// Map a binary header format code to a sample format
    pub fn from_code(code: i16) -> Option<Self> {
        Some(match code {
            1 => Self::IbmFloat32,
            2 => Self::Int32,
            3 => Self::Int16,
            4 => Self::FixedPointGain32,
            5 => Self::IeeeFloat32,
            6 => Self::IeeeFloat64,
            7 => Self::Int24,
            8 => Self::Int8,
            9 => Self::Int64,
            10 => Self::UInt32,
            11 => Self::UInt16,
            12 => Self::UInt64,
            15 => Self::UInt24,
            16 => Self::UInt8,
            _ => return None,
        })
    }

    /// Bytes occupied by one sample
    pub fn bytes_per_sample(&self) -> u64 {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int24 | Self::UInt24 => 3,
            Self::IbmFloat32
            | Self::Int32
            | Self::FixedPointGain32
            | Self::IeeeFloat32
            | Self::UInt32 => 4,
            Self::IeeeFloat64 | Self::Int64 | Self::UInt64 => 8,
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::IbmFloat32 => "IBM float32",
            Self::Int32 => "int32",
            Self::Int16 => "int16",
            Self::FixedPointGain32 => "fixed-point with gain",
            Self::IeeeFloat32 => "IEEE float32",
            Self::IeeeFloat64 => "IEEE float64",
            Self::Int24 => "int24",
            Self::Int8 => "int8",
            Self::Int64 => "int64",
            Self::UInt32 => "uint32",
            Self::UInt16 => "uint16",
            Self::UInt64 => "uint64",
            Self::UInt24 => "uint24",
            Self::UInt8 => "uint8",
        };
        f.write_str(name)
    }
}

/// Fields of the 400-byte binary file header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinaryHeader {
    pub job_id: i32,
    pub line_number: i32,
    pub reel_number: i32,
    pub traces_per_ensemble: i16,
    pub sample_interval: u16,
    pub samples_per_trace: u16,
    pub format_code: i16,
    pub ensemble_fold: i16,
    pub sorting_code: i16,
    pub measurement_system: i16,
    /// Revision as written: major in the high byte, minor in the low byte
    pub revision: u16,
    pub fixed_length_traces: bool,
    pub extended_headers: i16,
}

impl BinaryHeader {
    /// Parse a 400-byte binary header block
    pub fn parse(block: &[u8]) -> Option<Self> {
        if block.len() < BINARY_HEADER_LEN {
            return None;
        }
        // Offsets below are relative to the start of the binary header.
        let i32_at = |at: usize| i32::from_be_bytes([block[at], block[at + 1], block[at + 2], block[at + 3]]);
        let i16_at = |at: usize| i16::from_be_bytes([block[at], block[at + 1]]);
        let u16_at = |at: usize| u16::from_be_bytes([block[at], block[at + 1]]);

        Some(Self {
            job_id: i32_at(0),
            line_number: i32_at(4),
            reel_number: i32_at(8),
            traces_per_ensemble: i16_at(12),
            sample_interval: u16_at(16),
            samples_per_trace: u16_at(20),
            format_code: i16_at(24),
            ensemble_fold: i16_at(26),
            sorting_code: i16_at(28),
            measurement_system: i16_at(54),
            revision: u16_at(300),
            fixed_length_traces: i16_at(302) != 0,
            extended_headers: i16_at(304),
        })
    }

    /// Sample format, if the code is a known one
    pub fn sample_format(&self) -> Option<SampleFormat> {
        SampleFormat::from_code(self.format_code)
    }

    /// Human-readable trace sorting
    pub fn sorting(&self) -> &'static str {
        match self.sorting_code {
            -1 => "other",
            0 => "unknown",
            1 => "as recorded",
            2 => "CDP ensemble",
            3 => "single fold continuous profile",
            4 => "horizontally stacked",
            5 => "common source point",
            6 => "common receiver point",
            7 => "common offset point",
            8 => "common mid-point",
            9 => "common conversion point",
            _ => "non-standard",
        }
    }

    /// Revision formatted as `major.minor`
    pub fn revision_string(&self) -> String {
        format!("{}.{}", self.revision >> 8, self.revision & 0xFF)
    }
}

/// File-level description of a SEG-Y cube
#[derive(Debug, Clone, Serialize)]
pub struct SegyHeader {
    pub path: PathBuf,
    pub file_size: u64,
    pub encoding: TextEncoding,
    pub textual: Vec<String>,
    pub binary: BinaryHeader,
    pub trace_count: u64,
    /// Values of the requested fields in the first trace header
    pub first_trace: Vec<(HeaderField, i32)>,
}

impl SegyHeader {
    /// Read file-level headers from a SEG-Y file
    ///
    /// `fields` selects which trace header values are reported for the
    /// first trace.
    pub fn read(path: &Path, fields: &[HeaderField]) -> Result<Self> {
        debug!("Reading SEG-Y headers from {}", path.display());

        let mut file = File::open(path)?;
        let file_size = file.metadata()?.len();
        if file_size < FILE_HEADER_LEN as u64 {
            return Err(Error::segy(
                path,
                format!("file is {} bytes, shorter than the {}-byte file header", file_size, FILE_HEADER_LEN),
            ));
        }

        let mut block = vec![0u8; FILE_HEADER_LEN];
        file.read_exact(&mut block)?;

        let (text_block, binary_block) = block.split_at(TEXT_HEADER_LEN);
        let encoding = TextEncoding::detect(text_block);
        let textual = decode_cards(text_block, encoding);
        let binary = BinaryHeader::parse(binary_block)
            .ok_or_else(|| Error::segy(path, "truncated binary header"))?;

        let format = binary.sample_format().ok_or_else(|| {
            Error::segy(path, format!("unsupported sample format code {}", binary.format_code))
        })?;
        if binary.samples_per_trace == 0 {
            return Err(Error::segy(path, "binary header declares zero samples per trace"));
        }
        if binary.extended_headers < 0 {
            return Err(Error::segy(path, "variable number of extended textual headers is not supported"));
        }

        let data_start = FILE_HEADER_LEN as u64 + TEXT_HEADER_LEN as u64 * binary.extended_headers as u64;
        if data_start > file_size {
            return Err(Error::segy(
                path,
                format!("{} extended textual header(s) run past end of file", binary.extended_headers),
            ));
        }

        let trace_len = TRACE_HEADER_LEN as u64 + binary.samples_per_trace as u64 * format.bytes_per_sample();
        let data_len = file_size - data_start;
        let trace_count = data_len / trace_len;
        if data_len % trace_len != 0 {
            warn!(
                "{}: {} trailing byte(s) after {} trace(s); traces may have variable length",
                path.display(),
                data_len % trace_len,
                trace_count
            );
        }

        let mut first_trace = Vec::new();
        if trace_count > 0 && !fields.is_empty() {
            let mut trace_header = [0u8; TRACE_HEADER_LEN];
            file.seek(SeekFrom::Start(data_start))?;
            file.read_exact(&mut trace_header)?;
            first_trace = fields
                .iter()
                .filter_map(|field| field.read(&trace_header).map(|value| (*field, value)))
                .collect();
        }

        Ok(Self {
            path: path.to_path_buf(),
            file_size,
            encoding,
            textual,
            binary,
            trace_count,
            first_trace,
        })
    }

    /// Textual header as printable card lines
    pub fn textual_header(&self) -> String {
        self.textual.join("\n")
    }
}

/// Format bytes as human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

impl fmt::Display for SegyHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = self
            .binary
            .sample_format()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        writeln!(f, "{:<28}{}", "SEG-Y cube:", self.path.display())?;
        writeln!(f, "{:<28}{}", "File size:", format_bytes(self.file_size))?;
        writeln!(f, "{:<28}{}", "Traces:", self.trace_count)?;
        writeln!(f, "{:<28}{}", "Samples per trace:", self.binary.samples_per_trace)?;
        writeln!(
            f,
            "{:<28}{} us ({:.3} ms)",
            "Sample interval:",
            self.binary.sample_interval,
            self.binary.sample_interval as f64 / 1000.0
        )?;
        writeln!(f, "{:<28}{} (code {})", "Sample format:", format, self.binary.format_code)?;
        writeln!(
            f,
            "{:<28}{} (code {})",
            "Trace sorting:",
            self.binary.sorting(),
            self.binary.sorting_code
        )?;
        writeln!(f, "{:<28}{}", "SEG-Y revision:", self.binary.revision_string())?;
        writeln!(f, "{:<28}{}", "Textual header encoding:", self.encoding)?;
        write!(f, "{:<28}{}", "Extended textual headers:", self.binary.extended_headers)?;
        if !self.first_trace.is_empty() {
            let values: Vec<String> = self
                .first_trace
                .iter()
                .map(|(field, value)| format!("{}={}", field, value))
                .collect();
            write!(f, "\n{:<28}{}", "First trace:", values.join(", "))?;
        }
        Ok(())
    }
}
