// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use segyconv::config::ConverterConfig;
use std::fs;
use std::path::{Path, PathBuf};

const BINARY_HEADER_LEN: usize = 400;
const TRACE_HEADER_LEN: usize = 240;

/// Write a small IEEE float32 SEG-Y cube with an ASCII textual header.
///
/// Trace `t` carries inline `100 + t` and crossline `300`.
pub fn write_cube(path: &Path, traces: u32, samples: u16) {
    let mut data = Vec::new();
    for i in 1..=40 {
        data.extend_from_slice(format!("{:<80}", format!("C{:>2} INTEGRATION CUBE", i)).as_bytes());
    }

    let mut binary = [0u8; BINARY_HEADER_LEN];
    binary[16..18].copy_from_slice(&4000u16.to_be_bytes());
    binary[20..22].copy_from_slice(&samples.to_be_bytes());
    binary[24..26].copy_from_slice(&5i16.to_be_bytes());
    binary[28..30].copy_from_slice(&2i16.to_be_bytes());
    data.extend_from_slice(&binary);

    for t in 0..traces {
        let mut header = [0u8; TRACE_HEADER_LEN];
        header[188..192].copy_from_slice(&(100 + t as i32).to_be_bytes());
        header[192..196].copy_from_slice(&300i32.to_be_bytes());
        data.extend_from_slice(&header);
        data.extend(std::iter::repeat_n(0u8, samples as usize * 4));
    }

    fs::write(path, data).unwrap();
}

/// Create `names` as small cubes under `dir`, returning their paths.
pub fn write_cubes(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            write_cube(&path, 4, 16);
            path
        })
        .collect()
}

/// Converter settings whose "conversion" copies the source to the destination.
pub fn copy_converter() -> ConverterConfig {
    ConverterConfig {
        program: Some("sh".to_string()),
        args: ["-c", "cp \"$1\" \"$2\"", "convert", "{src}", "{dst}"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        quantize_args: Vec::new(),
        renderer: None,
    }
}

/// Converter settings that append one line per invocation to `log`
/// before copying, so tests can count and inspect converter calls.
pub fn logging_converter(log: &Path) -> ConverterConfig {
    let script = format!(
        "echo \"$@\" >> '{}'; cp \"$1\" \"$2\"",
        log.display()
    );
    ConverterConfig {
        program: Some("sh".to_string()),
        args: vec![
            "-c".to_string(),
            script,
            "convert".to_string(),
            "{src}".to_string(),
            "{dst}".to_string(),
            "{format}".to_string(),
        ],
        quantize_args: vec!["quantized".to_string()],
        renderer: None,
    }
}

/// Lines written by [`logging_converter`], empty if it never ran.
pub fn converter_calls(log: &Path) -> Vec<String> {
    fs::read_to_string(log)
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}
