// src/segy/text.rs

//! Textual (card image) header decoding
//!
//! The textual header is 3200 bytes: 40 cards of 80 columns, written
//! either in EBCDIC (code page 037, the historical default) or ASCII.

use serde::Serialize;
use strum_macros::Display;

/// Size of one textual header block
pub const TEXT_HEADER_LEN: usize = 3200;

/// Columns per card
pub const CARD_WIDTH: usize = 80;

/// EBCDIC (cp037) to ASCII; unprintable code points map to space
const EBCDIC_TO_ASCII: [u8; 256] = [
    0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20,
    0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20,
    0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20,
    0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20,
    0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x2E, 0x3C, 0x28, 0x2B, 0x7C,
    0x26, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x21, 0x24, 0x2A, 0x29, 0x3B, 0x20,
    0x2D, 0x2F, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x2C, 0x25, 0x5F, 0x3E, 0x3F,
    0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x60, 0x3A, 0x23, 0x40, 0x27, 0x3D, 0x22,
    0x20, 0x61, 0x62, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20,
    0x20, 0x6A, 0x6B, 0x6C, 0x6D, 0x6E, 0x6F, 0x70, 0x71, 0x72, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20,
    0x20, 0x7E, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7A, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20,
    0x5E, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x5B, 0x5D, 0x20, 0x20, 0x20, 0x20,
    0x7B, 0x41, 0x42, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20,
    0x7D, 0x4A, 0x4B, 0x4C, 0x4D, 0x4E, 0x4F, 0x50, 0x51, 0x52, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20,
    0x5C, 0x20, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5A, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20,
    0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20,
];

/// Character encoding of a textual header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    #[strum(serialize = "EBCDIC")]
    Ebcdic,
    #[strum(serialize = "ASCII")]
    Ascii,
}

impl TextEncoding {
    /// Guess the encoding of a textual header block
    ///
    /// Cards conventionally start with `C`, which is 0xC3 in EBCDIC and
    /// 0x43 in ASCII. Without that hint, any byte above 0x7F means EBCDIC.
    pub fn detect(block: &[u8]) -> Self {
        match block.first() {
            Some(0xC3) => Self::Ebcdic,
            Some(b'C') => Self::Ascii,
            _ if block.iter().any(|b| *b > 0x7F) => Self::Ebcdic,
            _ => Self::Ascii,
        }
    }
}

/// Decode a textual header block into trimmed 80-column cards
pub fn decode_cards(block: &[u8], encoding: TextEncoding) -> Vec<String> {
    block
        .chunks(CARD_WIDTH)
        .map(|card| {
            let text: String = card
                .iter()
                .map(|b| match encoding {
                    TextEncoding::Ebcdic => EBCDIC_TO_ASCII[*b as usize] as char,
                    TextEncoding::Ascii if b.is_ascii_graphic() => *b as char,
                    TextEncoding::Ascii => ' ',
                })
                .collect();
            text.trim_end().to_string()
        })
        .collect()
}
