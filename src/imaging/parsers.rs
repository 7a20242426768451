//! Header-only dimension parsers for PNG, JPEG, GIF, BMP and WebP.
//!
//! Each parser takes the leading bytes of a file and returns the pixel size,
//! or `None` when the buffer is not that format or is too short or malformed
//! to read. `None` is never an error here: the resolution policy treats it as
//! "try the next parser".
//!
//! All offsets go through [`super::bytes`], so a truncated header yields
//! `None` instead of a panic.
//!
//! | Format | Where the size lives |
//! |--------|----------------------|
//! | PNG  | IHDR: `u32` BE at 16 (width) and 20 (height) |
//! | JPEG | first SOF segment: `u16` BE at marker+5 (height), marker+7 (width) |
//! | GIF  | Logical Screen Descriptor: `u16` LE at 6 and 8 |
//! | BMP  | `i32` LE at 18 and 22; negative height means top-down rows |
//! | WebP | `VP8 `: 14-bit LE fields at 26/28; `VP8L`: packed `u32` LE at 21 |

use super::bytes;
use super::signature::{self, Signature};
use crate::types::{Dimensions, ImageFormat};

/// One entry in the parser registry.
#[derive(Debug)]
pub struct FormatParser {
    pub signature: &'static Signature,
    parse: fn(&[u8]) -> Option<Dimensions>,
}

impl FormatParser {
    pub fn format(&self) -> ImageFormat {
        self.signature.format
    }

    pub fn parse(&self, data: &[u8]) -> Option<Dimensions> {
        (self.parse)(data)
    }
}

/// Parsers in fallback order. Adding a format means adding an entry here.
pub static PARSERS: [FormatParser; 5] = [
    FormatParser {
        signature: &signature::PNG,
        parse: png,
    },
    FormatParser {
        signature: &signature::JPEG,
        parse: jpeg,
    },
    FormatParser {
        signature: &signature::GIF,
        parse: gif,
    },
    FormatParser {
        signature: &signature::BMP,
        parse: bmp,
    },
    FormatParser {
        signature: &signature::WEBP,
        parse: webp,
    },
];

/// The parser registered for `format`, if it has one (SVG does not).
pub fn parser_for(format: ImageFormat) -> Option<&'static FormatParser> {
    PARSERS.iter().find(|p| p.format() == format)
}

// ---------------------------------------------------------------------------
// PNG
// ---------------------------------------------------------------------------

/// IHDR is always the first chunk, so the size sits at fixed offsets.
pub fn png(data: &[u8]) -> Option<Dimensions> {
    if !signature::PNG.matches(data) {
        return None;
    }
    let width = bytes::u32_be(data, 16)?;
    let height = bytes::u32_be(data, 20)?;
    Some(Dimensions::new(width, height))
}

// ---------------------------------------------------------------------------
// JPEG
// ---------------------------------------------------------------------------

/// SOF0-3, SOF5-7, SOF9-11, SOF13-15. C4 (DHT), C8 (JPG) and CC (DAC) share
/// the range but are not frame headers.
fn is_start_of_frame(marker: u8) -> bool {
    matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF)
}

/// Walk marker segments from offset 2 until the first SOF.
///
/// Every marker other than padding, fill and SOF is treated as a segment
/// with a 2-byte length, EOI and RST included. Returns `None` if the window
/// runs out first or a segment length points past the buffer.
pub fn jpeg(data: &[u8]) -> Option<Dimensions> {
    if !signature::JPEG.matches(data) {
        return None;
    }

    let mut pos = 2;
    while pos + 1 < data.len() {
        if data[pos] != 0xFF {
            pos += 1;
            continue;
        }

        let marker = data[pos + 1];
        match marker {
            // Stuffed zero / padding
            0x00 => pos += 2,
            // Fill byte before a marker
            0xFF => pos += 1,
            m if is_start_of_frame(m) => {
                let height = bytes::u16_be(data, pos + 5)?;
                let width = bytes::u16_be(data, pos + 7)?;
                return Some(Dimensions::new(u32::from(width), u32::from(height)));
            }
            _ => {
                let length = usize::from(bytes::u16_be(data, pos + 2)?);
                let next = pos + 2 + length;
                if next > data.len() {
                    return None;
                }
                pos = next;
            }
        }
    }

    None
}

// ---------------------------------------------------------------------------
// GIF
// ---------------------------------------------------------------------------

pub fn gif(data: &[u8]) -> Option<Dimensions> {
    if !signature::GIF.matches(data) {
        return None;
    }
    let width = bytes::u16_le(data, 6)?;
    let height = bytes::u16_le(data, 8)?;
    Some(Dimensions::new(u32::from(width), u32::from(height)))
}

// ---------------------------------------------------------------------------
// BMP
// ---------------------------------------------------------------------------

/// A negative stored height flags top-down row order; the magnitude is the
/// height. A negative width has no such meaning and is rejected.
pub fn bmp(data: &[u8]) -> Option<Dimensions> {
    if !signature::BMP.matches(data) {
        return None;
    }
    let width = u32::try_from(bytes::i32_le(data, 18)?).ok()?;
    let height = bytes::i32_le(data, 22)?.unsigned_abs();
    Some(Dimensions::new(width, height))
}

// ---------------------------------------------------------------------------
// WebP
// ---------------------------------------------------------------------------

const VP8_SIZE_MASK: u16 = 0x3FFF;
const VP8L_FIELD_BITS: u32 = 14;
const VP8L_FIELD_MASK: u32 = (1 << VP8L_FIELD_BITS) - 1;

/// Simple lossy (`VP8 `) and lossless (`VP8L`) containers only. Extended
/// `VP8X` files need a chunk walk and come back as `None`.
pub fn webp(data: &[u8]) -> Option<Dimensions> {
    if !signature::WEBP.matches(data) {
        return None;
    }

    if bytes::has_tag(data, 12, b"VP8 ") {
        // The top two bits of each field are the scale code.
        let width = bytes::u16_le(data, 26)? & VP8_SIZE_MASK;
        let height = bytes::u16_le(data, 28)? & VP8_SIZE_MASK;
        return Some(Dimensions::new(u32::from(width), u32::from(height)));
    }

    if bytes::has_tag(data, 12, b"VP8L") {
        // Byte 20 is the 0x2F signature; the next 28 bits hold width-1 then height-1.
        let bits = bytes::u32_le(data, 21)?;
        let width = (bits & VP8L_FIELD_MASK) + 1;
        let height = ((bits >> VP8L_FIELD_BITS) & VP8L_FIELD_MASK) + 1;
        return Some(Dimensions::new(width, height));
    }

    None
}
