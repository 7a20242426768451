//! Shared test utilities: synthetic image headers and on-disk fixtures.
//!
//! Headers are built byte-by-byte so every test states exactly what the
//! parsers see. Only the fields the parsers read are meaningful; the rest is
//! plausible filler.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let path = write_file(tmp.path(), "photo.jpg", &jpeg_bytes(640, 480));
//! ```

use std::path::{Path, PathBuf};

pub use tempfile::TempDir;

// =========================================================================
// Synthetic headers
// =========================================================================

/// PNG signature plus an IHDR chunk.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    data.extend_from_slice(&13u32.to_be_bytes());
    data.extend_from_slice(b"IHDR");
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    // bit depth, colour type, compression, filter, interlace, CRC
    data.extend_from_slice(&[8, 6, 0, 0, 0]);
    data.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
    data
}

/// A JFIF APP0 segment.
pub fn jpeg_app0_segment() -> Vec<u8> {
    let mut seg = vec![0xFF, 0xE0, 0x00, 0x10];
    seg.extend_from_slice(b"JFIF\0");
    seg.extend_from_slice(&[0x01, 0x01, 0x00, 0x00, 0x48, 0x00, 0x48, 0x00, 0x00]);
    seg
}

/// A three-component frame header with the given SOF marker.
pub fn jpeg_sof_segment(marker: u8, width: u16, height: u16) -> Vec<u8> {
    let mut seg = vec![0xFF, marker, 0x00, 0x11, 0x08];
    seg.extend_from_slice(&height.to_be_bytes());
    seg.extend_from_slice(&width.to_be_bytes());
    seg.push(0x03);
    for id in 1..=3u8 {
        seg.extend_from_slice(&[id, 0x11, 0x00]);
    }
    seg
}

/// SOI, APP0, then a frame header using `marker`.
pub fn jpeg_with_sof(marker: u8, width: u16, height: u16) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8];
    data.extend(jpeg_app0_segment());
    data.extend(jpeg_sof_segment(marker, width, height));
    data
}

/// Baseline JPEG header: SOI, APP0, SOF0, start of scan.
pub fn jpeg_bytes(width: u16, height: u16) -> Vec<u8> {
    let mut data = jpeg_with_sof(0xC0, width, height);
    data.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x0C, 0x03, 0x01, 0x00, 0x02, 0x11, 0x03, 0x11]);
    data.extend_from_slice(&[0x00, 0x3F, 0x00]);
    data.extend_from_slice(&[0x12, 0x34, 0xFF, 0x00, 0x56]);
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}

/// GIF89a header plus Logical Screen Descriptor.
pub fn gif_bytes(width: u16, height: u16) -> Vec<u8> {
    let mut data = b"GIF89a".to_vec();
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&height.to_le_bytes());
    data.extend_from_slice(&[0xF7, 0x00, 0x00]);
    data
}

/// BITMAPFILEHEADER plus the start of a BITMAPINFOHEADER.
///
/// Pass a negative height for a top-down bitmap.
pub fn bmp_bytes(width: i32, height: i32) -> Vec<u8> {
    let mut data = b"BM".to_vec();
    data.extend_from_slice(&1024u32.to_le_bytes()); // file size
    data.extend_from_slice(&[0, 0, 0, 0]); // reserved
    data.extend_from_slice(&54u32.to_le_bytes()); // pixel data offset
    data.extend_from_slice(&40u32.to_le_bytes()); // info header size
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&height.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes()); // planes
    data.extend_from_slice(&24u16.to_le_bytes()); // bits per pixel
    data
}

fn riff_webp(chunk: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut data = b"RIFF".to_vec();
    data.extend_from_slice(&((payload.len() as u32) + 12).to_le_bytes());
    data.extend_from_slice(b"WEBP");
    data.extend_from_slice(chunk);
    data.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    data.extend_from_slice(payload);
    data
}

/// Lossy WebP: `VP8 ` chunk with a key-frame header.
pub fn webp_vp8_bytes(width: u16, height: u16) -> Vec<u8> {
    let mut payload = vec![0x30, 0x01, 0x00]; // frame tag
    payload.extend_from_slice(&[0x9D, 0x01, 0x2A]); // start code
    payload.extend_from_slice(&width.to_le_bytes());
    payload.extend_from_slice(&height.to_le_bytes());
    payload.extend_from_slice(&[0x00, 0x00]);
    riff_webp(b"VP8 ", &payload)
}

/// Lossless WebP: `VP8L` chunk with the packed size field.
pub fn webp_vp8l_bytes(width: u32, height: u32) -> Vec<u8> {
    let bits = (width - 1) | ((height - 1) << 14);
    let mut payload = vec![0x2F];
    payload.extend_from_slice(&bits.to_le_bytes());
    payload.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00]);
    riff_webp(b"VP8L", &payload)
}

/// Deterministic bytes that match no signature.
pub fn noise_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| ((i * 37 + 11) % 251) as u8).collect()
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Write `bytes` to `dir/name`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn synthetic_headers_meet_minimum_lengths() {
    assert!(png_bytes(1, 1).len() >= 24);
    assert!(jpeg_bytes(1, 1).len() >= 4);
    assert!(gif_bytes(1, 1).len() >= 10);
    assert!(bmp_bytes(1, 1).len() >= 26);
    assert!(webp_vp8_bytes(1, 1).len() >= 30);
    assert!(webp_vp8l_bytes(1, 1).len() >= 30);
}
