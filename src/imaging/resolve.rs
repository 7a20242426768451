//! Dimension resolution policy: extension first, then a content sweep.
//!
//! 1. If the extension names a parser, run it alone. A hit is final.
//! 2. Otherwise (no extension parser, or it missed) try the remaining
//!    parsers in registry order: PNG, JPEG, GIF, BMP, WebP.
//! 3. If nothing matches, the result is all-unknown.
//!
//! The reported format is the one whose parser succeeded, so a `.png` file
//! holding JPEG bytes comes back as `jpeg`.

use super::parsers::{self, PARSERS};
use super::window::WindowReader;
use crate::types::{ImageDimensions, ImageFormat};
use std::io;
use std::path::Path;
use tracing::debug;

/// Resolve dimensions from an in-memory header buffer.
pub fn resolve(data: &[u8], hint: Option<ImageFormat>) -> ImageDimensions {
    let preferred = hint.and_then(parsers::parser_for);

    if let Some(parser) = preferred {
        if let Some(size) = parser.parse(data) {
            return ImageDimensions::parsed(size, parser.format());
        }
        debug!(
            expected = %parser.format(),
            "extension parser missed, sweeping all formats"
        );
    }

    PARSERS
        .iter()
        .filter(|p| preferred.is_none_or(|pref| pref.format() != p.format()))
        .find_map(|p| p.parse(data).map(|size| ImageDimensions::parsed(size, p.format())))
        .unwrap_or_default()
}

/// Read the byte window for `path` and resolve it.
///
/// I/O errors are returned to the caller; the metadata facade is the layer
/// that absorbs them.
pub fn resolve_file<R: WindowReader + ?Sized>(
    reader: &R,
    path: &Path,
    hint: Option<ImageFormat>,
    window_size: usize,
) -> io::Result<ImageDimensions> {
    let window = reader.read_window(path, window_size)?;
    Ok(resolve(&window, hint))
}
