//! Per-file image metadata: the entry point the listing calls.
//!
//! ## Contract
//!
//! [`MetadataReader::dimensions`] always returns an [`ImageDimensions`]. Any
//! failure (an unreadable path or an unrecognized or truncated header)
//! collapses into `{width: null, height: null, format: null}` for that one
//! file.
//!
//! ## SVG
//!
//! Vector images have no fixed pixel size. A `.svg` path is tagged
//! `format: "svg"` straight from its extension, without reading the file.
//!
//! ## Batches
//!
//! [`MetadataReader::dimensions_all`] maps the facade over many files with
//! rayon. Calls share nothing mutable, so one bad file only affects its own
//! slot and the batch always completes. Output order matches input order.

use crate::imaging::resolve::resolve_file;
use crate::imaging::window::{DEFAULT_WINDOW_SIZE, FsReader, WindowReader};
use crate::types::{ImageDimensions, ImageFormat};
use rayon::prelude::*;
use std::path::Path;
use tracing::debug;

/// Lower-cased extension of `path` mapped to a format, if known.
pub fn format_hint(path: &Path) -> Option<ImageFormat> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(ImageFormat::from_extension)
}

/// Metadata facade over a [`WindowReader`].
#[derive(Debug, Clone)]
pub struct MetadataReader<R = FsReader> {
    reader: R,
    window_size: usize,
}

impl MetadataReader<FsReader> {
    pub fn new() -> Self {
        Self::with_reader(FsReader, DEFAULT_WINDOW_SIZE)
    }
}

impl Default for MetadataReader<FsReader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: WindowReader> MetadataReader<R> {
    pub fn with_reader(reader: R, window_size: usize) -> Self {
        Self {
            reader,
            window_size,
        }
    }

    /// Set the byte-window size used for every read.
    pub fn window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Dimensions of one file, hinted by its own extension.
    pub fn dimensions(&self, path: &Path) -> ImageDimensions {
        self.dimensions_with_hint(path, format_hint(path))
    }

    /// Dimensions of one file with an explicit format hint (the walker has
    /// usually classified the extension already).
    pub fn dimensions_with_hint(&self, path: &Path, hint: Option<ImageFormat>) -> ImageDimensions {
        if hint == Some(ImageFormat::Svg) {
            return ImageDimensions::tagged(ImageFormat::Svg);
        }

        match resolve_file(&self.reader, path, hint, self.window_size) {
            Ok(dims) => dims,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "could not read image header");
                ImageDimensions::unknown()
            }
        }
    }

    /// Dimensions of many files, concurrently, in input order.
    pub fn dimensions_all<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Vec<ImageDimensions> {
        paths
            .par_iter()
            .map(|p| self.dimensions(p.as_ref()))
            .collect()
    }
}

/// One-shot convenience: default window, real filesystem.
pub fn image_dimensions(path: &Path) -> ImageDimensions {
    MetadataReader::new().dimensions(path)
}
