//! # img-preview
//!
//! Scans a directory tree for images and reports each file's pixel
//! dimensions, read from its header alone. The listing feeds a browser
//! gallery; this crate is the part that touches bytes.
//!
//! # How dimensions are found
//!
//! ```text
//! path ──► byte window (first 64 KiB) ──► parser for the extension ──┐
//!                                              │ miss                 │ hit
//!                                              ▼                      ▼
//!                                   sweep PNG, JPEG, GIF, BMP, WebP ─► ImageDimensions
//!                                              │ miss
//!                                              ▼
//!                                   {width: null, height: null, format: null}
//! ```
//!
//! `.svg` files skip all of this and are tagged `svg` from the extension.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `ImageFormat`, `Dimensions`, `ImageDimensions` |
//! | [`imaging`] | Byte windows, signature detection, per-format parsers, resolution policy |
//! | [`metadata`] | Per-file facade that never fails, plus the concurrent batch map |
//! | [`scan`] | Directory walk and listing records |
//! | [`config`] | `img-preview.toml` loading, merging, and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Headers Only
//!
//! No pixel data is decoded and no image library is linked. Every supported
//! format stores its size in the first few dozen bytes, except JPEG, whose
//! frame header follows a variable run of marker segments. A bounded window
//! keeps memory flat when a directory holds very large files. The price is
//! that a JPEG with more than 64 KiB of metadata before its frame header
//! reports unknown dimensions; raise `window_size` if that matters.
//!
//! ## Content Beats Extension
//!
//! The extension only picks which parser runs first. If it misses, every
//! parser gets a turn, so a mislabeled or extensionless file still resolves,
//! and the reported format reflects the bytes.
//!
//! ## Failures Stay Local
//!
//! Parsers return `Option`; the facade returns a plain value. A vanished
//! file or a corrupt header degrades that one record to unknown dimensions
//! and the rest of the listing is unaffected.

pub mod config;
pub mod imaging;
pub mod metadata;
pub mod output;
pub mod scan;
pub mod types;

pub use metadata::{MetadataReader, image_dimensions};
pub use types::{Dimensions, ImageDimensions, ImageFormat};

#[cfg(test)]
pub(crate) mod test_helpers;
