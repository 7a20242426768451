//! CLI output formatting for listings and single-file lookups.
//!
//! # Output Format
//!
//! ## List
//!
//! Images are grouped by the directory they live in, with a positional
//! index per directory:
//!
//! ```text
//! ./
//!     001 logo.png  128x128 png  (1.8 KB)
//!     002 icon.svg  svg  (412 B)
//! photos/
//!     001 beach.jpg  4032x3024 jpeg  (2.4 MB)
//!     002 broken.webp  unknown  (96 B)
//!
//! 4 images, 2 with dimensions
//! ```
//!
//! ## Info
//!
//! ```text
//! photos/beach.jpg: 4032x3024 jpeg
//! icon.svg: svg
//! notes.bin: unknown
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::scan::Listing;
use crate::types::ImageDimensions;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `640x480 jpeg`, `svg`, or `unknown`.
fn dimensions_label(dims: &ImageDimensions) -> String {
    match (dims.size(), dims.format()) {
        (Some(size), Some(format)) => format!("{}x{} {}", size.width, size.height, format),
        (Some(size), None) => format!("{}x{}", size.width, size.height),
        (None, Some(format)) => format.to_string(),
        (None, None) => "unknown".to_string(),
    }
}

/// Human-readable byte count with one decimal above 1 KB.
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Directory part of a `/`-separated relative path, as a group header.
fn group_name(rel_path: &str) -> String {
    match rel_path.rsplit_once('/') {
        Some((dir, _)) => format!("{}/", dir),
        None => "./".to_string(),
    }
}

// ============================================================================
// List
// ============================================================================

/// Format a listing grouped by directory.
pub fn format_listing(listing: &Listing) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_group: Option<String> = None;
    let mut position = 0;

    for record in &listing.images {
        let group = group_name(&record.file.path);
        if current_group.as_deref() != Some(group.as_str()) {
            lines.push(group.clone());
            current_group = Some(group);
            position = 0;
        }
        position += 1;
        lines.push(format!(
            "{}{} {}  {}  ({})",
            indent(1),
            format_index(position),
            record.file.name,
            dimensions_label(&record.dimensions),
            format_size(record.file.size)
        ));
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "{} images, {} with dimensions",
        listing.total,
        listing.resolved_count()
    ));
    lines
}

pub fn print_listing(listing: &Listing) {
    for line in format_listing(listing) {
        println!("{}", line);
    }
}

// ============================================================================
// Info
// ============================================================================

/// Format one line per looked-up file.
pub fn format_info<P: AsRef<Path>>(results: &[(P, ImageDimensions)]) -> Vec<String> {
    results
        .iter()
        .map(|(path, dims)| format!("{}: {}", path.as_ref().display(), dimensions_label(dims)))
        .collect()
}

pub fn print_info<P: AsRef<Path>>(results: &[(P, ImageDimensions)]) {
    for line in format_info(results) {
        println!("{}", line);
    }
}
