//! Directory scanning and listing assembly.
//!
//! Walks a directory tree for image files and pairs each one with the
//! dimensions recovered from its header. The result is the JSON document the
//! gallery front-end consumes:
//!
//! ```text
//! {
//!   "dir": "/home/me/assets",
//!   "total": 2,
//!   "images": [
//!     { "name": "logo.png", "path": "brand/logo.png", "url": "/images/brand%2Flogo.png",
//!       "mime": "image/png", "size": 1834, "modified": 1718000000,
//!       "width": 128, "height": 128, "format": "png" },
//!     { "name": "icon.svg", "path": "icon.svg", ..., "width": null, "height": null, "format": "svg" }
//!   ]
//! }
//! ```
//!
//! ## Walk rules
//!
//! - Hidden directories (`.git`, `.cache`, ...) and the configured
//!   `skip_dirs` are never entered.
//! - Only regular files with a configured image extension are kept.
//! - Symlinked files and directories are followed; a link loop is logged
//!   and skipped.
//! - Entries are sorted by relative path, so output is stable between runs.
//!
//! ## Failure policy
//!
//! A missing or non-directory root is an error. Anything that goes wrong
//! below the root (an unreadable subdirectory, a file that vanishes between
//! the walk and its header read) is logged and skipped or reported as
//! unknown dimensions; one bad file never fails the listing.

use crate::config::{ScanConfig, effective_threads};
use crate::metadata::MetadataReader;
use crate::types::{ImageDimensions, ImageFormat};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// An image file found by the walk, before its header is read.
#[derive(Debug, Clone, Serialize)]
pub struct ImageFile {
    /// File name with extension.
    pub name: String,
    /// Path relative to the scan root, always with `/` separators.
    pub path: String,
    #[serde(skip)]
    pub full_path: PathBuf,
    /// Lower-cased extension without the dot.
    #[serde(skip)]
    pub extension: String,
    /// Size in bytes.
    pub size: u64,
    /// Modification time, seconds since the UNIX epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<u64>,
}

impl ImageFile {
    pub fn format_hint(&self) -> Option<ImageFormat> {
        ImageFormat::from_extension(&self.extension)
    }

    /// URL the gallery fetches the raw bytes from.
    pub fn url(&self) -> String {
        format!("/images/{}", urlencoding::encode(&self.path))
    }

    pub fn mime_type(&self) -> &'static str {
        self.format_hint()
            .map(ImageFormat::mime_type)
            .unwrap_or("application/octet-stream")
    }
}

/// One listing entry: file facts plus header-derived dimensions.
#[derive(Debug, Clone, Serialize)]
pub struct ImageRecord {
    #[serde(flatten)]
    pub file: ImageFile,
    pub url: String,
    pub mime: &'static str,
    #[serde(flatten)]
    pub dimensions: ImageDimensions,
}

/// Full listing of a scan root.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub dir: PathBuf,
    pub total: usize,
    pub images: Vec<ImageRecord>,
}

impl Listing {
    /// Number of records with a recovered pixel size.
    pub fn resolved_count(&self) -> usize {
        self.images
            .iter()
            .filter(|r| r.dimensions.size().is_some())
            .count()
    }
}

fn check_root(root: &Path) -> Result<(), ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }
    Ok(())
}

/// Walk `root` and return every image file, sorted by relative path.
pub fn collect_images(root: &Path, config: &ScanConfig) -> Result<Vec<ImageFile>, ScanError> {
    check_root(root)?;

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            let skip = config.is_skipped_dir(&name);
            if skip {
                debug!(dir = %entry.path().display(), "skipping directory");
            }
            !skip
        });

    let mut images = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "cannot read directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let extension = entry
            .path()
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !config.is_image_extension(&extension) {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                warn!(path = %entry.path().display(), error = %e, "cannot stat file");
                continue;
            }
        };
        let modified = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs());

        let rel_path = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let path = rel_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        images.push(ImageFile {
            name: entry.file_name().to_string_lossy().to_string(),
            path,
            full_path: entry.path().to_path_buf(),
            extension,
            size: metadata.len(),
            modified,
        });
    }

    images.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(images)
}

/// Read header dimensions for every file concurrently and merge them into
/// listing records, preserving input order.
pub fn describe(files: Vec<ImageFile>, config: &ScanConfig) -> Result<Vec<ImageRecord>, ScanError> {
    let facade = MetadataReader::new().window_size(config.window_size);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(effective_threads(&config.processing))
        .build()?;

    let dimensions = pool.install(|| {
        use rayon::prelude::*;
        files
            .par_iter()
            .map(|f| facade.dimensions_with_hint(&f.full_path, f.format_hint()))
            .collect::<Vec<_>>()
    });

    Ok(files
        .into_iter()
        .zip(dimensions)
        .map(|(file, dimensions)| ImageRecord {
            url: file.url(),
            mime: file.mime_type(),
            file,
            dimensions,
        })
        .collect())
}

/// Scan `root` into a complete [`Listing`].
pub fn list(root: &Path, config: &ScanConfig) -> Result<Listing, ScanError> {
    let files = collect_images(root, config)?;
    let images = describe(files, config)?;
    let listing = Listing {
        dir: root.to_path_buf(),
        total: images.len(),
        images,
    };
    info!(
        dir = %root.display(),
        total = listing.total,
        resolved = listing.resolved_count(),
        "scan complete"
    );
    Ok(listing)
}
