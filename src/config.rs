//! Scan configuration.
//!
//! Handles loading, validating, and merging `img-preview.toml`. Stock defaults
//! are overridden by an optional config file in the scanned directory, and
//! CLI flags override both.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! window_size = 65536        # Bytes read from the start of each file
//! skip_dirs = ["node_modules"]
//! extensions = ["jpg", "jpeg", "png", "gif", "bmp", "webp", "svg"]
//!
//! [processing]
//! max_threads = 4            # Max parallel header reads (omit for auto = CPU cores)
//! ```
//!
//! Hidden directories (names starting with `.`) are always skipped.
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::imaging::DEFAULT_WINDOW_SIZE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the scanned root.
pub const CONFIG_FILE: &str = "img-preview.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Scan configuration loaded from `img-preview.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Number of leading bytes read from each image.
    pub window_size: usize,
    /// Directory names never descended into.
    pub skip_dirs: Vec<String>,
    /// Recognized image extensions, without the dot. Matched case-insensitively.
    pub extensions: Vec<String>,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            skip_dirs: vec!["node_modules".to_string()],
            extensions: ["jpg", "jpeg", "png", "gif", "bmp", "webp", "svg"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl ScanConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::Validation(
                "window_size must be greater than 0".into(),
            ));
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "extensions must not be empty".into(),
            ));
        }
        if let Some(ext) = self.extensions.iter().find(|e| e.starts_with('.')) {
            return Err(ConfigError::Validation(format!(
                "extensions are listed without the dot, got {ext:?}"
            )));
        }
        if self.processing.max_threads == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_threads must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Whether `ext` (no dot, any case) is a recognized image extension.
    pub fn is_image_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    pub fn is_skipped_dir(&self, name: &str) -> bool {
        name.starts_with('.') || self.skip_dirs.iter().any(|d| d == name)
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel header reads.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_threads: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_threads.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(ScanConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults do not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `img-preview.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no config file.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ScanConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ScanConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config for a scan root, falling back to stock defaults.
pub fn load_config(root: &Path) -> Result<ScanConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `img-preview.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# img-preview configuration
# =========================
#
# Place this file as `img-preview.toml` in the directory you scan.
# Every key is optional; anything omitted uses the value shown here.

# Bytes read from the start of each image to find its dimensions.
# Larger windows help JPEGs with big metadata blocks before the frame header.
window_size = 65536

# Directory names that are never scanned. Hidden directories (starting
# with ".") are always skipped.
skip_dirs = ["node_modules"]

# File extensions treated as images (case-insensitive, no dot).
extensions = ["jpg", "jpeg", "png", "gif", "bmp", "webp", "svg"]

[processing]
# Maximum parallel header reads. Omit for one per CPU core; larger values
# are clamped to the core count.
# max_threads = 4
"##
}
