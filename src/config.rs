//! Export configuration.
//!
//! Handles loading, validating, and merging `embedder.toml`. Stock defaults
//! are overridden by the user's config file, which may in turn be overridden
//! by command-line flags (e.g. `--template`).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! template = "<a href=\"$LARGE_URL\"><img src=\"$SMALL_URL\" ...></a>\n\n"
//!
//! [small]
//! crop = false      # Crop to the exact box (needs both bounds)
//! scale = 1.0       # Pixel density multiplier for the fetched image
//! max_width = 620   # 0 for unconstrained
//! # max_height = 480
//!
//! [large]
//! crop = false
//! scale = 1.0
//! max_width = 1200
//!
//! [processing]
//! max_processes = 4 # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [small]
//! scale = 2.0
//! ```
//!
//! A bound set in the stock defaults survives a sparse override, so clear
//! it with `0`:
//!
//! ```toml
//! [small]
//! max_width = 0     # height-only profile
//! max_height = 300
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::sizing::SizeProfile;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the config directory.
pub const CONFIG_FILE: &str = "embedder.toml";

/// Template used when the user has not configured one.
pub const DEFAULT_TEMPLATE: &str = "<a href=\"$LARGE_URL\"><img src=\"$SMALL_URL\" width=\"$SMALL_WIDTH\" height=\"$SMALL_HEIGHT\" alt=\"$SAFE_TITLE\" title=\"$SAFE_DESCRIPTION\"></a>\n\n";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Export configuration loaded from `embedder.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmbedConfig {
    /// Text expanded once per photo; results are concatenated.
    pub template: String,
    /// Inline image size.
    pub small: SizeProfile,
    /// Linked image size.
    pub large: SizeProfile,
    /// Parallel export settings.
    pub processing: ProcessingConfig,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            small: SizeProfile::max_width(620),
            large: SizeProfile::max_width(1200),
            processing: ProcessingConfig::default(),
        }
    }
}

impl EmbedConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.template.is_empty() {
            return Err(ConfigError::Validation("template must not be empty".into()));
        }
        for (name, profile) in [("small", &self.small), ("large", &self.large)] {
            validate_profile(name, profile)?;
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Check a size profile, whether it came from config or the command line.
///
/// Zero bounds never reach here from TOML; they deserialize as unset.
pub fn validate_profile(name: &str, profile: &SizeProfile) -> Result<(), ConfigError> {
    if !profile.scale.is_finite() || profile.scale <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "{name}.scale must be a positive number"
        )));
    }
    Ok(())
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel export workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// Base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(EmbedConfig::default()).expect("default config must serialize")
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

/// Load `embedder.toml` from a directory as a raw TOML value.
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

/// Apply each overlay in order on top of `base`, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<EmbedConfig, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let config: EmbedConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `embedder.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<EmbedConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// Overlay replacing only the template, for `--template FILE`.
pub fn template_overlay(template: &str) -> toml::Value {
    let mut table = toml::map::Map::new();
    table.insert(
        "template".to_string(),
        toml::Value::String(template.to_string()),
    );
    toml::Value::Table(table)
}

/// Returns a fully-commented stock `embedder.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Embedder Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Template
# ---------------------------------------------------------------------------
# Expanded once per selected photo; the results are concatenated in
# selection order. Placeholders are matched case-insensitively:
#
#   $TITLE $DESCRIPTION $CREDIT $LICENSE          feed metadata, verbatim
#   $SAFE_TITLE $SAFE_DESCRIPTION $SAFE_CREDIT    HTML-escaped copies
#   $EXPOSURE $FLASH $FOCALLENGTH $FSTOP $ISO     EXIF
#   $MAKE $MODEL $TIME $UNIQUEID
#   $BYTES $TIMESTAMP $VERSION $WIDTH $HEIGHT     host data
#   $DOWNLOAD $THUMB                              original URLs
#   $PUBLISHED_ISO8601 $PUBLISHED_YYYY-MM-DD      dates
#   $UPDATED_ISO8601 $UPDATED_YYYY-MM-DD
#   $SMALL_URL $SMALL_WIDTH $SMALL_HEIGHT         planned sizes
#   $LARGE_URL $LARGE_WIDTH $LARGE_HEIGHT
template = "<a href=\"$LARGE_URL\"><img src=\"$SMALL_URL\" width=\"$SMALL_WIDTH\" height=\"$SMALL_HEIGHT\" alt=\"$SAFE_TITLE\" title=\"$SAFE_DESCRIPTION\"></a>\n\n"

# ---------------------------------------------------------------------------
# Small size (inline image)
# ---------------------------------------------------------------------------
[small]
# Crop to exactly max_width x max_height. Only applies when both are set.
crop = false

# Multiplier for the fetched pixels (e.g. 2.0 for high-density screens).
# The width/height placeholders keep the unscaled display size.
scale = 1.0

# Maximum display size. Set a bound to 0 to leave it unconstrained; set
# both to 0 to embed the original upload.
max_width = 620
# max_height = 480

# ---------------------------------------------------------------------------
# Large size (linked image)
# ---------------------------------------------------------------------------
[large]
crop = false
scale = 1.0
max_width = 1200
# max_height = 1200

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel export workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
