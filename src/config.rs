//! Run configuration.
//!
//! Handles loading, validating, and merging `thumbs.toml`. Stock defaults are
//! the base layer; a user file overrides just the keys it names; command-line
//! flags override both.
//!
//! ## Config File Location
//!
//! `thumbs.toml` in the working directory is picked up automatically. Any
//! other file can be passed with `--config`.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! source_dir = "static/gallery"        # Images to thumbnail (not recursive)
//! output_dir = "static/gallery_thumb"  # Created if missing
//! verbose = false                      # Report skipped files, pause at the end
//!
//! [thumbnail]
//! size = [400, 400]                    # Exact output width, height
//! format = "JPEG"                      # Codec name; "" infers from the file name
//! quality = 90                         # JPEG/AVIF quality (1-100)
//! filter = "catmullrom"                # nearest | triangle | catmullrom | gaussian | lanczos3
//! # name_template = "{stem}_thumb.{ext}"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{Dimensions, OutputFormat, Quality, ResampleFilter};
use crate::naming::Naming;
use crate::process::TargetSpec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "thumbs.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `thumbs.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbsConfig {
    /// Directory whose top-level files are turned into thumbnails.
    pub source_dir: PathBuf,
    /// Directory thumbnails are written to.
    pub output_dir: PathBuf,
    /// Print skipped files and wait for Enter at the end of a run.
    pub verbose: bool,
    pub thumbnail: ThumbnailConfig,
}

impl Default for ThumbsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("static/gallery"),
            output_dir: PathBuf::from("static/gallery_thumb"),
            verbose: false,
            thumbnail: ThumbnailConfig::default(),
        }
    }
}

/// Thumbnail shape and encoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailConfig {
    /// Exact output size as `[width, height]`.
    pub size: [u32; 2],
    /// Codec name (`JPEG`, `PNG`, `WEBP`, ...). Also the default extension.
    pub format: String,
    /// Lossy encoding quality (1 = worst, 100 = best).
    pub quality: u32,
    pub filter: ResampleFilter,
    /// Output name pattern with `{name}`, `{stem}` and `{ext}` placeholders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_template: Option<String>,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            size: [400, 400],
            format: "JPEG".to_string(),
            quality: 90,
            filter: ResampleFilter::default(),
            name_template: None,
        }
    }
}

impl ThumbsConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnail.size[0] == 0 || self.thumbnail.size[1] == 0 {
            return Err(ConfigError::Validation(
                "thumbnail.size values must be non-zero".into(),
            ));
        }
        if OutputFormat::parse(&self.thumbnail.format).is_none() {
            return Err(ConfigError::Validation(format!(
                "thumbnail.format \"{}\" is not a writable image format",
                self.thumbnail.format
            )));
        }
        if !(1..=100).contains(&self.thumbnail.quality) {
            return Err(ConfigError::Validation(
                "thumbnail.quality must be 1-100".into(),
            ));
        }
        if let Some(template) = &self.thumbnail.name_template {
            if template.is_empty() {
                return Err(ConfigError::Validation(
                    "thumbnail.name_template must not be empty".into(),
                ));
            }
            if template.contains(['/', '\\']) {
                return Err(ConfigError::Validation(
                    "thumbnail.name_template must not contain path separators".into(),
                ));
            }
        }
        Ok(())
    }

    /// Validate and freeze into the spec a run executes.
    pub fn to_target_spec(&self) -> Result<TargetSpec, ConfigError> {
        self.validate()?;
        let format = OutputFormat::parse(&self.thumbnail.format).ok_or_else(|| {
            ConfigError::Validation(format!("unknown format {}", self.thumbnail.format))
        })?;
        let naming = match &self.thumbnail.name_template {
            Some(template) => Naming::Template(template.clone()),
            None => Naming::Default,
        };
        Ok(TargetSpec {
            source_dir: self.source_dir.clone(),
            output_dir: self.output_dir.clone(),
            size: Dimensions::new(self.thumbnail.size[0], self.thumbnail.size[1]),
            format,
            quality: Quality::new(self.thumbnail.quality),
            filter: self.thumbnail.filter,
            naming,
            verbose: self.verbose,
        })
    }
}

/// Values given on the command line. `None` leaves the config value alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub source_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub format: Option<String>,
    pub name_template: Option<String>,
    /// Only ever switches verbosity on.
    pub verbose: bool,
}

impl ThumbsConfig {
    /// Layer command-line values on top. Call [`ThumbsConfig::validate`]
    /// (or [`ThumbsConfig::to_target_spec`]) afterwards.
    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(dir) = overrides.source_dir {
            self.source_dir = dir;
        }
        if let Some(dir) = overrides.output_dir {
            self.output_dir = dir;
        }
        if let Some(width) = overrides.width {
            self.thumbnail.size[0] = width;
        }
        if let Some(height) = overrides.height {
            self.thumbnail.size[1] = height;
        }
        if let Some(format) = overrides.format {
            self.thumbnail.format = format;
        }
        if overrides.name_template.is_some() {
            self.thumbnail.name_template = overrides.name_template;
        }
        self.verbose |= overrides.verbose;
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(ThumbsConfig::default())?)
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

/// Merge an optional overlay onto the stock defaults, then deserialize and
/// validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<ThumbsConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ThumbsConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

fn read_toml(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load `thumbs.toml` from a directory, falling back to stock defaults when
/// the file does not exist.
pub fn load_config(dir: &Path) -> Result<ThumbsConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    let overlay = if path.exists() {
        Some(read_toml(&path)?)
    } else {
        None
    };
    resolve_config(overlay)
}

/// Load an explicitly named config file. Unlike [`load_config`], a missing
/// file is an error.
pub fn load_config_file(path: &Path) -> Result<ThumbsConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    resolve_config(Some(read_toml(path)?))
}

/// Returns a fully-commented stock `thumbs.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# thumbcrop configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Command-line flags override anything set here.
# Unknown keys will cause an error.

# Directory whose top-level files are turned into thumbnails.
# Subdirectories are not entered.
source_dir = "static/gallery"

# Directory thumbnails are written to. Created if missing; existing files
# are left alone (same-named thumbnails are overwritten).
output_dir = "static/gallery_thumb"

# Print every skipped (non-image) file and wait for Enter before exiting.
verbose = false

# ---------------------------------------------------------------------------
# Thumbnails
# ---------------------------------------------------------------------------
[thumbnail]
# Exact output size as [width, height]. Sources are scaled to cover the box,
# then center-cropped.
size = [400, 400]

# Output codec: JPEG, PNG, WEBP, TIFF, GIF, BMP or AVIF.
# The lower-cased name is also the default file extension.
# An empty string picks the codec from the output file name instead.
format = "JPEG"

# Lossy encoding quality, 1 (smallest) to 100 (best). JPEG and AVIF only.
quality = 90

# Resampling filter for the resize step:
# nearest | triangle | catmullrom | gaussian | lanczos3
filter = "catmullrom"

# Output file name pattern. Placeholders:
#   {name}  original file name          (dog.png)
#   {stem}  text before the first dot   (dog)
#   {ext}   lower-cased format name     (jpeg)
# Unset means "{stem}_thumb.{ext}".
# name_template = "{stem}_thumb.{ext}"
"##
}
