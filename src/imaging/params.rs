//! Parameter types for image operations.
//!
//! These types describe *what* to produce, not *how*. They are the vocabulary
//! shared by the pure [`calculations`](super::calculations), the
//! [`operations`](super::operations) that drive a run, and the
//! [`backend`](super::backend) that does the pixel work.
//!
//! ## Types
//!
//! - [`Dimensions`] — a width × height pair in pixels.
//! - [`Quality`] — Lossy encoding quality (1–100, default 90). Clamped on construction.
//! - [`OutputFormat`] — the configured codec name plus the format it resolves to.
//! - [`ResampleFilter`] — the interpolation used for the intermediate resize.

use image::ImageFormat;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width and height of an image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Quality setting for lossy image encoding (1-100).
///
/// Only JPEG and AVIF honor it; every other format is written lossless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// The codec a derivative is written with.
///
/// Keeps the name exactly as configured (`"JPEG"`, `"png"`, ...) because the
/// default naming rule uses its lower-cased form as the file extension. An
/// empty name means "infer the codec from the output filename".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFormat {
    name: String,
    format: Option<ImageFormat>,
}

impl OutputFormat {
    /// Resolve a codec name. Returns `None` when the name is neither empty
    /// nor a format this build can write.
    pub fn parse(name: &str) -> Option<Self> {
        if name.is_empty() {
            return Some(Self::inferred());
        }
        let format = ImageFormat::from_extension(name.to_ascii_lowercase())?;
        format.writing_enabled().then(|| Self {
            name: name.to_string(),
            format: Some(format),
        })
    }

    /// No explicit codec: the backend picks one from the output path.
    pub fn inferred() -> Self {
        Self {
            name: String::new(),
            format: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lower-cased name, used as the default thumbnail extension.
    pub fn extension(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn image_format(&self) -> Option<ImageFormat> {
        self.format
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self {
            name: "JPEG".to_string(),
            format: Some(ImageFormat::Jpeg),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            f.write_str("(inferred)")
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Interpolation filter for the resize step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    /// Bicubic.
    #[default]
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}
