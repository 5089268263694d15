//! Pure Rust codec backend on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `ImageReader::into_dimensions` (header only) |
//! | Decode (JPEG, PNG, TIFF, WebP, GIF, BMP) | `ImageReader::with_guessed_format` + `decode` |
//! | Resize | `DynamicImage::resize_exact` with the configured filter |
//! | Crop | `DynamicImage::crop_imm`, or `imageops::replace` onto a blank canvas |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` with quality |
//! | Encode → AVIF | `image::codecs::avif::AvifEncoder` (rav1e, speed 6) |
//! | Encode → other | `DynamicImage::write_to` |
//!
//! Format detection sniffs magic bytes first and falls back to the file
//! extension, so a mislabeled file still decodes.

use super::backend::{BackendError, ImageBackend};
use super::calculations::CropRect;
use super::params::{Dimensions, OutputFormat, Quality, ResampleFilter};
use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustBackend {
    filter: ResampleFilter,
    quality: Quality,
}

impl RustBackend {
    pub fn new(filter: ResampleFilter, quality: Quality) -> Self {
        Self { filter, quality }
    }
}

/// Split decoder errors into "not an image" and everything else.
///
/// Unknown formats and malformed data are per-file problems; I/O failures
/// and decoder limits are not.
fn classify_decode_error(path: &Path, err: ImageError) -> BackendError {
    match err {
        ImageError::Unsupported(_) | ImageError::Decoding(_) => BackendError::Unrecognized {
            path: path.to_path_buf(),
            reason: err.to_string(),
        },
        ImageError::IoError(io) => BackendError::Io(io),
        other => BackendError::ProcessingFailed(format!(
            "Failed to decode {}: {}",
            path.display(),
            other
        )),
    }
}

fn open_reader(
    path: &Path,
) -> Result<ImageReader<std::io::BufReader<File>>, BackendError> {
    Ok(ImageReader::open(path)?.with_guessed_format()?)
}

/// Resolve the codec for a write: explicit format first, then the extension.
fn resolve_format(path: &Path, format: &OutputFormat) -> Result<ImageFormat, BackendError> {
    match format.image_format() {
        Some(f) => Ok(f),
        None => ImageFormat::from_path(path)
            .ok()
            .filter(|f| f.writing_enabled())
            .ok_or_else(|| BackendError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// JPEG has no alpha channel and only 8-bit samples.
fn jpeg_compatible(image: &DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_) => image.clone(),
        _ if image.color().has_color() => DynamicImage::ImageRgb8(image.to_rgb8()),
        _ => DynamicImage::ImageLuma8(image.to_luma8()),
    }
}

impl ImageBackend for RustBackend {
    type Image = DynamicImage;

    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        open_reader(path)?
            .into_dimensions()
            .map(Dimensions::from)
            .map_err(|e| classify_decode_error(path, e))
    }

    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        open_reader(path)?
            .decode()
            .map_err(|e| classify_decode_error(path, e))
    }

    fn dimensions(&self, image: &DynamicImage) -> Dimensions {
        Dimensions::new(image.width(), image.height())
    }

    fn resize(&self, image: DynamicImage, size: Dimensions) -> DynamicImage {
        if self.dimensions(&image) == size {
            return image;
        }
        image.resize_exact(size.width, size.height, FilterType::from(self.filter))
    }

    fn crop(&self, image: DynamicImage, rect: CropRect) -> DynamicImage {
        if rect.fits_within(self.dimensions(&image)) {
            return image.crop_imm(
                rect.left as u32,
                rect.top as u32,
                rect.width(),
                rect.height(),
            );
        }
        // Window overhangs the image: paste onto an empty canvas of the window size.
        let mut canvas = DynamicImage::new(rect.width(), rect.height(), image.color());
        image::imageops::replace(&mut canvas, &image, -rect.left, -rect.top);
        canvas
    }

    fn encode(
        &self,
        image: &DynamicImage,
        path: &Path,
        format: &OutputFormat,
    ) -> Result<(), BackendError> {
        let format = resolve_format(path, format)?;
        let mut writer = BufWriter::new(File::create(path)?);
        let quality = self.quality.value() as u8;

        let result = match format {
            ImageFormat::Jpeg => {
                let encoder =
                    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, quality);
                jpeg_compatible(image).write_with_encoder(encoder)
            }
            ImageFormat::Avif => {
                let encoder = image::codecs::avif::AvifEncoder::new_with_speed_quality(
                    &mut writer,
                    6,
                    quality,
                );
                image.write_with_encoder(encoder)
            }
            other => image.write_to(&mut writer, other),
        };

        result.map_err(|e| match e {
            ImageError::IoError(io) => BackendError::Io(io),
            other => BackendError::ProcessingFailed(format!(
                "Failed to encode {}: {}",
                path.display(),
                other
            )),
        })?;
        // Dropping a BufWriter swallows write errors from the final flush.
        writer.flush()?;
        Ok(())
    }
}
