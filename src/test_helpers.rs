//! Shared test utilities for the thumbcrop test suite.
//!
//! Synthetic image writers and small filesystem probes used by the backend
//! and process tests.

use image::{ImageEncoder, RgbImage, RgbaImage};
use std::path::Path;

// =========================================================================
// Fixture writers
// =========================================================================

/// Write a gradient JPEG of the given size.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a half-transparent PNG of the given size.
pub fn create_test_png_rgba(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 64, 128])
    });
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

// =========================================================================
// Probes
// =========================================================================

/// Pixel size of an image file on disk.
pub fn image_size(path: &Path) -> (u32, u32) {
    image::ImageReader::open(path)
        .unwrap()
        .with_guessed_format()
        .unwrap()
        .into_dimensions()
        .unwrap_or_else(|e| panic!("cannot read dimensions of {}: {e}", path.display()))
}

/// File names in a directory, sorted.
pub fn sorted_file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
