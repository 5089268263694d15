//! High-level image operations.
//!
//! These functions combine calculations with backend execution: read the
//! source size, compute the geometry, then resize, crop and encode.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{Geometry, calculate_geometry};
use super::params::{Dimensions, OutputFormat};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<Dimensions> {
    backend.identify(path)
}

/// Plan a thumbnail without decoding pixels or writing anything.
///
/// Only reads the file header, so it is cheap enough for a dry run over a
/// whole directory.
pub fn plan_thumbnail(
    backend: &impl ImageBackend,
    source: &Path,
    target: Dimensions,
) -> Result<(Dimensions, Geometry)> {
    let original = get_dimensions(backend, source)?;
    Ok((original, calculate_geometry(original, target)))
}

/// A thumbnail that was written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedThumbnail {
    pub original: Dimensions,
    pub geometry: Geometry,
}

/// Create a thumbnail of exactly `target` size at `output`.
///
/// The decoded image lives only for the duration of this call, so its
/// memory is released on every return path.
pub fn create_thumbnail<B: ImageBackend>(
    backend: &B,
    source: &Path,
    output: &Path,
    target: Dimensions,
    format: &OutputFormat,
) -> Result<CreatedThumbnail> {
    let image = backend.decode(source)?;
    let original = backend.dimensions(&image);
    let geometry = calculate_geometry(original, target);

    let resized = backend.resize(image, geometry.resize);
    let cropped = backend.crop(resized, geometry.crop);
    backend.encode(&cropped, output, format)?;

    Ok(CreatedThumbnail { original, geometry })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Orientation;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::imaging::calculations::CropRect;

    #[test]
    fn get_dimensions_calls_backend() {
        let backend = MockBackend::new().with_image("test.jpg", 1920, 1080);

        let dims = get_dimensions(&backend, Path::new("/test.jpg")).unwrap();
        assert_eq!(dims, Dimensions::new(1920, 1080));
    }

    #[test]
    fn plan_thumbnail_only_identifies() {
        let backend = MockBackend::new().with_image("wide.jpg", 800, 400);

        let (original, geometry) =
            plan_thumbnail(&backend, Path::new("/in/wide.jpg"), Dimensions::new(400, 400))
                .unwrap();

        assert_eq!(original, Dimensions::new(800, 400));
        assert_eq!(geometry.orientation, Orientation::Landscape);
        assert_eq!(
            backend.get_operations(),
            vec![RecordedOp::Identify("wide.jpg".into())]
        );
    }

    #[test]
    fn create_thumbnail_runs_decode_resize_crop_encode() {
        let backend = MockBackend::new().with_image("tall.jpg", 400, 800);

        let created = create_thumbnail(
            &backend,
            Path::new("/in/tall.jpg"),
            Path::new("/out/tall_thumb.jpeg"),
            Dimensions::new(200, 200),
            &OutputFormat::default(),
        )
        .unwrap();

        assert_eq!(created.original, Dimensions::new(400, 800));
        assert_eq!(created.geometry.orientation, Orientation::Portrait);

        let ops = backend.get_operations();
        assert_eq!(
            ops,
            vec![
                RecordedOp::Decode("tall.jpg".into()),
                RecordedOp::Resize {
                    source: "tall.jpg".into(),
                    width: 200,
                    height: 400,
                },
                RecordedOp::Crop {
                    source: "tall.jpg".into(),
                    rect: CropRect {
                        left: 0,
                        top: 100,
                        right: 200,
                        bottom: 300,
                    },
                },
                RecordedOp::Encode {
                    source: "tall.jpg".into(),
                    output: "tall_thumb.jpeg".into(),
                    width: 200,
                    height: 200,
                    format: "JPEG".into(),
                },
            ]
        );
    }

    #[test]
    fn create_thumbnail_stops_at_failed_decode() {
        let backend = MockBackend::new();

        let result = create_thumbnail(
            &backend,
            Path::new("/in/notes.txt"),
            Path::new("/out/notes_thumb.jpeg"),
            Dimensions::new(400, 400),
            &OutputFormat::default(),
        );

        assert!(result.unwrap_err().is_unrecognized());
        assert_eq!(
            backend.get_operations(),
            vec![RecordedOp::Decode("notes.txt".into())]
        );
    }
}
