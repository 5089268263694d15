//! Image codec backend trait and shared error type.
//!
//! The [`ImageBackend`] trait is the codec capability the generator needs:
//! identify, decode, resize, crop and encode. Decoded pixels stay behind the
//! associated [`ImageBackend::Image`] type, so orchestration never touches a
//! concrete pixel buffer and tests can swap in a recording mock.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate.

use super::calculations::CropRect;
use super::params::{Dimensions, OutputFormat};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not an image this backend can read. The only per-file
    /// failure a run recovers from.
    #[error("cannot identify image file {}: {reason}", path.display())]
    Unrecognized { path: PathBuf, reason: String },
    #[error("Unsupported output format for {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

impl BackendError {
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, BackendError::Unrecognized { .. })
    }
}

/// Trait for image codec backends.
///
/// `decode` must report unreadable content as [`BackendError::Unrecognized`]
/// and everything else (I/O, resource limits) as another variant. The
/// generator skips the former and aborts on the latter.
pub trait ImageBackend {
    /// Decoded image handle. Dropping it releases the pixels.
    type Image;

    /// Read dimensions from the file header without a full decode.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode a file into memory. The file handle is closed on return.
    fn decode(&self, path: &Path) -> Result<Self::Image, BackendError>;

    fn dimensions(&self, image: &Self::Image) -> Dimensions;

    /// Resize to exactly `size`, ignoring aspect ratio.
    fn resize(&self, image: Self::Image, size: Dimensions) -> Self::Image;

    /// Cut out `rect`. Area outside the image comes back as empty pixels.
    fn crop(&self, image: Self::Image, rect: CropRect) -> Self::Image;

    /// Write the image. `format` without a codec means infer from `path`.
    fn encode(
        &self,
        image: &Self::Image,
        path: &Path,
        format: &OutputFormat,
    ) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Stand-in for decoded pixels: just the size and where it came from.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct MockImage {
        pub source: String,
        pub dims: Dimensions,
    }

    /// Mock backend that records operations without touching pixels.
    ///
    /// Files are "decodable" when registered with [`MockBackend::with_image`];
    /// anything else decodes as [`BackendError::Unrecognized`]. Encoding only
    /// records the call, it never writes to disk.
    #[derive(Default)]
    pub struct MockBackend {
        pub images: Mutex<HashMap<String, Dimensions>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Decode(String),
        Resize {
            source: String,
            width: u32,
            height: u32,
        },
        Crop {
            source: String,
            rect: CropRect,
        },
        Encode {
            source: String,
            output: String,
            width: u32,
            height: u32,
            format: String,
        },
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Register a decodable file by name with its original dimensions.
        pub fn with_image(self, name: &str, width: u32, height: u32) -> Self {
            self.images
                .lock()
                .unwrap()
                .insert(name.to_string(), Dimensions::new(width, height));
            self
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        /// Output names of every encode call, in call order.
        pub fn encoded_outputs(&self) -> Vec<String> {
            self.get_operations()
                .into_iter()
                .filter_map(|op| match op {
                    RecordedOp::Encode { output, .. } => Some(output),
                    _ => None,
                })
                .collect()
        }

        fn record(&self, op: RecordedOp) {
            self.operations.lock().unwrap().push(op);
        }

        fn lookup(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.images
                .lock()
                .unwrap()
                .get(&file_name(path))
                .copied()
                .ok_or_else(|| BackendError::Unrecognized {
                    path: path.to_path_buf(),
                    reason: "not registered with mock".to_string(),
                })
        }
    }

    impl ImageBackend for MockBackend {
        type Image = MockImage;

        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.record(RecordedOp::Identify(file_name(path)));
            self.lookup(path)
        }

        fn decode(&self, path: &Path) -> Result<MockImage, BackendError> {
            self.record(RecordedOp::Decode(file_name(path)));
            Ok(MockImage {
                source: file_name(path),
                dims: self.lookup(path)?,
            })
        }

        fn dimensions(&self, image: &MockImage) -> Dimensions {
            image.dims
        }

        fn resize(&self, image: MockImage, size: Dimensions) -> MockImage {
            self.record(RecordedOp::Resize {
                source: image.source.clone(),
                width: size.width,
                height: size.height,
            });
            MockImage { dims: size, ..image }
        }

        fn crop(&self, image: MockImage, rect: CropRect) -> MockImage {
            self.record(RecordedOp::Crop {
                source: image.source.clone(),
                rect,
            });
            MockImage {
                dims: Dimensions::new(rect.width(), rect.height()),
                ..image
            }
        }

        fn encode(
            &self,
            image: &MockImage,
            path: &Path,
            format: &OutputFormat,
        ) -> Result<(), BackendError> {
            self.record(RecordedOp::Encode {
                source: image.source.clone(),
                output: file_name(path),
                width: image.dims.width,
                height: image.dims.height,
                format: format.name().to_string(),
            });
            Ok(())
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::new().with_image("image.jpg", 800, 600);

        let result = backend.identify(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(result, Dimensions::new(800, 600));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "image.jpg"));
    }

    #[test]
    fn mock_unknown_file_is_unrecognized() {
        let backend = MockBackend::new();
        let err = backend.decode(Path::new("/test/notes.txt")).unwrap_err();
        assert!(err.is_unrecognized());
    }

    #[test]
    fn mock_crop_takes_window_size() {
        let backend = MockBackend::new().with_image("a.png", 10, 20);
        let image = backend.decode(Path::new("a.png")).unwrap();
        let cropped = backend.crop(
            image,
            CropRect {
                left: 0,
                top: 5,
                right: 10,
                bottom: 15,
            },
        );
        assert_eq!(backend.dimensions(&cropped), Dimensions::new(10, 10));
    }

    #[test]
    fn only_unrecognized_is_recoverable() {
        let io = BackendError::Io(std::io::Error::other("disk gone"));
        assert!(!io.is_unrecognized());
        assert!(!BackendError::ProcessingFailed("x".into()).is_unrecognized());
    }

    #[test]
    fn unrecognized_message_names_the_file() {
        let err = BackendError::Unrecognized {
            path: PathBuf::from("gallery/notes.txt"),
            reason: "unknown format".into(),
        };
        assert_eq!(
            err.to_string(),
            "cannot identify image file gallery/notes.txt: unknown format"
        );
    }
}
