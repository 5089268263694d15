//! # thumbcrop
//!
//! Batch generator of fixed-size, center-cropped thumbnails. Point it at a
//! directory of images and it writes one derivative per image, each exactly
//! the configured size, into an output directory.
//!
//! # How a Thumbnail Is Cut
//!
//! ```text
//! 1. Decode     wide.jpg            800x400  (non-images are skipped)
//! 2. Resize     pin one edge         800x400  (height := 400)
//! 3. Crop       center window        (200, 0, 600, 400)
//! 4. Encode     wide_thumb.jpeg      400x400
//! ```
//!
//! Portrait and square sources pin their width to the target width and are
//! cropped vertically; landscape sources pin their height and are cropped
//! horizontally. See [`imaging::calculate_geometry`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`process`] | Walks the source directory and runs every file through the pipeline |
//! | [`imaging`] | Geometry, the codec [`ImageBackend`](imaging::ImageBackend) trait and its `image`-crate implementation |
//! | [`naming`] | Output filename rules: default `_thumb` suffix, templates, closures |
//! | [`config`] | `thumbs.toml` loading, merging, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Library Use
//!
//! ```no_run
//! use thumbcrop::naming::Naming;
//! use thumbcrop::process::{TargetSpec, generate};
//!
//! let spec = TargetSpec {
//!     naming: Naming::custom(|name| name.to_uppercase()),
//!     ..TargetSpec::default()
//! };
//! let report = generate(&spec, None)?;
//! println!("{} written, {} skipped", report.written.len(), report.skipped.len());
//! # Ok::<(), thumbcrop::process::ProcessError>(())
//! ```
//!
//! # Design Decisions
//!
//! ## Skip Only What Is Not an Image
//!
//! A file the decoder cannot identify is expected in a gallery folder (a
//! stray `notes.txt`, a `.DS_Store`) and is skipped. Anything else (a
//! permission error, a full disk, an encoder failure) aborts the run: a
//! half-written thumbnail directory is worse than a clear error.
//!
//! ## Exact Size, Always
//!
//! The crop window is derived as `start + target`, never from two independent
//! roundings, and any part of the window that falls outside the resized image
//! is filled with empty pixels. Every thumbnail comes out at exactly the
//! configured size whatever the source looks like.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod process;

#[cfg(test)]
pub(crate) mod test_helpers;
