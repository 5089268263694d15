//! Image processing — pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions` |
//! | **Decode** | `image` crate decoders, format sniffed from content |
//! | **Resize → crop** | `resize_exact` + `crop_imm` |
//! | **Encode** | JPEG/AVIF with quality, everything else via `write_to` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for thumbnail geometry (unit testable)
//! - **Parameters**: Value types shared by every layer
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::{CropRect, Geometry, Orientation, calculate_geometry, classify_orientation};
pub use operations::{CreatedThumbnail, create_thumbnail, get_dimensions, plan_thumbnail};
pub use params::{Dimensions, OutputFormat, Quality, ResampleFilter};
pub use rust_backend::RustBackend;
