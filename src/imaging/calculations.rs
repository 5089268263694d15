//! Pure calculation functions for thumbnail geometry.
//!
//! All functions here are pure and testable without any I/O or images.
//!
//! A thumbnail is made in two steps: a proportional resize that pins one edge
//! to the target box, then a centered crop along the other edge. Which edge is
//! pinned depends only on the source orientation:
//!
//! ```text
//! portrait/square (h >= w)   width  := target width,  crop vertically
//! landscape       (h <  w)   height := target height, crop horizontally
//! ```
//!
//! The crop window always spans exactly the target box. Its first bound is
//! `floor((resized - target) / 2)` and the second is `first + target`.

use super::params::Dimensions;
use std::fmt;

/// Which edge of the source gets pinned to the target box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Height >= width. Squares land here.
    Portrait,
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => f.write_str("portrait"),
            Orientation::Landscape => f.write_str("landscape"),
        }
    }
}

/// Crop window in resized-image coordinates, as `(left, top, right, bottom)`.
///
/// Bounds are signed: when the resized image is smaller than the target box
/// along the crop axis, the window starts before the image edge and the
/// uncovered area is filled with empty pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl CropRect {
    pub fn width(&self) -> u32 {
        (self.right - self.left) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom - self.top) as u32
    }

    /// Whether the window lies entirely inside an image of the given size.
    pub fn fits_within(&self, dims: Dimensions) -> bool {
        self.left >= 0
            && self.top >= 0
            && self.right <= i64::from(dims.width)
            && self.bottom <= i64::from(dims.height)
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Everything needed to turn one source image into a thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub orientation: Orientation,
    /// Intermediate size after the proportional resize.
    pub resize: Dimensions,
    pub crop: CropRect,
}

/// Classify a source image. Height >= width counts as portrait.
pub fn classify_orientation(source: Dimensions) -> Orientation {
    if source.height >= source.width {
        Orientation::Portrait
    } else {
        Orientation::Landscape
    }
}

/// Scale `edge` by `numerator / denominator`, rounding down.
///
/// Integer arithmetic keeps the result exact for any `u32` inputs.
fn scale_floor(edge: u32, numerator: u32, denominator: u32) -> u32 {
    let scaled = u64::from(edge) * u64::from(numerator) / u64::from(denominator);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// First crop bound for centering `target` inside `resized`: floor division,
/// so a negative surplus rounds toward negative infinity.
fn centered_offset(resized: u32, target: u32) -> i64 {
    (i64::from(resized) - i64::from(target)).div_euclid(2)
}

/// Compute resize dimensions and crop window for a source image.
///
/// Both `source` and `target` must have non-zero edges.
///
/// # Examples
/// ```
/// # use thumbcrop::imaging::{calculate_geometry, Dimensions, Orientation};
/// // 800x400 landscape into 400x400: resize to 800x400, keep the middle
/// let g = calculate_geometry(Dimensions::new(800, 400), Dimensions::new(400, 400));
/// assert_eq!(g.orientation, Orientation::Landscape);
/// assert_eq!(g.resize, Dimensions::new(800, 400));
/// assert_eq!((g.crop.left, g.crop.right), (200, 600));
/// ```
pub fn calculate_geometry(source: Dimensions, target: Dimensions) -> Geometry {
    let orientation = classify_orientation(source);

    match orientation {
        Orientation::Portrait => {
            let resized_height = scale_floor(source.height, target.width, source.width);
            let top = centered_offset(resized_height, target.height);
            Geometry {
                orientation,
                resize: Dimensions::new(target.width, resized_height),
                crop: CropRect {
                    left: 0,
                    top,
                    right: i64::from(target.width),
                    bottom: top + i64::from(target.height),
                },
            }
        }
        Orientation::Landscape => {
            let resized_width = scale_floor(source.width, target.height, source.height);
            let left = centered_offset(resized_width, target.width);
            Geometry {
                orientation,
                resize: Dimensions::new(resized_width, target.height),
                crop: CropRect {
                    left,
                    top: 0,
                    right: left + i64::from(target.width),
                    bottom: i64::from(target.height),
                },
            }
        }
    }
}
