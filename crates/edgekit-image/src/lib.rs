#![deny(missing_docs)]
//! Raster image types for the edgekit transforms.

/// color samples stored in an image.
pub mod color;

/// Error types for the image module.
pub mod error;

/// integer coordinates and rectangular bounds.
pub mod geometry;

/// image representation addressed by points.
pub mod image;

/// per-channel numeric helpers.
pub mod ops;

pub use crate::color::ColorSample;
pub use crate::error::ImageError;
pub use crate::geometry::{Bounds, ImageSize, Point};
pub use crate::image::{Image, CHANNELS};
