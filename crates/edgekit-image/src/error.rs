use crate::geometry::{Bounds, Point};

/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the minimum corner of the bounds exceeds the maximum corner.
    #[error("Invalid bounds: min {0} must not exceed max {1}")]
    InvalidBounds(Point, Point),

    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when a point lies outside the image bounds.
    #[error("Pixel {0} is out of bounds {1}")]
    PixelIndexOutOfBounds(Point, Bounds),
}
