//! Filter operations
//!
//! This module provides the neighborhood filters of the edge pipeline.

/// Filter kernels
pub mod kernels;

/// Gaussian smoothing
mod gaussian;
pub use gaussian::*;

/// Sobel gradient with non-maximum suppression
mod sobel;
pub use sobel::*;
