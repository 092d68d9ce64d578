#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// edge linking module.
pub mod edges;

/// Error types for the transforms.
pub mod error;

/// image filtering module.
pub mod filter;

/// module containing parallization utilities.
pub mod parallel;

/// sequential application of named transforms.
pub mod pipeline;

/// operations to threshold images.
pub mod threshold;

/// transform registry and engine.
pub mod transform;

pub use crate::error::TransformError;
pub use crate::pipeline::{Mapper, Pipeline};
pub use crate::transform::{parse_transform_list, TransformEngine, TransformKind, TransformOptions};
