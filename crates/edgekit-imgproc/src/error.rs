use crate::parallel::ParallelError;

/// An error type for configuring and running transforms.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TransformError {
    /// The transform name is not registered.
    #[error("Function {0} not in available transforms")]
    UnknownTransform(String),

    /// A pipeline must contain at least one transform.
    #[error("Pipeline has no transforms")]
    EmptyPipeline,

    /// The gaussian kernel parameters are invalid.
    #[error("Invalid gaussian kernel: radius {radius} must be in 1..=512 and sigma {sigma} finite and > 0")]
    InvalidKernel {
        /// requested kernel radius
        radius: usize,
        /// requested standard deviation
        sigma: f64,
    },

    /// The hysteresis thresholds are invalid.
    #[error("Invalid thresholds: low {low} and high {high} must be finite with low <= high")]
    InvalidThresholds {
        /// lower cutoff
        low: f64,
        /// upper cutoff
        high: f64,
    },

    /// The window size must be strictly positive.
    #[error("window size must be > 0, got {0}")]
    InvalidWindowSize(usize),

    /// Error raised by the parallel mappers.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
