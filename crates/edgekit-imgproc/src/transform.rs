use std::str::FromStr;

use edgekit_image::{ColorSample, Image, Point};

use crate::{
    color, edges,
    error::TransformError,
    filter::{self, kernels::GaussianKernel},
    parallel::{self, ExecutionStrategy},
    threshold::{self, Thresholds},
};

/// The closed set of transforms the engine can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// Convert to grey using the luma of each pixel.
    Greyscale,
    /// Invert the color channels against alpha.
    Invert,
    /// Gaussian smoothing with the engine kernel.
    Gaussian,
    /// Sobel gradient with non-maximum suppression.
    Sobel,
    /// Double-threshold hysteresis.
    DoubleThreshold,
    /// Edge gap filling.
    FillInGaps,
}

impl TransformKind {
    /// Every registered transform.
    pub const ALL: [TransformKind; 6] = [
        TransformKind::Greyscale,
        TransformKind::Invert,
        TransformKind::Gaussian,
        TransformKind::Sobel,
        TransformKind::DoubleThreshold,
        TransformKind::FillInGaps,
    ];

    /// The edge detection pipeline run when no transform is requested.
    pub const EDGE_PIPELINE: [TransformKind; 5] = [
        TransformKind::Greyscale,
        TransformKind::Gaussian,
        TransformKind::Sobel,
        TransformKind::DoubleThreshold,
        TransformKind::FillInGaps,
    ];

    /// The registered name of the transform.
    pub fn name(&self) -> &'static str {
        match self {
            TransformKind::Greyscale => "greyscale",
            TransformKind::Invert => "invert",
            TransformKind::Gaussian => "gaussian",
            TransformKind::Sobel => "sobel",
            TransformKind::DoubleThreshold => "doubleThreshold",
            TransformKind::FillInGaps => "fillInGaps",
        }
    }

    /// The names of every registered transform.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|kind| kind.name()).collect()
    }
}

impl std::fmt::Display for TransformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformKind {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransformKind::ALL
            .iter()
            .find(|kind| kind.name() == s)
            .copied()
            .ok_or_else(|| TransformError::UnknownTransform(s.to_string()))
    }
}

/// Parse a comma separated list of transform names.
///
/// `"all"` or an empty string selects [`TransformKind::EDGE_PIPELINE`].
/// Surrounding whitespace of each name is ignored.
///
/// # Errors
///
/// Returns [`TransformError::UnknownTransform`] for the first name that is
/// not registered, before anything is run.
///
/// # Examples
///
/// ```
/// use edgekit_imgproc::{parse_transform_list, TransformKind};
///
/// let kinds = parse_transform_list("greyscale, sobel").unwrap();
/// assert_eq!(kinds, vec![TransformKind::Greyscale, TransformKind::Sobel]);
///
/// assert!(parse_transform_list("greyscale,blur").is_err());
/// ```
pub fn parse_transform_list(list: &str) -> Result<Vec<TransformKind>, TransformError> {
    let list = list.trim();
    if list.is_empty() || list == "all" {
        return Ok(TransformKind::EDGE_PIPELINE.to_vec());
    }
    list.split(',').map(|name| name.trim().parse()).collect()
}

/// Options used to build a [`TransformEngine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformOptions {
    /// Radius of the gaussian kernel.
    pub gaussian_radius: usize,
    /// Cutoffs of the double threshold.
    pub thresholds: Thresholds,
    /// How the mappers distribute work.
    pub strategy: ExecutionStrategy,
}

impl TransformOptions {
    /// Default radius of the gaussian kernel, a 7x7 window.
    pub const DEFAULT_GAUSSIAN_RADIUS: usize = 3;
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            gaussian_radius: Self::DEFAULT_GAUSSIAN_RADIUS,
            thresholds: Thresholds::default(),
            strategy: ExecutionStrategy::default(),
        }
    }
}

/// Applies registered transforms through the parallel mappers.
///
/// The engine owns the gaussian kernel, built once and shared read-only by
/// every call.
#[derive(Debug, Clone)]
pub struct TransformEngine {
    kernel: GaussianKernel,
    thresholds: Thresholds,
    strategy: ExecutionStrategy,
}

impl TransformEngine {
    /// Build an engine from options.
    ///
    /// # Errors
    ///
    /// Returns an error if the gaussian radius is outside
    /// `1..=GaussianKernel::MAX_RADIUS` or the strategy is invalid.
    pub fn new(options: TransformOptions) -> Result<Self, TransformError> {
        let kernel = GaussianKernel::new(options.gaussian_radius)?;
        Self::with_kernel(kernel, options.thresholds, options.strategy)
    }

    /// Build an engine around an existing kernel.
    ///
    /// # Errors
    ///
    /// Returns an error if the strategy is invalid.
    pub fn with_kernel(
        kernel: GaussianKernel,
        thresholds: Thresholds,
        strategy: ExecutionStrategy,
    ) -> Result<Self, TransformError> {
        strategy.validate()?;
        Ok(Self {
            kernel,
            thresholds,
            strategy,
        })
    }

    /// The gaussian kernel used by [`TransformKind::Gaussian`].
    pub fn kernel(&self) -> &GaussianKernel {
        &self.kernel
    }

    /// The cutoffs used by [`TransformKind::DoubleThreshold`].
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// The execution strategy of the mappers.
    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    /// Evaluate the pixel function of `kind` at one point.
    pub fn pixel(&self, kind: TransformKind, p: Point, src: &Image) -> ColorSample {
        match kind {
            TransformKind::Greyscale => color::greyscale(p, src),
            TransformKind::Invert => color::invert(p, src),
            TransformKind::Gaussian => filter::gaussian_pixel(&self.kernel, p, src),
            TransformKind::Sobel => filter::sobel_pixel(p, src),
            TransformKind::DoubleThreshold => threshold::double_threshold(&self.thresholds, p, src),
            TransformKind::FillInGaps => edges::fill_in_gaps(p, src),
        }
    }

    /// Apply a transform with the pixel mapper.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgekit_image::{ColorSample, Image, Point};
    /// use edgekit_imgproc::{TransformEngine, TransformKind, TransformOptions};
    ///
    /// let engine = TransformEngine::new(TransformOptions::default()).unwrap();
    /// let image = Image::from_size_val([4, 4].into(), ColorSample::Rgba([10, 20, 30, 40]));
    ///
    /// let inverted = engine.apply_pixel(&image, TransformKind::Invert).unwrap();
    /// assert_eq!(inverted.at(Point::new(3, 3)), ColorSample::Rgba([30, 20, 10, 40]));
    /// ```
    pub fn apply_pixel(&self, image: &Image, kind: TransformKind) -> Result<Image, TransformError> {
        log::debug!("applying {kind} per pixel");
        let out = parallel::map_pixels(image, self.strategy, |p, src| self.pixel(kind, p, src))?;
        Ok(out)
    }

    /// Apply a transform with the window mapper.
    ///
    /// Each window of `window_size` pixels is filled by evaluating the pixel
    /// function of `kind` on every entry, so the result equals
    /// [`TransformEngine::apply_pixel`].
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidWindowSize`] for a zero window size.
    pub fn apply_window(
        &self,
        image: &Image,
        kind: TransformKind,
        window_size: usize,
    ) -> Result<Image, TransformError> {
        if window_size == 0 {
            return Err(TransformError::InvalidWindowSize(window_size));
        }
        log::debug!("applying {kind} in {window_size}x{window_size} windows");
        let window = parallel::pixel_window(|p, src| self.pixel(kind, p, src));
        let out = parallel::map_windows(image, window_size, self.strategy, window)?;
        Ok(out)
    }
}
