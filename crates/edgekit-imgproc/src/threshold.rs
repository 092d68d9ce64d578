use edgekit_image::{ColorSample, Image, Point};

use crate::error::TransformError;

/// The intensity cutoffs of the double threshold, as ratios of alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    low: f64,
    high: f64,
}

impl Thresholds {
    /// Default lower cutoff.
    pub const DEFAULT_LOW: f64 = 0.10;
    /// Default upper cutoff.
    pub const DEFAULT_HIGH: f64 = 0.90;

    /// Create new thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidThresholds`] if a cutoff is not finite
    /// or `low > high`.
    pub fn new(low: f64, high: f64) -> Result<Self, TransformError> {
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(TransformError::InvalidThresholds { low, high });
        }
        Ok(Self { low, high })
    }

    /// The lower cutoff.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// The upper cutoff.
    pub fn high(&self) -> f64 {
        self.high
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low: Self::DEFAULT_LOW,
            high: Self::DEFAULT_HIGH,
        }
    }
}

/// Apply the double threshold to one pixel.
///
/// The intensity ratio is `(r + g + b) / (3 * a)`. A pixel whose ratio is
/// strictly above the high cutoff or strictly below the low cutoff becomes
/// black with its alpha preserved. Other pixels pass through. A fully
/// transparent pixel has no defined ratio and is always cleared.
///
/// # Examples
///
/// ```
/// use edgekit_image::{ColorSample, Image, Point};
/// use edgekit_imgproc::threshold::{double_threshold, Thresholds};
///
/// let image = Image::from_size_val([1, 1].into(), ColorSample::Rgba([500, 500, 500, 1000]));
/// let out = double_threshold(&Thresholds::default(), Point::new(0, 0), &image);
/// assert_eq!(out, ColorSample::Rgba([500, 500, 500, 1000]));
/// ```
pub fn double_threshold(thresholds: &Thresholds, p: Point, src: &Image) -> ColorSample {
    let sample = src.at(p);
    let [r, g, b, a] = sample.rgba();
    if a == 0 {
        return ColorSample::Rgba([0, 0, 0, 0]);
    }

    let ratio = (r as f64 + g as f64 + b as f64) / (3.0 * a as f64);
    if ratio > thresholds.high || ratio < thresholds.low {
        ColorSample::Rgba([0, 0, 0, a])
    } else {
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(sample: ColorSample) -> Image {
        Image::from_size_val([1, 1].into(), sample)
    }

    fn apply(sample: ColorSample) -> ColorSample {
        double_threshold(&Thresholds::default(), Point::new(0, 0), &single(sample))
    }

    #[test]
    fn test_double_threshold_bands() {
        // ratio 0.5
        let mid = ColorSample::Rgba([50, 50, 50, 100]);
        assert_eq!(apply(mid), mid);
        // ratio 0.95
        assert_eq!(
            apply(ColorSample::Rgba([95, 95, 95, 100])),
            ColorSample::Rgba([0, 0, 0, 100])
        );
        // ratio 0.05
        assert_eq!(
            apply(ColorSample::Rgba([5, 5, 5, 100])),
            ColorSample::Rgba([0, 0, 0, 100])
        );
        // an opaque black sobel output is a non-edge
        assert_eq!(apply(ColorSample::Gray(0)), ColorSample::Rgba([0, 0, 0, 65535]));
    }

    #[test]
    fn test_double_threshold_exact_cutoffs() {
        // ratio exactly 0.9 and 0.1 are kept
        let high = ColorSample::Rgba([9, 9, 9, 10]);
        assert_eq!(apply(high), high);
        let low = ColorSample::Rgba([1, 1, 1, 10]);
        assert_eq!(apply(low), low);
        // uneven channels with the same ratio
        let low = ColorSample::Rgba([3, 0, 0, 10]);
        assert_eq!(apply(low), low);
    }

    #[test]
    fn test_double_threshold_zero_alpha() {
        assert_eq!(
            apply(ColorSample::Rgba([10, 20, 30, 0])),
            ColorSample::Rgba([0, 0, 0, 0])
        );
        assert_eq!(apply(ColorSample::TRANSPARENT), ColorSample::Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_thresholds_config() {
        let t = Thresholds::new(0.2, 0.2).unwrap();
        assert_eq!((t.low(), t.high()), (0.2, 0.2));
        assert_eq!(
            Thresholds::new(0.8, 0.3),
            Err(TransformError::InvalidThresholds {
                low: 0.8,
                high: 0.3
            })
        );
        assert!(Thresholds::new(f64::NAN, 0.3).is_err());
        assert_eq!(Thresholds::default().low(), 0.10);
    }
}
