use crate::color::ColorSample;
use crate::error::ImageError;
use crate::geometry::{Bounds, ImageSize, Point};

/// Number of interleaved channels per pixel (red, green, blue, alpha).
pub const CHANNELS: usize = 4;

/// Represents an image with 16-bit RGBA pixel data.
///
/// The pixels are stored interleaved in row-major order, starting at the
/// top-left corner of the image [`Bounds`]. Coordinates are absolute: a pixel
/// is addressed by the same [`Point`] whatever the origin of the bounds is.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    bounds: Bounds,
    data: Vec<u16>,
}

impl Image {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `bounds` - The coordinate domain of the image.
    /// * `data` - The interleaved RGBA pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgekit_image::{Bounds, Image, ImageSize};
    ///
    /// let image = Image::new(
    ///     Bounds::from_size(ImageSize { width: 10, height: 20 }),
    ///     vec![0u16; 10 * 20 * 4],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.width(), 10);
    /// assert_eq!(image.height(), 20);
    /// ```
    pub fn new(bounds: Bounds, data: Vec<u16>) -> Result<Self, ImageError> {
        let expected = bounds.width() * bounds.height() * CHANNELS;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }
        Ok(Self { bounds, data })
    }

    /// Create a new image with every pixel set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgekit_image::{Bounds, ColorSample, Image, Point};
    ///
    /// let image = Image::from_bounds_val(
    ///     Bounds::new(Point::new(-1, -1), Point::new(1, 1)).unwrap(),
    ///     ColorSample::Gray(9),
    /// );
    ///
    /// assert_eq!(image.get(Point::new(-1, 0)), Some(ColorSample::Rgba([9, 9, 9, u16::MAX])));
    /// ```
    pub fn from_bounds_val(bounds: Bounds, val: ColorSample) -> Self {
        let pixel = val.rgba();
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(bounds.width() * bounds.height() * CHANNELS)
            .collect();
        Self { bounds, data }
    }

    /// Create a new image anchored at the origin with every pixel set to `val`.
    pub fn from_size_val(size: ImageSize, val: ColorSample) -> Self {
        Self::from_bounds_val(Bounds::from_size(size), val)
    }

    /// Create a new image by evaluating `f` on every coordinate in row-major order.
    pub fn from_fn(bounds: Bounds, mut f: impl FnMut(Point) -> ColorSample) -> Self {
        let mut data = Vec::with_capacity(bounds.width() * bounds.height() * CHANNELS);
        for p in bounds.points() {
            data.extend_from_slice(&f(p).rgba());
        }
        Self { bounds, data }
    }

    /// The coordinate domain of the image.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.bounds.size()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.bounds.width()
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.bounds.height()
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Number of `u16` values in one row of pixels.
    pub fn row_stride(&self) -> usize {
        self.width() * CHANNELS
    }

    /// Get the sample at `p`, or `None` when `p` is outside the bounds.
    pub fn get(&self, p: Point) -> Option<ColorSample> {
        let offset = self.bounds.index_of(p)? * CHANNELS;
        let mut rgba = [0u16; CHANNELS];
        rgba.copy_from_slice(&self.data[offset..offset + CHANNELS]);
        Some(ColorSample::Rgba(rgba))
    }

    /// Get the sample at `p`, reading transparent black outside the bounds.
    pub fn at(&self, p: Point) -> ColorSample {
        self.get(p).unwrap_or(ColorSample::TRANSPARENT)
    }

    /// Write the sample at `p`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::PixelIndexOutOfBounds`] when `p` is outside the bounds.
    pub fn set(&mut self, p: Point, sample: ColorSample) -> Result<(), ImageError> {
        let offset = self
            .bounds
            .index_of(p)
            .ok_or(ImageError::PixelIndexOutOfBounds(p, self.bounds))?
            * CHANNELS;
        self.data[offset..offset + CHANNELS].copy_from_slice(&sample.rgba());
        Ok(())
    }

    /// Get the raw interleaved pixel data.
    pub fn as_slice(&self) -> &[u16] {
        &self.data
    }

    /// Get the raw interleaved pixel data mutably.
    pub fn as_slice_mut(&mut self) -> &mut [u16] {
        &mut self.data
    }

    /// Consume the image and return its raw pixel data.
    pub fn into_vec(self) -> Vec<u16> {
        self.data
    }
}
