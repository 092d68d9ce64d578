/// Fixed-point luma weights for 16-bit channels. They sum to `1 << 16`.
const RW: u64 = 19595;
const GW: u64 = 38470;
const BW: u64 = 7471;

/// A single pixel value with 16 bits per channel.
///
/// A grey sample is opaque: it reads as `[v, v, v, u16::MAX]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorSample {
    /// Red, green, blue and alpha channels.
    Rgba([u16; 4]),
    /// A single grey channel.
    Gray(u16),
}

impl ColorSample {
    /// Fully transparent black.
    pub const TRANSPARENT: ColorSample = ColorSample::Rgba([0, 0, 0, 0]);

    /// The four channels of the sample.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgekit_image::ColorSample;
    ///
    /// assert_eq!(ColorSample::Gray(7).rgba(), [7, 7, 7, u16::MAX]);
    /// assert_eq!(ColorSample::Rgba([1, 2, 3, 4]).rgba(), [1, 2, 3, 4]);
    /// ```
    pub fn rgba(&self) -> [u16; 4] {
        match *self {
            ColorSample::Rgba(rgba) => rgba,
            ColorSample::Gray(v) => [v, v, v, u16::MAX],
        }
    }

    /// The red channel, which is the intensity of a grey sample.
    pub fn red(&self) -> u16 {
        self.rgba()[0]
    }

    /// The alpha channel.
    pub fn alpha(&self) -> u16 {
        self.rgba()[3]
    }

    /// Luma of the sample using the formula:
    ///
    /// Y = (19595 * R + 38470 * G + 7471 * B + 2^15) >> 16
    ///
    /// A sample whose three color channels are equal keeps its value.
    pub fn luma(&self) -> u16 {
        let [r, g, b, _] = self.rgba();
        let y = (RW * r as u64 + GW * g as u64 + BW * b as u64 + (1 << 15)) >> 16;
        y as u16
    }
}

impl Default for ColorSample {
    fn default() -> Self {
        ColorSample::TRANSPARENT
    }
}

impl From<[u16; 4]> for ColorSample {
    fn from(rgba: [u16; 4]) -> Self {
        ColorSample::Rgba(rgba)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luma_of_grey_is_identity() {
        for v in [0u16, 1, 255, 32768, 65534, u16::MAX] {
            assert_eq!(ColorSample::Rgba([v, v, v, 10]).luma(), v);
            assert_eq!(ColorSample::Gray(v).luma(), v);
        }
    }

    #[test]
    fn luma_weights() {
        assert_eq!(ColorSample::Rgba([u16::MAX, 0, 0, u16::MAX]).luma(), 19595);
        assert_eq!(ColorSample::Rgba([0, u16::MAX, 0, u16::MAX]).luma(), 38469);
        assert_eq!(ColorSample::Rgba([0, 0, u16::MAX, u16::MAX]).luma(), 7471);
    }

    #[test]
    fn channels() {
        let gray = ColorSample::Gray(42);
        assert_eq!(gray.red(), 42);
        assert_eq!(gray.alpha(), u16::MAX);
        let rgba = ColorSample::from([9, 8, 7, 6]);
        assert_eq!(rgba.red(), 9);
        assert_eq!(rgba.alpha(), 6);
        assert_eq!(ColorSample::default(), ColorSample::TRANSPARENT);
    }
}
