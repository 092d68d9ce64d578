use edgekit_image::{ColorSample, Image, Point};

/// Convert one pixel to grey, keeping its alpha.
///
/// The grey value is the luma of the sample (see [`ColorSample::luma`]), so
/// converting an already grey pixel returns it unchanged.
///
/// # Examples
///
/// ```
/// use edgekit_image::{ColorSample, Image, Point};
/// use edgekit_imgproc::color::greyscale;
///
/// let image = Image::from_size_val([1, 1].into(), ColorSample::Rgba([0, 65535, 0, 100]));
/// assert_eq!(greyscale(Point::new(0, 0), &image), ColorSample::Rgba([38469, 38469, 38469, 100]));
/// ```
pub fn greyscale(p: Point, src: &Image) -> ColorSample {
    let sample = src.at(p);
    let y = sample.luma();
    ColorSample::Rgba([y, y, y, sample.alpha()])
}

/// Invert the color channels of one pixel against its alpha.
pub fn invert(p: Point, src: &Image) -> ColorSample {
    let [r, g, b, a] = src.at(p).rgba();
    ColorSample::Rgba([a.saturating_sub(r), a.saturating_sub(g), a.saturating_sub(b), a])
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgekit_image::Bounds;

    fn test_image() -> Image {
        // same layout as a 10x10 8-bit test card scaled to 16 bits
        let scale = |i: i32| ((65535 * i) / 9) as u16;
        Image::from_fn(Bounds::from_size([10, 10].into()), |p| {
            ColorSample::Rgba([scale(p.x), scale(p.y), scale((p.x * p.y) / 2 % 10), 65535])
        })
    }

    #[test]
    fn test_greyscale_channels_equal() {
        let src = test_image();
        for p in src.bounds().points() {
            let [r, g, b, a] = greyscale(p, &src).rgba();
            assert_eq!(r, g);
            assert_eq!(g, b);
            assert_eq!(a, src.at(p).alpha());
        }
    }

    #[test]
    fn test_greyscale_idempotent() {
        let src = test_image();
        for p in src.bounds().points() {
            let once = greyscale(p, &src);
            let mut grey = src.clone();
            grey.set(p, once).unwrap();
            assert_eq!(greyscale(p, &grey), once, "{p}");
        }
    }

    #[test]
    fn test_invert() {
        let src = test_image();
        for p in src.bounds().points() {
            let [r, g, b, a] = src.at(p).rgba();
            assert_eq!(invert(p, &src), ColorSample::Rgba([a - r, a - g, a - b, a]));
        }

        let translucent = Image::from_size_val([1, 1].into(), ColorSample::Rgba([300, 50, 0, 100]));
        assert_eq!(
            invert(Point::new(0, 0), &translucent),
            ColorSample::Rgba([0, 50, 100, 100])
        );
    }
}
