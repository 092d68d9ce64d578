use edgekit_image::{ops::saturate_channel, Bounds, ColorSample, Image, Point};

use super::kernels::{SOBEL_X, SOBEL_Y};

/// Neighbor offsets compared during non-maximum suppression, by gradient sector.
const DIAGONAL: [(i32, i32); 2] = [(1, 1), (-1, -1)];
const VERTICAL: [(i32, i32); 2] = [(0, 1), (0, -1)];
const ANTI_DIAGONAL: [(i32, i32); 2] = [(1, -1), (-1, 1)];
const HORIZONTAL: [(i32, i32); 2] = [(1, 0), (-1, 0)];

/// Clamp the center of a 3x3 window so that the window stays inside `bounds`.
///
/// Returns `None` when the bounds are narrower or shorter than 3 pixels.
fn clamp_center(bounds: Bounds, p: Point) -> Option<Point> {
    if bounds.width() < 3 || bounds.height() < 3 {
        return None;
    }
    let (min, max) = (bounds.min(), bounds.max());
    Some(Point::new(
        p.x.clamp(min.x + 1, max.x - 2),
        p.y.clamp(min.y + 1, max.y - 2),
    ))
}

/// Compute the sobel gradient `(gx, gy)` of the red channel around `p`.
///
/// The 3x3 window is shifted inward near the borders, so edge rows and
/// columns are sampled more than once. Returns `None` for images smaller
/// than the window.
pub fn sobel_gradient(p: Point, src: &Image) -> Option<(f64, f64)> {
    let center = clamp_center(src.bounds(), p)?;
    let mut gx = 0.0;
    let mut gy = 0.0;
    for i in 0..3 {
        for j in 0..3 {
            let q = center.offset(i as i32 - 1, j as i32 - 1);
            let v = src.at(q).red() as f64;
            gx += SOBEL_X[i][j] * v;
            gy += SOBEL_Y[i][j] * v;
        }
    }
    Some((gx, gy))
}

/// The gradient magnitude `sqrt(gx² + gy²)` around `p`, zero for images
/// smaller than the sobel window.
pub fn sobel_magnitude(p: Point, src: &Image) -> f64 {
    sobel_gradient(p, src)
        .map(|(gx, gy)| gx.hypot(gy))
        .unwrap_or(0.0)
}

/// The two neighbor offsets lying along the gradient direction.
///
/// The angle `atan2(gy, gx)` is folded into `[0, 180)` degrees and bucketed
/// into 45° sectors bounded at 22.5°, 67.5°, 112.5° and 157.5°.
pub fn suppression_neighbors(gx: f64, gy: f64) -> [(i32, i32); 2] {
    let mut theta = gy.atan2(gx).to_degrees();
    if theta < 0.0 {
        theta += 180.0;
    }
    if (22.5..67.5).contains(&theta) {
        DIAGONAL
    } else if (67.5..112.5).contains(&theta) {
        VERTICAL
    } else if (112.5..157.5).contains(&theta) {
        ANTI_DIAGONAL
    } else {
        HORIZONTAL
    }
}

/// Sobel edge strength with non-maximum suppression for one pixel.
///
/// The gradient magnitude at `p` is kept only if it is strictly greater than
/// the magnitudes of both neighbors along the gradient direction, otherwise
/// the pixel is zero. The result is a grey sample.
///
/// # Examples
///
/// ```
/// use edgekit_image::{ColorSample, Image, Point};
/// use edgekit_imgproc::filter::sobel_pixel;
///
/// let flat = Image::from_size_val([5, 5].into(), ColorSample::Gray(1234));
/// assert_eq!(sobel_pixel(Point::new(2, 2), &flat), ColorSample::Gray(0));
/// ```
pub fn sobel_pixel(p: Point, src: &Image) -> ColorSample {
    let Some((gx, gy)) = sobel_gradient(p, src) else {
        return ColorSample::Gray(0);
    };
    let g = gx.hypot(gy);

    let keep = suppression_neighbors(gx, gy)
        .iter()
        .all(|&(dx, dy)| g > sobel_magnitude(p.offset(dx, dy), src));

    if keep {
        ColorSample::Gray(saturate_channel(g))
    } else {
        ColorSample::Gray(0)
    }
}
