use edgekit_image::{ColorSample, Image, Point};

/// The 8-connected neighborhood.
const NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Minimum number of lit neighbors needed to fill a gap.
pub const MIN_LIT_NEIGHBORS: u32 = 3;

/// Close small breaks in thinned edges by majority vote.
///
/// A pixel whose red intensity is nonzero passes through. Otherwise the
/// neighbors inside the image are inspected: if fewer than
/// [`MIN_LIT_NEIGHBORS`] of them are lit the pixel stays black, else it
/// takes the truncated mean intensity of the lit neighbors.
///
/// # Examples
///
/// ```
/// use edgekit_image::{Bounds, ColorSample, Image, Point};
/// use edgekit_imgproc::edges::fill_in_gaps;
///
/// let image = Image::from_fn(Bounds::from_size([3, 3].into()), |p| match (p.x, p.y) {
///     (0, 0) | (2, 0) | (0, 2) => ColorSample::Gray(10),
///     _ => ColorSample::Gray(0),
/// });
/// assert_eq!(fill_in_gaps(Point::new(1, 1), &image), ColorSample::Gray(10));
/// ```
pub fn fill_in_gaps(p: Point, src: &Image) -> ColorSample {
    let sample = src.at(p);
    if sample.red() > 0 {
        return sample;
    }

    let (sum, count) = NEIGHBORS
        .iter()
        .filter_map(|&(dx, dy)| src.get(p.offset(dx, dy)))
        .map(|neighbor| neighbor.red() as u32)
        .filter(|&r| r > 0)
        .fold((0u32, 0u32), |(sum, count), r| (sum + r, count + 1));

    if count < MIN_LIT_NEIGHBORS {
        return ColorSample::Gray(0);
    }
    ColorSample::Gray((sum / count) as u16)
}
