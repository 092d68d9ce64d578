use crate::error::ImageError;

/// An integer coordinate in the image plane.
///
/// Points are signed so that neighborhood offsets can be computed before
/// checking them against the image [`Bounds`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return this point shifted by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point { x, y }
    }
}

/// Image size in pixels
///
/// # Examples
///
/// ```
/// use edgekit_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// The half-open rectangle `[min.x, max.x) × [min.y, max.y)` of valid coordinates.
///
/// Invariant: `min.x <= max.x` and `min.y <= max.y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds {
    min: Point,
    max: Point,
}

impl Bounds {
    /// Create new bounds from the inclusive `min` and exclusive `max` corners.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidBounds`] if `min` exceeds `max` on any axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgekit_image::{Bounds, Point};
    ///
    /// let bounds = Bounds::new(Point::new(-2, 1), Point::new(3, 4)).unwrap();
    /// assert_eq!(bounds.width(), 5);
    /// assert_eq!(bounds.height(), 3);
    ///
    /// assert!(Bounds::new(Point::new(1, 0), Point::new(0, 0)).is_err());
    /// ```
    pub fn new(min: Point, max: Point) -> Result<Self, ImageError> {
        if min.x > max.x || min.y > max.y {
            return Err(ImageError::InvalidBounds(min, max));
        }
        Ok(Self { min, max })
    }

    /// Bounds anchored at the origin with the given size.
    pub fn from_size(size: ImageSize) -> Self {
        Self {
            min: Point::new(0, 0),
            max: Point::new(size.width as i32, size.height as i32),
        }
    }

    /// The inclusive top-left corner.
    pub fn min(&self) -> Point {
        self.min
    }

    /// The exclusive bottom-right corner.
    pub fn max(&self) -> Point {
        self.max
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        (self.max.x - self.min.x) as usize
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        (self.max.y - self.min.y) as usize
    }

    /// The size of the bounds in pixels.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Whether the bounds contain no coordinate at all.
    pub fn is_empty(&self) -> bool {
        self.min.x == self.max.x || self.min.y == self.max.y
    }

    /// Whether `p` lies inside the bounds.
    pub fn contains(&self, p: Point) -> bool {
        self.min.x <= p.x && p.x < self.max.x && self.min.y <= p.y && p.y < self.max.y
    }

    /// Whether the `(2 * radius + 1)` square footprint centered at `center`
    /// lies fully inside the bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgekit_image::{Bounds, ImageSize, Point};
    ///
    /// let bounds = Bounds::from_size(ImageSize { width: 5, height: 5 });
    /// assert!(bounds.contains_window(Point::new(2, 2), 2));
    /// assert!(!bounds.contains_window(Point::new(1, 2), 2));
    /// ```
    pub fn contains_window(&self, center: Point, radius: i32) -> bool {
        self.contains(center.offset(-radius, -radius)) && self.contains(center.offset(radius, radius))
    }

    /// Iterate over every coordinate in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let (min, max) = (self.min, self.max);
        (min.y..max.y).flat_map(move |y| (min.x..max.x).map(move |x| Point::new(x, y)))
    }

    /// Linear pixel index of `p` in row-major order, if it lies inside.
    pub fn index_of(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        let row = (p.y - self.min.y) as usize;
        let col = (p.x - self.min.x) as usize;
        Some(row * self.width() + col)
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{}, {})", self.min, self.max)
    }
}

impl From<ImageSize> for Bounds {
    fn from(size: ImageSize) -> Self {
        Bounds::from_size(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_invariant() {
        assert_eq!(
            Bounds::new(Point::new(0, 3), Point::new(4, 2)),
            Err(ImageError::InvalidBounds(Point::new(0, 3), Point::new(4, 2)))
        );
        let empty = Bounds::new(Point::new(2, 2), Point::new(2, 5)).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.points().count(), 0);
    }

    #[test]
    fn bounds_contains() -> Result<(), ImageError> {
        let bounds = Bounds::new(Point::new(-1, -1), Point::new(2, 3))?;
        assert!(bounds.contains(Point::new(-1, -1)));
        assert!(bounds.contains(Point::new(1, 2)));
        assert!(!bounds.contains(Point::new(2, 0)));
        assert!(!bounds.contains(Point::new(0, 3)));
        assert!(!bounds.contains(Point::new(-2, 0)));
        Ok(())
    }

    #[test]
    fn bounds_points_row_major() -> Result<(), ImageError> {
        let bounds = Bounds::new(Point::new(1, 10), Point::new(3, 12))?;
        let points = bounds.points().collect::<Vec<_>>();
        assert_eq!(
            points,
            vec![
                Point::new(1, 10),
                Point::new(2, 10),
                Point::new(1, 11),
                Point::new(2, 11)
            ]
        );
        for (i, p) in points.iter().enumerate() {
            assert_eq!(bounds.index_of(*p), Some(i));
        }
        assert_eq!(bounds.index_of(Point::new(0, 10)), None);
        Ok(())
    }

    #[test]
    fn bounds_window() {
        let bounds = Bounds::from_size([7, 7].into());
        assert!(bounds.contains_window(Point::new(3, 3), 3));
        assert!(!bounds.contains_window(Point::new(3, 4), 3));
        assert!(bounds.contains_window(Point::new(6, 6), 0));
    }
}
