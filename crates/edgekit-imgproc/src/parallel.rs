use std::time::Instant;

use rayon::prelude::*;
use thiserror::Error;

use edgekit_image::{Bounds, ColorSample, Image, Point, CHANNELS};

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The window size of a window mapper must be valid.
    #[error("window size must be > 0, got {0}")]
    InvalidWindowSize(usize),

    /// A window function returned a patch of the wrong side length.
    #[error("window function returned a {actual}x{actual} patch, expected {expected}x{expected}")]
    PatchSizeMismatch {
        /// the window size of the mapper
        expected: usize,
        /// the side length of the returned patch
        actual: usize,
    },
}

/// Controls how the mappers are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    Serial,

    /// Use the global Rayon thread pool and hand out whole output rows.
    #[default]
    ParallelRows,

    /// Run on a local thread pool with `n` threads.
    ///
    /// The pool is built for one mapper call and joined before the call returns,
    /// so no worker outlives it.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// A local pool sized to the number of available execution units.
    pub fn available() -> Self {
        let n = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        ExecutionStrategy::Fixed(n)
    }

    /// Check the strategy before any work is scheduled.
    pub fn validate(&self) -> Result<(), ParallelError> {
        match *self {
            ExecutionStrategy::Fixed(0) => Err(ParallelError::InvalidThreadCount(0)),
            _ => Ok(()),
        }
    }
}

/// A square matrix of samples returned by a window function.
///
/// Samples are addressed by `(dx, dy)` relative to the window anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct Patch {
    size: usize,
    samples: Vec<ColorSample>,
}

impl Patch {
    /// Create a patch of side `size` with every sample set to `val`.
    pub fn filled(size: usize, val: ColorSample) -> Self {
        Self {
            size,
            samples: vec![val; size * size],
        }
    }

    /// Create a patch of side `size` by evaluating `f(dx, dy)` for every entry.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> ColorSample) -> Self {
        let mut samples = Vec::with_capacity(size * size);
        for dy in 0..size {
            for dx in 0..size {
                samples.push(f(dx, dy));
            }
        }
        Self { size, samples }
    }

    /// Side length of the patch.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the sample at `(dx, dy)`.
    pub fn get(&self, dx: usize, dy: usize) -> Option<ColorSample> {
        if dx >= self.size || dy >= self.size {
            return None;
        }
        Some(self.samples[dy * self.size + dx])
    }

    /// Set the sample at `(dx, dy)`. Returns `false` when the entry does not exist.
    pub fn set(&mut self, dx: usize, dy: usize, val: ColorSample) -> bool {
        if dx >= self.size || dy >= self.size {
            return false;
        }
        self.samples[dy * self.size + dx] = val;
        true
    }
}

/// Anchors visited by [`map_windows`]: a grid of stride `window_size` starting
/// at the top-left corner of `bounds`, in row-major order.
///
/// # Errors
///
/// Returns [`ParallelError::InvalidWindowSize`] if `window_size` is zero.
pub fn window_anchors(
    bounds: Bounds,
    window_size: usize,
) -> Result<impl Iterator<Item = Point>, ParallelError> {
    if window_size == 0 {
        return Err(ParallelError::InvalidWindowSize(window_size));
    }
    let (min, max) = (bounds.min(), bounds.max());
    Ok((min.y..max.y).step_by(window_size).flat_map(move |y| {
        (min.x..max.x)
            .step_by(window_size)
            .map(move |x| Point::new(x, y))
    }))
}

/// Coordinates written for the window anchored at `anchor`, clipped to `bounds`.
pub fn window_footprint(
    bounds: Bounds,
    anchor: Point,
    window_size: usize,
) -> impl Iterator<Item = Point> {
    let size = i32::try_from(window_size).unwrap_or(i32::MAX);
    let (min, max) = (bounds.min(), bounds.max());
    let (x0, x1) = (anchor.x.max(min.x), anchor.x.saturating_add(size).min(max.x));
    let (y0, y1) = (anchor.y.max(min.y), anchor.y.saturating_add(size).min(max.y));
    (y0..y1).flat_map(move |y| (x0..x1).map(move |x| Point::new(x, y)))
}

fn build_pool(num_threads: usize) -> Result<rayon::ThreadPool, ParallelError> {
    if num_threads == 0 {
        return Err(ParallelError::InvalidThreadCount(num_threads));
    }
    log::trace!("building a local pool with {num_threads} threads");
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .map_err(|e| ParallelError::BuildError(e.to_string()))
}

/// Run `op` over consecutive chunks of `dst` of length `chunk_len` (the last
/// one may be shorter), passing the chunk index.
fn for_each_chunk<F>(
    dst: &mut [u16],
    chunk_len: usize,
    strategy: ExecutionStrategy,
    op: F,
) -> Result<(), ParallelError>
where
    F: Fn(usize, &mut [u16]) -> Result<(), ParallelError> + Send + Sync,
{
    match strategy {
        ExecutionStrategy::Serial => dst
            .chunks_mut(chunk_len)
            .enumerate()
            .try_for_each(|(i, chunk)| op(i, chunk)),
        ExecutionStrategy::ParallelRows => dst
            .par_chunks_mut(chunk_len)
            .enumerate()
            .try_for_each(|(i, chunk)| op(i, chunk)),
        ExecutionStrategy::Fixed(n) => {
            let pool = build_pool(n)?;
            pool.install(|| {
                dst.par_chunks_mut(chunk_len)
                    .enumerate()
                    .try_for_each(|(i, chunk)| op(i, chunk))
            })
        }
    }
}

/// Apply a pixel function to every coordinate of an image.
///
/// The output has the bounds of `src` and holds `f(p, src)` at every point
/// `p`. Each output row is owned by exactly one worker, so the result does
/// not depend on scheduling. The call returns once every row is written.
///
/// # Arguments
///
/// * `src` - The read-only source image.
/// * `strategy` - How to distribute the rows across threads.
/// * `f` - The pixel function. It must not panic for in-bounds points.
///
/// # Examples
///
/// ```
/// use edgekit_image::{ColorSample, Image, Point};
/// use edgekit_imgproc::parallel::{map_pixels, ExecutionStrategy};
///
/// let src = Image::from_size_val([4, 3].into(), ColorSample::Gray(0));
/// let dst = map_pixels(&src, ExecutionStrategy::ParallelRows, |p, _| {
///     ColorSample::Gray((p.x * p.y) as u16)
/// })
/// .unwrap();
///
/// assert_eq!(dst.at(Point::new(3, 2)).red(), 6);
/// ```
pub fn map_pixels<F>(src: &Image, strategy: ExecutionStrategy, f: F) -> Result<Image, ParallelError>
where
    F: Fn(Point, &Image) -> ColorSample + Send + Sync,
{
    strategy.validate()?;

    let bounds = src.bounds();
    let mut dst = Image::from_bounds_val(bounds, ColorSample::TRANSPARENT);
    if bounds.is_empty() {
        return Ok(dst);
    }

    let start = Instant::now();
    let (min_x, min_y) = (bounds.min().x, bounds.min().y);
    let stride = dst.row_stride();

    for_each_chunk(dst.as_slice_mut(), stride, strategy, |row, dst_row| {
        let y = min_y + row as i32;
        dst_row
            .chunks_exact_mut(CHANNELS)
            .enumerate()
            .for_each(|(col, dst_pixel)| {
                let p = Point::new(min_x + col as i32, y);
                dst_pixel.copy_from_slice(&f(p, src).rgba());
            });
        Ok(())
    })?;

    log::debug!(
        "mapped {}x{} pixels with {:?} in {:?}",
        bounds.width(),
        bounds.height(),
        strategy,
        start.elapsed()
    );

    Ok(dst)
}

/// Apply a window function over a non-overlapping grid of anchors.
///
/// Anchors are the points of [`window_anchors`]. The patch returned for an
/// anchor is written to its [`window_footprint`], so distinct anchors never
/// write the same output pixel and every pixel is written exactly once.
/// Bands of `window_size` rows are distributed across threads.
///
/// A window size larger than the longest side of `src` covers the same
/// pixels as one of that side, so it is reduced to it and `f` is called with
/// the reduced size.
///
/// # Arguments
///
/// * `src` - The read-only source image.
/// * `window_size` - The side length of the patches, must be > 0.
/// * `strategy` - How to distribute the bands across threads.
/// * `f` - The window function, returning a `window_size` square patch.
///
/// # Errors
///
/// Returns [`ParallelError::InvalidWindowSize`] for a zero window size before
/// any work starts, and [`ParallelError::PatchSizeMismatch`] if `f` returns a
/// patch of another size.
pub fn map_windows<F>(
    src: &Image,
    window_size: usize,
    strategy: ExecutionStrategy,
    f: F,
) -> Result<Image, ParallelError>
where
    F: Fn(Point, &Image, usize) -> Patch + Send + Sync,
{
    if window_size == 0 {
        return Err(ParallelError::InvalidWindowSize(window_size));
    }
    strategy.validate()?;

    let bounds = src.bounds();
    let mut dst = Image::from_bounds_val(bounds, ColorSample::TRANSPARENT);
    if bounds.is_empty() {
        return Ok(dst);
    }

    let window_size = window_size.min(bounds.width().max(bounds.height()));

    let start = Instant::now();
    let (min_x, min_y) = (bounds.min().x, bounds.min().y);
    let width = bounds.width();
    let stride = dst.row_stride();

    for_each_chunk(
        dst.as_slice_mut(),
        stride * window_size.min(bounds.height()),
        strategy,
        |band, dst_band| {
            let anchor_y = min_y + (band * window_size) as i32;

            for tile_x in (0..width).step_by(window_size) {
                let anchor = Point::new(min_x + tile_x as i32, anchor_y);
                let patch = f(anchor, src, window_size);
                if patch.size() != window_size {
                    return Err(ParallelError::PatchSizeMismatch {
                        expected: window_size,
                        actual: patch.size(),
                    });
                }

                let tile_cols = window_size.min(width - tile_x);
                for (dy, dst_row) in dst_band.chunks_exact_mut(stride).enumerate() {
                    for dx in 0..tile_cols {
                        let offset = (tile_x + dx) * CHANNELS;
                        let sample = patch.samples[dy * window_size + dx];
                        dst_row[offset..offset + CHANNELS].copy_from_slice(&sample.rgba());
                    }
                }
            }
            Ok(())
        },
    )?;

    log::debug!(
        "mapped {}x{} pixels in {}x{} windows with {:?} in {:?}",
        bounds.width(),
        bounds.height(),
        window_size,
        window_size,
        strategy,
        start.elapsed()
    );

    Ok(dst)
}

/// Lift a pixel function into a window function that evaluates it on every
/// entry of the patch. Entries outside the source bounds are transparent.
pub fn pixel_window<F>(f: F) -> impl Fn(Point, &Image, usize) -> Patch + Send + Sync
where
    F: Fn(Point, &Image) -> ColorSample + Send + Sync,
{
    move |anchor: Point, src: &Image, window_size: usize| {
        Patch::from_fn(window_size, |dx, dy| {
            let p = anchor.offset(dx as i32, dy as i32);
            if src.bounds().contains(p) {
                f(p, src)
            } else {
                ColorSample::TRANSPARENT
            }
        })
    }
}
