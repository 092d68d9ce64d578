use edgekit_image::{ops::saturate_channel, ColorSample, Image, Point, CHANNELS};

use super::kernels::GaussianKernel;

/// Blur one pixel with a gaussian kernel.
///
/// If the kernel footprint centered at `p` fits inside the image bounds, every
/// channel is the kernel-weighted sum of the footprint. Otherwise the source
/// pixel is returned unchanged, so border pixels are not blurred.
///
/// # Arguments
///
/// * `kernel` - The normalized gaussian kernel.
/// * `p` - The point to compute.
/// * `src` - The source image.
///
/// # Examples
///
/// ```
/// use edgekit_image::{ColorSample, Image, Point};
/// use edgekit_imgproc::filter::{gaussian_pixel, kernels::GaussianKernel};
///
/// let kernel = GaussianKernel::new(1).unwrap();
/// let src = Image::from_size_val([3, 3].into(), ColorSample::Rgba([100, 200, 300, 400]));
///
/// let blurred = gaussian_pixel(&kernel, Point::new(1, 1), &src);
/// assert_eq!(blurred, ColorSample::Rgba([100, 200, 300, 400]));
/// ```
pub fn gaussian_pixel(kernel: &GaussianKernel, p: Point, src: &Image) -> ColorSample {
    let radius = kernel.radius() as i32;
    if !src.bounds().contains_window(p, radius) {
        return src.at(p);
    }

    let mut sum = [0.0f64; CHANNELS];
    for (i, row) in kernel.as_slice().chunks_exact(kernel.size()).enumerate() {
        for (j, &w) in row.iter().enumerate() {
            let q = p.offset(i as i32 - radius, j as i32 - radius);
            let sample = src.at(q).rgba();
            for ch in 0..CHANNELS {
                sum[ch] += w * sample[ch] as f64;
            }
        }
    }

    ColorSample::Rgba(sum.map(saturate_channel))
}
