use std::f64::consts::PI;

use crate::error::TransformError;

/// Horizontal sobel kernel, indexed `[i][j]` for the sample at `(x0 + i, y0 + j)`.
pub const SOBEL_X: [[f64; 3]; 3] = [[1.0, 2.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -2.0, -1.0]];

/// Vertical sobel kernel, indexed `[i][j]` for the sample at `(x0 + i, y0 + j)`.
pub const SOBEL_Y: [[f64; 3]; 3] = [[1.0, 0.0, -1.0], [2.0, 0.0, -2.0], [1.0, 0.0, -1.0]];

/// A normalized, radially symmetric 2D gaussian kernel.
///
/// The kernel has `(2 * radius + 1)` rows and columns and its entries sum to 1.
/// It is immutable once built and can be shared freely between threads.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianKernel {
    radius: usize,
    sigma: f64,
    weights: Vec<f64>,
}

impl GaussianKernel {
    /// Largest supported radius, a 1025x1025 kernel.
    pub const MAX_RADIUS: usize = 512;

    /// Create a kernel for `radius` with `sigma = max(radius / 2, 1)`.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidKernel`] if the radius is zero or above
    /// [`GaussianKernel::MAX_RADIUS`].
    ///
    /// # Examples
    ///
    /// ```
    /// use edgekit_imgproc::filter::kernels::GaussianKernel;
    ///
    /// let kernel = GaussianKernel::new(3).unwrap();
    /// assert_eq!(kernel.size(), 7);
    /// assert_eq!(kernel.sigma(), 1.5);
    ///
    /// let sum = kernel.as_slice().iter().sum::<f64>();
    /// assert!((sum - 1.0).abs() < 1e-9);
    /// ```
    pub fn new(radius: usize) -> Result<Self, TransformError> {
        let sigma = (radius as f64 / 2.0).max(1.0);
        Self::with_sigma(radius, sigma)
    }

    /// Create a kernel for `radius` with an explicit `sigma`.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidKernel`] if the radius is not in
    /// `1..=MAX_RADIUS` or the sigma is not a finite positive number.
    pub fn with_sigma(radius: usize, sigma: f64) -> Result<Self, TransformError> {
        if !(1..=Self::MAX_RADIUS).contains(&radius) || !sigma.is_finite() || sigma <= 0.0 {
            return Err(TransformError::InvalidKernel { radius, sigma });
        }

        let size = 2 * radius + 1;
        let center = radius as f64 + 1.0;
        let two_sigma_sq = 2.0 * sigma * sigma;
        let scale = 1.0 / (PI * two_sigma_sq);

        // compute the kernel, 1-indexed as in the closed form
        let mut weights = Vec::with_capacity(size * size);
        for i in 1..=size {
            for j in 1..=size {
                let di = i as f64 - center;
                let dj = j as f64 - center;
                weights.push(scale * (-(di * di + dj * dj) / two_sigma_sq).exp());
            }
        }

        // normalize the kernel
        let norm = weights.iter().sum::<f64>();
        weights.iter_mut().for_each(|w| *w /= norm);

        Ok(Self {
            radius,
            sigma,
            weights,
        })
    }

    /// The kernel radius.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// The standard deviation used to build the kernel.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// The side length of the kernel, `2 * radius + 1`.
    pub fn size(&self) -> usize {
        2 * self.radius + 1
    }

    /// The weight at row `i` and column `j`, both zero-indexed.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        let size = self.size();
        if i >= size || j >= size {
            return None;
        }
        Some(self.weights[i * size + j])
    }

    /// The weights in row-major order.
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    /// The weights as a vector of rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.weights
            .chunks_exact(self.size())
            .map(|row| row.to_vec())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gaussian_kernel_normalized() -> Result<(), TransformError> {
        for radius in 1..8 {
            let kernel = GaussianKernel::new(radius)?;
            assert_eq!(kernel.as_slice().len(), kernel.size() * kernel.size());
            assert_relative_eq!(kernel.as_slice().iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_sigma() -> Result<(), TransformError> {
        assert_eq!(GaussianKernel::new(1)?.sigma(), 1.0);
        assert_eq!(GaussianKernel::new(2)?.sigma(), 1.0);
        assert_eq!(GaussianKernel::new(5)?.sigma(), 2.5);
        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_radially_symmetric() -> Result<(), TransformError> {
        let k = GaussianKernel::new(2)?.to_rows();

        // corners
        assert_eq!(k[0][0], k[0][4]);
        assert_eq!(k[0][0], k[4][0]);
        assert_eq!(k[0][0], k[4][4]);

        // off-axis edge entries
        for (i, j) in [(0, 3), (1, 0), (1, 4), (3, 0), (3, 4), (4, 1), (4, 3)] {
            assert_eq!(k[0][1], k[i][j], "[0][1] vs [{i}][{j}]");
        }

        // edge midpoints
        assert_eq!(k[0][2], k[2][0]);
        assert_eq!(k[0][2], k[2][4]);
        assert_eq!(k[0][2], k[4][2]);

        // inner ring
        assert_eq!(k[1][1], k[1][3]);
        assert_eq!(k[1][1], k[3][1]);
        assert_eq!(k[1][1], k[3][3]);
        assert_eq!(k[1][2], k[2][1]);
        assert_eq!(k[1][2], k[2][3]);
        assert_eq!(k[1][2], k[3][2]);
        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_matches_reference() -> Result<(), TransformError> {
        let reference = [
            [1.0, 4.0, 7.0, 4.0, 1.0],
            [4.0, 16.0, 26.0, 16.0, 4.0],
            [7.0, 26.0, 41.0, 26.0, 7.0],
            [4.0, 16.0, 26.0, 16.0, 4.0],
            [1.0, 4.0, 7.0, 4.0, 1.0],
        ];
        let kernel = GaussianKernel::new(2)?;
        assert_eq!(kernel.size(), 5);
        for (i, row) in reference.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                let expected = v / 273.0;
                let actual = kernel.get(i, j).unwrap_or(f64::NAN);
                assert!(
                    (expected - actual).abs() < 0.012,
                    "value [{i},{j}] outside of tolerance ex: {expected}, ac: {actual}"
                );
            }
        }
        assert_eq!(kernel.get(5, 0), None);
        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_invalid() {
        assert_eq!(
            GaussianKernel::new(0),
            Err(TransformError::InvalidKernel {
                radius: 0,
                sigma: 1.0
            })
        );
        assert!(GaussianKernel::with_sigma(2, 0.0).is_err());
        assert!(GaussianKernel::with_sigma(2, f64::NAN).is_err());
        assert!(GaussianKernel::with_sigma(2, 0.8).is_ok());
    }

    #[test]
    fn test_gaussian_kernel_radius_limit() -> Result<(), TransformError> {
        let kernel = GaussianKernel::new(GaussianKernel::MAX_RADIUS)?;
        assert_eq!(kernel.size(), 1025);

        assert_eq!(
            GaussianKernel::new(GaussianKernel::MAX_RADIUS + 1),
            Err(TransformError::InvalidKernel {
                radius: 513,
                sigma: 256.5
            })
        );
        // rejected before the table is allocated
        assert!(GaussianKernel::new(100_000).is_err());
        assert!(GaussianKernel::with_sigma(usize::MAX, 1.0).is_err());
        Ok(())
    }
}
