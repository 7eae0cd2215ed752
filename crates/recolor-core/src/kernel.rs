//! Gaussian kernel construction.

use std::f64::consts::PI;

use crate::grid::{Element, Grid, GridError};

/// Unnormalized Gaussian weight at distance `d` from the center.
#[inline]
fn gaussian(d: f64, deviation: f64) -> f64 {
    (-(d * d) / (2.0 * deviation * deviation)).exp() / ((2.0 * PI).sqrt() * deviation)
}

fn check_size(size: usize) -> Result<(), GridError> {
    if size % 2 == 0 {
        return Err(GridError::InvalidKernelSize {
            height: size,
            width: size,
        });
    }
    Ok(())
}

/// Normalized `size × size` Gaussian kernel.
///
/// Each cell is weighted by its Euclidean distance to the center cell
/// `size / 2`; the weights are then divided by their sum so the kernel
/// totals 1. A non-positive `deviation` degenerates to the identity
/// kernel (all weight on the center).
///
/// # Errors
///
/// [`GridError::InvalidKernelSize`] if `size` is even.
///
/// # Example
///
/// ```
/// use recolor_core::gaussian_kernel;
///
/// let kernel = gaussian_kernel(5, 1.0).unwrap();
/// let total: f32 = kernel.as_slice().iter().sum();
/// assert!((total - 1.0).abs() < 1e-5);
/// ```
pub fn gaussian_kernel(size: usize, deviation: f32) -> Result<Grid<f32>, GridError> {
    check_size(size)?;
    let center = (size / 2) as f64;
    let deviation = deviation as f64;

    if !(deviation > 0.0) {
        let mut kernel = Grid::new(size, size);
        kernel[(size / 2, size / 2)] = 1.0;
        return Ok(kernel);
    }

    let weights = Grid::from_fn(size, size, |y, x| {
        let dy = y as f64 - center;
        let dx = x as f64 - center;
        gaussian((dy * dy + dx * dx).sqrt(), deviation)
    });
    let total: f64 = weights.as_slice().iter().sum();
    Ok(weights.map(|w| (w / total) as f32))
}

/// Normalized 1-D Gaussian of odd length `size`.
///
/// `outer(v, v)` of this vector equals [`gaussian_kernel`] with the same
/// arguments, so it can drive a separable blur.
pub fn gaussian_vector(size: usize, deviation: f32) -> Result<Vec<f32>, GridError> {
    check_size(size)?;
    let center = (size / 2) as f64;
    let deviation = deviation as f64;

    if !(deviation > 0.0) {
        let mut taps = vec![0.0; size];
        taps[size / 2] = 1.0;
        return Ok(taps);
    }

    let weights: Vec<f64> = (0..size)
        .map(|i| gaussian(i as f64 - center, deviation))
        .collect();
    let total: f64 = weights.iter().sum();
    Ok(weights.into_iter().map(|w| (w / total) as f32).collect())
}

/// Kernel size and deviation used for a blur of the given pixel radius.
///
/// The kernel spans `2 * radius + 1` cells and the deviation is half the
/// radius, so the kernel edge sits two deviations from the center.
pub fn blur_parameters(radius: usize) -> (usize, f32) {
    (2 * radius + 1, radius as f32 / 2.0)
}

impl<T: Element> Grid<T> {
    /// Gaussian blur through the separable path.
    pub fn gaussian_blur(&self, size: usize, deviation: f32) -> Result<Grid<T>, GridError> {
        let taps = gaussian_vector(size, deviation)?;
        self.convolve_separable(&taps, &taps)
    }

    /// Gaussian blur blended with the original through `mask`.
    pub fn gaussian_blur_masked(
        &self,
        size: usize,
        deviation: f32,
        mask: &Grid<f32>,
    ) -> Result<Grid<T>, GridError> {
        let taps = gaussian_vector(size, deviation)?;
        self.convolve_separable_masked(&taps, &taps, mask)
    }
}
