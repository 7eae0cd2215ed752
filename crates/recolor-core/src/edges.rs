//! Sobel edge detection.
//!
//! The Sobel operator is separable: one axis is smoothed with
//! [`SMOOTHING`] while the other is differentiated with [`DIFFERENCE`].
//! Every output map is divided by its own maximum, so strengths land in
//! `[0, 1]`. A flat input (maximum 0) yields an all-zero map.

use crate::grid::{Element, Grid, GridError};

/// Smoothing taps of the Sobel operator.
pub const SMOOTHING: [f32; 3] = [1.0, 2.0, 1.0];

/// Central difference taps of the Sobel operator.
pub const DIFFERENCE: [f32; 3] = [-1.0, 0.0, 1.0];

/// Horizontal gradient before normalization.
fn gradient_x<T: Element>(image: &Grid<T>) -> Result<Grid<f32>, GridError> {
    image.cast::<f32>().convolve_separable(&SMOOTHING, &DIFFERENCE)
}

/// Vertical gradient before normalization.
fn gradient_y<T: Element>(image: &Grid<T>) -> Result<Grid<f32>, GridError> {
    image.cast::<f32>().convolve_separable(&DIFFERENCE, &SMOOTHING)
}

/// Gradient magnitude `sqrt(gx² + gy²)`, normalized to `[0, 1]`.
pub fn sobel<T: Element>(image: &Grid<T>) -> Result<Grid<f32>, GridError> {
    let gx = gradient_x(image)?;
    let gy = gradient_y(image)?;
    let magnitude = gx.zip_with(&gy, |h, v| (h * h + v * v).sqrt())?;
    Ok(magnitude.normalize())
}

/// Absolute horizontal gradient, normalized to `[0, 1]`.
///
/// Responds to vertical edges (intensity changing along a row).
pub fn horizontal<T: Element>(image: &Grid<T>) -> Result<Grid<f32>, GridError> {
    Ok(gradient_x(image)?.map(f32::abs).normalize())
}

/// Absolute vertical gradient, normalized to `[0, 1]`.
pub fn vertical<T: Element>(image: &Grid<T>) -> Result<Grid<f32>, GridError> {
    Ok(gradient_y(image)?.map(f32::abs).normalize())
}
