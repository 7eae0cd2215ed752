//! Difference-of-Gaussians edge detection.

use tracing::debug;

use crate::grid::{Grid, GridError};
use crate::kernel::gaussian_vector;

/// Ratio between the wide and the narrow deviation.
pub const SIGMA_RATIO: f32 = 1.6;

/// Output value the strongest response is mapped to.
pub const DOG_RANGE: f32 = 255.0;

/// Kernel radius used for a narrow deviation `sigma`: three wide
/// deviations, rounded up.
pub fn dog_radius(sigma: f32) -> usize {
    let radius = (3.0 * SIGMA_RATIO * sigma).ceil();
    if radius > 0.0 {
        radius as usize
    } else {
        0
    }
}

/// `|blur(1.6·sigma) - blur(sigma)|`, rescaled so the strongest response
/// is [`DOG_RANGE`].
///
/// Both blurs use the same `2r + 1` kernel extent with `r` from
/// [`dog_radius`]. The border is extended by repeating edge pixels and
/// both blurs are rounded to whole intensity levels, so flat regions
/// (including a fully constant image) respond with exactly zero. When
/// nothing responds the output is all zero.
pub fn dog(image: &Grid<i32>, sigma: f32) -> Result<Grid<f32>, GridError> {
    let (height, width) = image.shape();
    if image.is_empty() {
        return Ok(Grid::new(height, width));
    }

    let radius = dog_radius(sigma);
    let size = 2 * radius + 1;
    debug!(sigma, radius, size, "difference of gaussians");

    let extended = image.pad_edge(radius, radius);
    let narrow_taps = gaussian_vector(size, sigma)?;
    let wide_taps = gaussian_vector(size, SIGMA_RATIO * sigma)?;
    let narrow = extended.convolve_separable(&narrow_taps, &narrow_taps)?;
    let wide = extended.convolve_separable(&wide_taps, &wide_taps)?;

    let response = wide
        .zip_with(&narrow, |a, b| (a - b).abs())?
        .slice(radius, radius, height, width)?;

    let max = response.max_value().unwrap_or(0);
    if max == 0 {
        return Ok(Grid::new(height, width));
    }
    let factor = DOG_RANGE / max as f32;
    Ok(response.map(|v| v as f32 * factor))
}
