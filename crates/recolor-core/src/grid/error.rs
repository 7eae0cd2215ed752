//! Error type for grid shape and access failures.

use thiserror::Error;

/// Failure of a grid operation. All variants abort the operation that
/// raised them; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A binary operation was given grids of different shapes, or a buffer
    /// whose length does not match the requested shape.
    #[error("dimension mismatch: expected {expected_height}x{expected_width}, got {actual_height}x{actual_width}")]
    DimensionMismatch {
        expected_height: usize,
        expected_width: usize,
        actual_height: usize,
        actual_width: usize,
    },

    /// Convolution kernels must have odd extents so they have a center cell.
    #[error("invalid kernel size {height}x{width}: both extents must be odd")]
    InvalidKernelSize { height: usize, width: usize },

    /// A checked accessor or slice reached past the grid extent.
    #[error("region at ({y}, {x}) of size {height}x{width} exceeds grid of {grid_height}x{grid_width}")]
    OutOfBounds {
        y: usize,
        x: usize,
        height: usize,
        width: usize,
        grid_height: usize,
        grid_width: usize,
    },
}

impl GridError {
    pub(crate) fn mismatch(expected: (usize, usize), actual: (usize, usize)) -> Self {
        GridError::DimensionMismatch {
            expected_height: expected.0,
            expected_width: expected.1,
            actual_height: actual.0,
            actual_width: actual.1,
        }
    }
}
