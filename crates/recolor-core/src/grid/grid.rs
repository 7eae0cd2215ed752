//! Dense row-major 2-D container.

use std::ops::{Index, IndexMut};

use super::element::Element;
use super::error::GridError;
use super::view::GridView;

/// A dense 2-D array with a row-major backing buffer.
///
/// The grid owns its buffer exclusively: `clone()` deep-copies it and
/// replacing a grid drops the old buffer. Element `(y, x)` lives at
/// `data[y * width + x]`.
///
/// Two access paths are provided:
///
/// - [`get`](Self::get) / [`set`](Self::set) check both coordinates and
///   return [`GridError::OutOfBounds`]
/// - `grid[(y, x)]` and [`row`](Self::row) are the fast path used by the
///   convolution loops; they only rely on slice bounds checks
///
/// # Example
///
/// ```
/// use recolor_core::Grid;
///
/// let mut grid = Grid::filled(2, 3, 1i32);
/// grid[(1, 2)] = 7;
///
/// assert_eq!(grid.get(1, 2).unwrap(), 7);
/// assert!(grid.get(2, 0).is_err());
/// assert_eq!(grid.transpose().shape(), (3, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid<T> {
    height: usize,
    width: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    /// Create a grid filled with `T::default()`.
    pub fn new(height: usize, width: usize) -> Self {
        Self::filled(height, width, T::default())
    }
}

impl<T: Copy> Grid<T> {
    /// Create a grid with every cell set to `value`.
    pub fn filled(height: usize, width: usize, value: T) -> Self {
        Self {
            height,
            width,
            data: vec![value; height * width],
        }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// [`GridError::DimensionMismatch`] if `data.len() != height * width`.
    pub fn from_vec(height: usize, width: usize, data: Vec<T>) -> Result<Self, GridError> {
        if data.len() != height * width {
            // Report the buffer as a single row so both shapes are visible
            return Err(GridError::mismatch((height, width), (1, data.len())));
        }
        Ok(Self {
            height,
            width,
            data,
        })
    }

    /// Internal constructor for buffers already known to match the shape.
    pub(crate) fn from_raw(height: usize, width: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), height * width);
        Self {
            height,
            width,
            data,
        }
    }

    /// Build a grid by evaluating `f(y, x)` for every cell.
    pub fn from_fn(height: usize, width: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(height * width);
        for y in 0..height {
            for x in 0..width {
                data.push(f(y, x));
            }
        }
        Self {
            height,
            width,
            data,
        }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// `(height, width)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Checked read.
    pub fn get(&self, y: usize, x: usize) -> Result<T, GridError> {
        self.check_region(y, x, 1, 1)?;
        Ok(self.data[y * self.width + x])
    }

    /// Checked write.
    pub fn set(&mut self, y: usize, x: usize, value: T) -> Result<(), GridError> {
        self.check_region(y, x, 1, 1)?;
        self.data[y * self.width + x] = value;
        Ok(())
    }

    /// Row `y` as a slice. Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }

    /// Iterate over rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.width.max(1))
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Apply `f` to every cell, producing a grid of the same shape.
    pub fn map<U>(&self, f: impl FnMut(T) -> U) -> Grid<U> {
        Grid {
            height: self.height,
            width: self.width,
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Change the extent in place. Cells inside both the old and the new
    /// extent keep their value; new cells are set to `value`.
    pub fn resize(&mut self, height: usize, width: usize, value: T) {
        let mut data = vec![value; height * width];
        let keep_height = height.min(self.height);
        let keep_width = width.min(self.width);

        for y in 0..keep_height {
            let src = y * self.width;
            let dst = y * width;
            data[dst..dst + keep_width].copy_from_slice(&self.data[src..src + keep_width]);
        }

        self.data = data;
        self.height = height;
        self.width = width;
    }

    #[inline]
    pub fn append_rows(&mut self, amount: usize, value: T) {
        self.resize(self.height + amount, self.width, value);
    }

    #[inline]
    pub fn append_columns(&mut self, amount: usize, value: T) {
        self.resize(self.height, self.width + amount, value);
    }

    /// Insert `amount` rows of `value` before row `position`. Positions past
    /// the end append.
    pub fn insert_rows(&mut self, position: usize, amount: usize, value: T) {
        let position = position.min(self.height);
        let at = position * self.width;
        self.data
            .splice(at..at, std::iter::repeat(value).take(amount * self.width));
        self.height += amount;
    }

    /// Insert `amount` columns of `value` before column `position`.
    /// Positions past the end append.
    pub fn insert_columns(&mut self, position: usize, amount: usize, value: T) {
        let position = position.min(self.width);
        let width = self.width + amount;
        let mut data = Vec::with_capacity(self.height * width);

        for row in self.data.chunks(self.width.max(1)).take(self.height) {
            data.extend_from_slice(&row[..position]);
            data.extend(std::iter::repeat(value).take(amount));
            data.extend_from_slice(&row[position..]);
        }
        // A zero-width grid has no rows to iterate
        if self.width == 0 {
            data = vec![value; self.height * width];
        }

        self.data = data;
        self.width = width;
    }

    /// Return a larger grid with this one centered inside a border of
    /// `v_pad` rows (top and bottom) and `h_pad` columns (left and right)
    /// set to `fill`.
    pub fn pad(&self, v_pad: usize, h_pad: usize, fill: T) -> Grid<T> {
        let height = self.height + 2 * v_pad;
        let width = self.width + 2 * h_pad;
        let mut data = vec![fill; height * width];

        for (y, row) in self.rows().take(self.height).enumerate() {
            let start = (y + v_pad) * width + h_pad;
            data[start..start + self.width].copy_from_slice(row);
        }

        Grid {
            height,
            width,
            data,
        }
    }

    /// Like [`pad`](Self::pad), but the border repeats the nearest edge
    /// cell. An empty grid has no edge and is returned unchanged.
    pub fn pad_edge(&self, v_pad: usize, h_pad: usize) -> Grid<T> {
        if self.is_empty() {
            return self.clone();
        }
        let (last_y, last_x) = (self.height - 1, self.width - 1);
        Grid::from_fn(self.height + 2 * v_pad, self.width + 2 * h_pad, |y, x| {
            let sy = y.saturating_sub(v_pad).min(last_y);
            let sx = x.saturating_sub(h_pad).min(last_x);
            self.data[sy * self.width + sx]
        })
    }

    /// Copy out the `height × width` rectangle whose top-left corner is
    /// `(y, x)`.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if the rectangle exceeds the grid.
    pub fn slice(
        &self,
        y: usize,
        x: usize,
        height: usize,
        width: usize,
    ) -> Result<Grid<T>, GridError> {
        Ok(self.view(y, x, height, width)?.to_grid())
    }

    /// Borrow the `height × width` rectangle at `(y, x)` without copying.
    ///
    /// The view borrows the grid, so the grid cannot be resized or dropped
    /// while the view is alive.
    pub fn view(
        &self,
        y: usize,
        x: usize,
        height: usize,
        width: usize,
    ) -> Result<GridView<'_, T>, GridError> {
        self.check_region(y, x, height, width)?;
        Ok(GridView::new(&self.data, self.width, y, x, height, width))
    }

    /// Borrow the whole grid as a view.
    pub fn as_view(&self) -> GridView<'_, T> {
        GridView::new(&self.data, self.width, 0, 0, self.height, self.width)
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Grid<T> {
        let mut data = Vec::with_capacity(self.data.len());
        for x in 0..self.width {
            for y in 0..self.height {
                data.push(self.data[y * self.width + x]);
            }
        }
        Grid {
            height: self.width,
            width: self.height,
            data,
        }
    }

    /// Apply `f` cell by cell to two grids of the same shape.
    pub fn zip_with<U: Copy, V>(
        &self,
        other: &Grid<U>,
        mut f: impl FnMut(T, U) -> V,
    ) -> Result<Grid<V>, GridError> {
        self.check_same_shape(other.shape())?;
        Ok(Grid {
            height: self.height,
            width: self.width,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// In-place variant of [`zip_with`](Self::zip_with).
    pub fn zip_with_mut<U: Copy>(
        &mut self,
        other: &Grid<U>,
        mut f: impl FnMut(&mut T, U),
    ) -> Result<(), GridError> {
        self.check_same_shape(other.shape())?;
        for (a, &b) in self.data.iter_mut().zip(other.data.iter()) {
            f(a, b);
        }
        Ok(())
    }

    pub(crate) fn check_same_shape(&self, other: (usize, usize)) -> Result<(), GridError> {
        if self.shape() != other {
            return Err(GridError::mismatch(self.shape(), other));
        }
        Ok(())
    }

    fn check_region(
        &self,
        y: usize,
        x: usize,
        height: usize,
        width: usize,
    ) -> Result<(), GridError> {
        let fits_y = y.checked_add(height).is_some_and(|end| end <= self.height);
        let fits_x = x.checked_add(width).is_some_and(|end| end <= self.width);
        if fits_y && fits_x {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                y,
                x,
                height,
                width,
                grid_height: self.height,
                grid_width: self.width,
            })
        }
    }
}

impl<T: Element> Grid<T> {
    /// Convert every cell to another element type.
    pub fn cast<U: Element>(&self) -> Grid<U> {
        self.map(|v| U::from_f64(v.to_f64()))
    }

    /// Largest cell value, `None` for an empty grid.
    pub fn max_value(&self) -> Option<T> {
        self.data
            .iter()
            .copied()
            .reduce(|a, b| if b > a { b } else { a })
    }

    /// Smallest cell value, `None` for an empty grid.
    pub fn min_value(&self) -> Option<T> {
        self.data
            .iter()
            .copied()
            .reduce(|a, b| if b < a { b } else { a })
    }

    /// Largest absolute value, `0.0` for an empty grid.
    pub fn max_abs(&self) -> f64 {
        self.data
            .iter()
            .map(|v| v.to_f64().abs())
            .fold(0.0, f64::max)
    }

    /// Multiply every cell by `factor`, converting back through
    /// [`Element::from_f64`].
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.data {
            *v = T::from_f64(v.to_f64() * factor);
        }
    }

    /// Divide every cell by the largest absolute value.
    ///
    /// A grid whose cells are all zero is returned unchanged instead of
    /// being divided by zero.
    pub fn normalize(&self) -> Grid<T> {
        let mut out = self.clone();
        out.normalize_mut();
        out
    }

    /// In-place variant of [`normalize`](Self::normalize).
    pub fn normalize_mut(&mut self) {
        let max = self.max_abs();
        if max > 0.0 {
            self.scale(1.0 / max);
        }
    }

    /// Cell-wise `self + other`.
    pub fn try_add(&self, other: &Grid<T>) -> Result<Grid<T>, GridError> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Cell-wise `self - other`.
    pub fn try_sub(&self, other: &Grid<T>) -> Result<Grid<T>, GridError> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Cell-wise `self * other`.
    pub fn try_mul(&self, other: &Grid<T>) -> Result<Grid<T>, GridError> {
        self.zip_with(other, |a, b| a * b)
    }

    /// Cell-wise `self / other`. Integer division by a zero cell panics,
    /// as it does for the scalar type.
    pub fn try_div(&self, other: &Grid<T>) -> Result<Grid<T>, GridError> {
        self.zip_with(other, |a, b| a / b)
    }

    pub fn try_add_assign(&mut self, other: &Grid<T>) -> Result<(), GridError> {
        self.zip_with_mut(other, |a, b| *a = *a + b)
    }

    pub fn try_sub_assign(&mut self, other: &Grid<T>) -> Result<(), GridError> {
        self.zip_with_mut(other, |a, b| *a = *a - b)
    }

    pub fn try_mul_assign(&mut self, other: &Grid<T>) -> Result<(), GridError> {
        self.zip_with_mut(other, |a, b| *a = *a * b)
    }

    pub fn try_div_assign(&mut self, other: &Grid<T>) -> Result<(), GridError> {
        self.zip_with_mut(other, |a, b| *a = *a / b)
    }

    /// Cell-wise `|self - other|`, safe for unsigned element types.
    pub fn abs_diff(&self, other: &Grid<T>) -> Result<Grid<T>, GridError> {
        self.zip_with(other, |a, b| if a > b { a - b } else { b - a })
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (y, x): (usize, usize)) -> &T {
        debug_assert!(x < self.width, "column {x} out of range for width {}", self.width);
        &self.data[y * self.width + x]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, (y, x): (usize, usize)) -> &mut T {
        debug_assert!(x < self.width, "column {x} out of range for width {}", self.width);
        &mut self.data[y * self.width + x]
    }
}
