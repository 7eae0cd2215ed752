//! Borrowed rectangular window into a [`Grid`].

use std::ops::Index;

use super::error::GridError;
use super::grid::Grid;

/// A non-owning `height × width` window into a grid's buffer.
///
/// The view holds a shared borrow of the owner's buffer, so the owner can
/// be neither mutated, resized nor dropped while the view exists. `stride`
/// is the owner's width.
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a, T> {
    data: &'a [T],
    stride: usize,
    y: usize,
    x: usize,
    height: usize,
    width: usize,
}

impl<'a, T: Copy> GridView<'a, T> {
    /// Caller guarantees the region lies inside `data` laid out with `stride`.
    pub(crate) fn new(
        data: &'a [T],
        stride: usize,
        y: usize,
        x: usize,
        height: usize,
        width: usize,
    ) -> Self {
        Self {
            data,
            stride,
            y,
            x,
            height,
            width,
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

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Top-left corner of the window in owner coordinates.
    #[inline]
    pub fn origin(&self) -> (usize, usize) {
        (self.y, self.x)
    }

    /// Row `y` of the window. Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [T] {
        assert!(y < self.height, "row {y} out of range for view height {}", self.height);
        let start = (self.y + y) * self.stride + self.x;
        &self.data[start..start + self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        (0..self.height).map(move |y| self.row(y))
    }

    /// Checked read in window coordinates.
    pub fn get(&self, y: usize, x: usize) -> Result<T, GridError> {
        if y >= self.height || x >= self.width {
            return Err(GridError::OutOfBounds {
                y,
                x,
                height: 1,
                width: 1,
                grid_height: self.height,
                grid_width: self.width,
            });
        }
        Ok(self.row(y)[x])
    }

    /// Narrow the window further. Coordinates are relative to this view.
    pub fn view(
        &self,
        y: usize,
        x: usize,
        height: usize,
        width: usize,
    ) -> Result<GridView<'a, T>, GridError> {
        let fits_y = y.checked_add(height).is_some_and(|end| end <= self.height);
        let fits_x = x.checked_add(width).is_some_and(|end| end <= self.width);
        if !(fits_y && fits_x) {
            return Err(GridError::OutOfBounds {
                y,
                x,
                height,
                width,
                grid_height: self.height,
                grid_width: self.width,
            });
        }
        Ok(GridView::new(
            self.data,
            self.stride,
            self.y + y,
            self.x + x,
            height,
            width,
        ))
    }

    /// Copy the window into a new owned grid.
    pub fn to_grid(&self) -> Grid<T> {
        let mut data = Vec::with_capacity(self.height * self.width);
        for row in self.rows() {
            data.extend_from_slice(row);
        }
        Grid::from_raw(self.height, self.width, data)
    }
}

impl<T: Copy> Index<(usize, usize)> for GridView<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, (y, x): (usize, usize)) -> &T {
        &self.row(y)[x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting() -> Grid<i32> {
        Grid::from_fn(4, 5, |y, x| (y * 10 + x) as i32)
    }

    #[test]
    fn test_view_reads_owner_buffer() {
        let grid = counting();
        let view = grid.view(1, 2, 2, 3).unwrap();
        assert_eq!(view.shape(), (2, 3));
        assert_eq!(view.origin(), (1, 2));
        assert_eq!(view.row(0), &[12, 13, 14]);
        assert_eq!(view[(1, 0)], 22);
        assert_eq!(view.get(1, 2).unwrap(), 24);
        assert!(view.get(2, 0).is_err());
    }

    #[test]
    fn test_nested_view() {
        let grid = counting();
        let outer = grid.view(1, 1, 3, 4).unwrap();
        let inner = outer.view(1, 1, 2, 2).unwrap();
        assert_eq!(inner.origin(), (2, 2));
        assert_eq!(inner.to_grid().as_slice(), &[22, 23, 32, 33]);
        assert!(outer.view(2, 0, 2, 1).is_err());
    }

    #[test]
    fn test_view_out_of_bounds() {
        let grid = counting();
        assert!(matches!(
            grid.view(3, 0, 2, 1),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(grid.view(0, 0, 4, 5).is_ok());
    }

    #[test]
    fn test_whole_grid_view_round_trips() {
        let grid = counting();
        assert_eq!(grid.as_view().to_grid(), grid);
    }
}
