//! Convolution engine: full 2-D kernels, separable kernel pairs and
//! per-pixel blend masks.
//!
//! All variants compute a sliding-window weighted sum (the kernel is not
//! flipped) over a zero-padded copy of the input, so the output always has
//! the input's shape. Sums accumulate in `f64` and are converted back to the
//! grid's element type once per output cell.
//!
//! A blend mask is a `Grid<f32>` of the input's shape with values in
//! `[0, 1]`. Each output cell becomes
//! `convolved * mask + original * (1 - mask)`, which confines a filter to
//! the regions where the mask is high.

use crate::grid::{Element, Grid, GridError};

impl<T: Element> Grid<T> {
    /// Convolve with a 2-D kernel.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidKernelSize`] unless both kernel extents are odd.
    ///
    /// # Example
    ///
    /// ```
    /// use recolor_core::Grid;
    ///
    /// let image = Grid::filled(3, 3, 10.0f32);
    /// let box_kernel = Grid::filled(3, 3, 1.0f32);
    /// let summed = image.convolve(&box_kernel).unwrap() / 9.0;
    ///
    /// assert!((summed[(1, 1)] - 10.0).abs() < 1e-5);
    /// assert!((summed[(0, 0)] - 40.0 / 9.0).abs() < 1e-5);
    /// ```
    pub fn convolve<U: Element>(&self, kernel: &Grid<U>) -> Result<Grid<T>, GridError> {
        let sums = self.correlate(kernel)?;
        Ok(self.finish(sums, None))
    }

    /// Convolve with a 2-D kernel and blend with the original through `mask`.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidKernelSize`] for even kernels and
    /// [`GridError::DimensionMismatch`] if `mask` differs in shape.
    pub fn convolve_masked<U: Element>(
        &self,
        kernel: &Grid<U>,
        mask: &Grid<f32>,
    ) -> Result<Grid<T>, GridError> {
        self.check_same_shape(mask.shape())?;
        let sums = self.correlate(kernel)?;
        Ok(self.finish(sums, Some(mask)))
    }

    /// Convolve with the separable kernel `outer(kernel_v, kernel_h)`.
    ///
    /// Runs a horizontal pass with `kernel_h` into an intermediate buffer,
    /// then a vertical pass with `kernel_v`, which costs `O(kv + kh)` per
    /// cell instead of `O(kv · kh)`. The result matches [`convolve`] with the
    /// outer-product kernel up to floating-point rounding.
    ///
    /// [`convolve`]: Self::convolve
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidKernelSize`] unless both vector lengths are odd.
    pub fn convolve_separable<U: Element>(
        &self,
        kernel_v: &[U],
        kernel_h: &[U],
    ) -> Result<Grid<T>, GridError> {
        let sums = self.correlate_separable(kernel_v, kernel_h)?;
        Ok(self.finish(sums, None))
    }

    /// Separable convolution blended with the original through `mask`.
    pub fn convolve_separable_masked<U: Element>(
        &self,
        kernel_v: &[U],
        kernel_h: &[U],
        mask: &Grid<f32>,
    ) -> Result<Grid<T>, GridError> {
        self.check_same_shape(mask.shape())?;
        let sums = self.correlate_separable(kernel_v, kernel_h)?;
        Ok(self.finish(sums, Some(mask)))
    }

    fn correlate<U: Element>(&self, kernel: &Grid<U>) -> Result<Vec<f64>, GridError> {
        let (kh, kw) = kernel.shape();
        if kh % 2 == 0 || kw % 2 == 0 {
            return Err(GridError::InvalidKernelSize {
                height: kh,
                width: kw,
            });
        }

        let (height, width) = self.shape();
        let weights: Vec<f64> = kernel.as_slice().iter().map(|w| w.to_f64()).collect();
        let padded = self.cast::<f64>().pad(kh / 2, kw / 2, 0.0);
        let mut sums = Vec::with_capacity(height * width);

        for y in 0..height {
            for x in 0..width {
                let mut acc = 0.0;
                for (ky, taps) in weights.chunks_exact(kw).enumerate() {
                    let window = &padded.row(y + ky)[x..x + kw];
                    acc += window
                        .iter()
                        .zip(taps)
                        .map(|(v, w)| v * w)
                        .sum::<f64>();
                }
                sums.push(acc);
            }
        }

        Ok(sums)
    }

    fn correlate_separable<U: Element>(
        &self,
        kernel_v: &[U],
        kernel_h: &[U],
    ) -> Result<Vec<f64>, GridError> {
        if kernel_v.len() % 2 == 0 || kernel_h.len() % 2 == 0 {
            return Err(GridError::InvalidKernelSize {
                height: kernel_v.len(),
                width: kernel_h.len(),
            });
        }

        let (height, width) = self.shape();
        let taps_v: Vec<f64> = kernel_v.iter().map(|w| w.to_f64()).collect();
        let taps_h: Vec<f64> = kernel_h.iter().map(|w| w.to_f64()).collect();
        let radius_v = taps_v.len() / 2;

        // Horizontal pass over an input padded only left and right
        let padded = self.cast::<f64>().pad(0, taps_h.len() / 2, 0.0);
        let mut horizontal = Vec::with_capacity(height * width);
        for y in 0..height {
            let row = padded.row(y);
            for x in 0..width {
                horizontal.push(
                    row[x..x + taps_h.len()]
                        .iter()
                        .zip(&taps_h)
                        .map(|(v, w)| v * w)
                        .sum::<f64>(),
                );
            }
        }

        // Vertical pass; rows outside the grid contribute zero
        let mut sums = vec![0.0; height * width];
        for y in 0..height {
            let out = &mut sums[y * width..(y + 1) * width];
            for (i, &w) in taps_v.iter().enumerate() {
                let Some(src_y) = (y + i).checked_sub(radius_v) else {
                    continue;
                };
                if src_y >= height {
                    break;
                }
                let src = &horizontal[src_y * width..(src_y + 1) * width];
                for (o, v) in out.iter_mut().zip(src) {
                    *o += v * w;
                }
            }
        }

        Ok(sums)
    }

    fn finish(&self, sums: Vec<f64>, mask: Option<&Grid<f32>>) -> Grid<T> {
        let data = match mask {
            None => sums.into_iter().map(T::from_f64).collect(),
            Some(mask) => sums
                .into_iter()
                .zip(self.as_slice())
                .zip(mask.as_slice())
                .map(|((convolved, original), &m)| {
                    let m = m as f64;
                    T::from_f64(convolved * m + original.to_f64() * (1.0 - m))
                })
                .collect(),
        };
        Grid::from_raw(self.height(), self.width(), data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_box_kernel_on_constant_grid() {
        let image = Grid::filled(3, 3, 10.0f32);
        let kernel = Grid::filled(3, 3, 1.0f32);
        let out = image.convolve(&kernel).unwrap() / 9.0;

        assert_eq!(out.shape(), (3, 3));
        assert!((out[(1, 1)] - 10.0).abs() < 1e-5);
        for (y, x) in [(0, 0), (0, 2), (2, 0), (2, 2)] {
            assert!((out[(y, x)] - 40.0 / 9.0).abs() < 1e-4, "corner ({y}, {x})");
        }
        // Edge cells see six of nine neighbors
        assert!((out[(0, 1)] - 60.0 / 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_identity_kernel() {
        let image = Grid::from_fn(4, 5, |y, x| (y * 5 + x) as i32);
        let mut kernel = Grid::new(3, 3);
        kernel[(1, 1)] = 1.0f32;
        assert_eq!(image.convolve(&kernel).unwrap(), image);
    }

    #[test]
    fn test_kernel_is_not_flipped() {
        let mut image: Grid<f32> = Grid::new(1, 3);
        image[(0, 1)] = 1.0;
        let kernel = Grid::from_vec(1, 3, vec![1.0f32, 2.0, 3.0]).unwrap();
        // out[x] = in[x-1]*1 + in[x]*2 + in[x+1]*3
        assert_eq!(image.convolve(&kernel).unwrap().as_slice(), &[3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_rectangular_kernel_keeps_shape() {
        let image = Grid::filled(4, 6, 1u8);
        let kernel = Grid::filled(1, 5, 0.2f64);
        assert_eq!(image.convolve(&kernel).unwrap().shape(), (4, 6));
    }

    #[test]
    fn test_even_kernel_rejected() {
        let image = Grid::filled(3, 3, 1.0f32);
        let kernel = Grid::filled(2, 3, 1.0f32);
        assert_eq!(
            image.convolve(&kernel),
            Err(GridError::InvalidKernelSize {
                height: 2,
                width: 3
            })
        );
        assert!(matches!(
            image.convolve_separable(&[1.0f32, 1.0], &[1.0f32]),
            Err(GridError::InvalidKernelSize { .. })
        ));
        assert!(image.convolve_separable::<f32>(&[], &[1.0]).is_err());
    }

    #[test]
    fn test_separable_matches_outer_product() {
        let image = Grid::from_fn(6, 7, |y, x| ((y * 13 + x * 7) % 11) as f32);
        let v = [1.0f32, 2.0, 1.0];
        let h = [-1.0f32, 0.0, 1.0, 0.5, 0.25];
        let outer = Grid::from_fn(v.len(), h.len(), |y, x| v[y] * h[x]);

        let full = image.convolve(&outer).unwrap();
        let separable = image.convolve_separable(&v, &h).unwrap();
        for (a, b) in full.as_slice().iter().zip(separable.as_slice()) {
            assert!((a - b).abs() < 1e-4, "{a} vs {b}");
        }
    }

    #[test]
    fn test_separable_larger_than_grid() {
        let image = Grid::filled(2, 2, 1.0f32);
        let taps = [1.0f32; 7];
        let out = image.convolve_separable(&taps, &taps).unwrap();
        // Every window covers the whole grid
        assert_eq!(out.as_slice(), &[4.0; 4]);
    }

    #[test]
    fn test_integer_grid_rounds_result() {
        let image = Grid::filled(3, 3, 10i32);
        let kernel = Grid::filled(3, 3, 1.0f32 / 9.0);
        let out = image.convolve(&kernel).unwrap();
        assert_eq!(out[(1, 1)], 10);
        assert_eq!(out[(0, 0)], 4);
    }

    #[test]
    fn test_mask_blends_with_original() {
        let image = Grid::from_vec(1, 3, vec![0.0f32, 9.0, 0.0]).unwrap();
        let kernel = Grid::filled(1, 3, 1.0f32 / 3.0);
        let mask = Grid::from_vec(1, 3, vec![0.0f32, 0.5, 1.0]).unwrap();
        let out = image.convolve_masked(&kernel, &mask).unwrap();

        // mask 0 keeps the original, mask 1 takes the convolved value
        assert!((out[(0, 0)] - 0.0).abs() < 1e-5);
        assert!((out[(0, 1)] - (3.0 * 0.5 + 9.0 * 0.5)).abs() < 1e-5);
        assert!((out[(0, 2)] - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_separable_mask_matches_full_mask() {
        let image = Grid::from_fn(5, 5, |y, x| (y * x) as f32);
        let mask = Grid::from_fn(5, 5, |y, _| y as f32 / 4.0);
        let taps = [0.25f32, 0.5, 0.25];
        let outer = Grid::from_fn(3, 3, |y, x| taps[y] * taps[x]);

        let full = image.convolve_masked(&outer, &mask).unwrap();
        let separable = image.convolve_separable_masked(&taps, &taps, &mask).unwrap();
        for (a, b) in full.as_slice().iter().zip(separable.as_slice()) {
            assert!((a - b).abs() < 1e-4);
        }
        // First row has mask 0 and is untouched
        assert_eq!(full.row(0), image.row(0));
    }

    #[test]
    fn test_mask_shape_mismatch() {
        let image = Grid::filled(3, 3, 1.0f32);
        let kernel = Grid::filled(3, 3, 1.0f32);
        let mask = Grid::filled(3, 4, 1.0f32);
        assert!(matches!(
            image.convolve_masked(&kernel, &mask),
            Err(GridError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            image.convolve_separable_masked(&[1.0f32], &[1.0f32], &mask),
            Err(GridError::DimensionMismatch { .. })
        ));
    }
}
