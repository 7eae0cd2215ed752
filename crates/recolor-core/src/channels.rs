//! Splitting interleaved pixel buffers into per-channel grids and back.

use crate::grid::{Grid, GridError};
use crate::palette::Color;
use crate::quantize::QuantizeError;

/// One grid per color channel of an image.
///
/// Values are kept as `i32` so filtering and arithmetic can leave
/// `0..=255` temporarily; [`to_interleaved`](Self::to_interleaved) clamps
/// them back.
#[derive(Debug, Clone, PartialEq)]
pub struct Channels {
    pub red: Grid<i32>,
    pub green: Grid<i32>,
    pub blue: Grid<i32>,
    pub alpha: Option<Grid<i32>>,
}

impl Channels {
    /// Split a row-major `R,G,B[,A]` byte buffer.
    ///
    /// # Errors
    ///
    /// - [`QuantizeError::InvalidChannelCount`] unless `channels` is 3 or 4
    /// - [`QuantizeError::BufferSize`] if `data` is not exactly
    ///   `height * width * channels` bytes
    pub fn from_interleaved(
        data: &[u8],
        height: usize,
        width: usize,
        channels: usize,
    ) -> Result<Self, QuantizeError> {
        if channels != 3 && channels != 4 {
            return Err(QuantizeError::InvalidChannelCount(channels));
        }
        let expected = height * width * channels;
        if data.len() != expected {
            return Err(QuantizeError::BufferSize {
                expected,
                actual: data.len(),
            });
        }

        let plane = |c: usize| -> Grid<i32> {
            Grid::from_fn(height, width, |y, x| {
                data[(y * width + x) * channels + c] as i32
            })
        };

        Ok(Self {
            red: plane(0),
            green: plane(1),
            blue: plane(2),
            alpha: (channels == 4).then(|| plane(3)),
        })
    }

    /// Check that green, blue and alpha have the shape of red.
    ///
    /// # Errors
    ///
    /// [`GridError::DimensionMismatch`] naming the first plane that differs.
    pub fn check_shapes(&self) -> Result<(), GridError> {
        let planes = [Some(&self.green), Some(&self.blue), self.alpha.as_ref()];
        for plane in planes.into_iter().flatten() {
            if plane.shape() != self.red.shape() {
                return Err(GridError::mismatch(self.red.shape(), plane.shape()));
            }
        }
        Ok(())
    }

    /// Recombine into a row-major byte buffer, clamping to `0..=255`.
    ///
    /// # Errors
    ///
    /// [`GridError::DimensionMismatch`] if the planes differ in shape.
    pub fn to_interleaved(&self) -> Result<Vec<u8>, GridError> {
        self.check_shapes()?;
        let channels = self.channel_count();
        let mut out = Vec::with_capacity(self.red.len() * channels);
        let planes = [
            Some(self.red.as_slice()),
            Some(self.green.as_slice()),
            Some(self.blue.as_slice()),
            self.alpha.as_ref().map(Grid::as_slice),
        ];

        for i in 0..self.red.len() {
            for plane in planes.iter().flatten() {
                out.push(clamp_u8(plane[i]));
            }
        }
        Ok(out)
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.red.height()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.red.width()
    }

    /// 3 for RGB, 4 for RGBA.
    #[inline]
    pub fn channel_count(&self) -> usize {
        if self.alpha.is_some() {
            4
        } else {
            3
        }
    }

    /// Integer mean of red, green and blue.
    pub fn greyscale(&self) -> Grid<i32> {
        Grid::from_fn(self.height(), self.width(), |y, x| {
            (self.red[(y, x)] + self.green[(y, x)] + self.blue[(y, x)]) / 3
        })
    }

    /// Every pixel's color, row-major, clamped to `0..=255`.
    pub fn color_list(&self) -> Vec<Color> {
        self.red
            .as_slice()
            .iter()
            .zip(self.green.as_slice())
            .zip(self.blue.as_slice())
            .map(|((&r, &g), &b)| [clamp_u8(r), clamp_u8(g), clamp_u8(b)])
            .collect()
    }

    /// Mutable access to the three color grids, alpha excluded.
    pub fn rgb_mut(&mut self) -> [&mut Grid<i32>; 3] {
        [&mut self.red, &mut self.green, &mut self.blue]
    }

    /// Write `color` into pixel `index` (row-major).
    #[inline]
    pub(crate) fn set_pixel(&mut self, index: usize, color: [i32; 3]) {
        self.red.as_mut_slice()[index] = color[0];
        self.green.as_mut_slice()[index] = color[1];
        self.blue.as_mut_slice()[index] = color[2];
    }
}

#[inline]
fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}
