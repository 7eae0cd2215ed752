//! Quantizer builder: the orchestrating entry point of the crate.
//!
//! [`Quantizer`] runs the whole color-reduction pipeline on a set of
//! [`Channels`]: optional edge-masked blur, the per-mode transform and
//! optional edge-masked antialiasing.

use tracing::debug;

use crate::channels::Channels;
use crate::edges::sobel;
use crate::grid::Grid;
use crate::kdtree::KdTree;
use crate::kernel::blur_parameters;
use crate::palette::{Color, Palette};

use super::error::QuantizeError;
use super::levels::{equidistant_colors, own_palette, reduce_levels};
use super::mode::Mode;
use super::search::{nearest_colors, DEFAULT_CHUNK_PIXELS};

/// Default number of levels for the resolution-driven modes.
pub const DEFAULT_RESOLUTION: u32 = 2;

/// Color-reduction pipeline.
///
/// - Configuration methods consume and return `self`
/// - [`quantize()`](Self::quantize) takes `&self`, so one quantizer can be
///   applied to many images
/// - A blur or antialias radius of 0 disables that stage
///
/// # Example
///
/// ```
/// use recolor_core::{Channels, Mode, Palette, Quantizer};
///
/// let palette = Palette::new(vec![[0, 0, 0], [255, 255, 255]]).unwrap();
/// let quantizer = Quantizer::new(Mode::Search).palette(palette);
///
/// let pixels = [10, 10, 10, 200, 200, 200];
/// let mut channels = Channels::from_interleaved(&pixels, 1, 2, 3).unwrap();
/// quantizer.quantize(&mut channels).unwrap();
///
/// assert_eq!(channels.to_interleaved().unwrap(), vec![0, 0, 0, 255, 255, 255]);
/// ```
#[derive(Debug, Clone)]
pub struct Quantizer {
    mode: Mode,
    palette: Option<Palette>,
    resolution: u32,
    blur_radius: usize,
    antialias_radius: usize,
    chunk_pixels: usize,
}

impl Quantizer {
    /// Quantizer for `mode` with resolution 2, no blur, no antialiasing
    /// and one search worker per 1280×720 pixels.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            palette: None,
            resolution: DEFAULT_RESOLUTION,
            blur_radius: 0,
            antialias_radius: 0,
            chunk_pixels: DEFAULT_CHUNK_PIXELS,
        }
    }

    /// Reference palette for `search` and `equidistant`.
    #[inline]
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Level count for `self`, `self-sort` and `bw`.
    #[inline]
    pub fn resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution;
        self
    }

    /// Pixel radius of the pre-quantization blur of flat regions.
    #[inline]
    pub fn blur_radius(mut self, radius: usize) -> Self {
        self.blur_radius = radius;
        self
    }

    /// Pixel radius of the post-quantization blur along edges.
    #[inline]
    pub fn antialias_radius(mut self, radius: usize) -> Self {
        self.antialias_radius = radius;
        self
    }

    /// Pixels handled by each search worker.
    #[inline]
    pub fn chunk_pixels(mut self, pixels: usize) -> Self {
        self.chunk_pixels = pixels;
        self
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Check the configuration without touching any pixels.
    ///
    /// # Errors
    ///
    /// - [`QuantizeError::MissingPalette`] for a palette mode with no palette
    /// - [`QuantizeError::InvalidResolution`] for a level mode with a
    ///   resolution below 2
    pub fn validate(&self) -> Result<(), QuantizeError> {
        if self.mode.needs_palette() && self.palette.is_none() {
            return Err(QuantizeError::MissingPalette { mode: self.mode });
        }
        if !self.mode.needs_palette() && self.resolution < 2 {
            return Err(QuantizeError::InvalidResolution(self.resolution));
        }
        Ok(())
    }

    /// Run the pipeline on `channels` in place. Alpha is left untouched.
    ///
    /// 1. Blur flat regions (mask `1 - sobel(greyscale)`)
    /// 2. Apply the mode
    /// 3. Antialias edges (mask `sobel(greyscale)` of the quantized image)
    ///
    /// # Errors
    ///
    /// Configuration errors from [`validate()`](Self::validate), and
    /// [`GridError::DimensionMismatch`](crate::GridError::DimensionMismatch)
    /// if the planes of `channels` differ in shape.
    pub fn quantize(&self, channels: &mut Channels) -> Result<(), QuantizeError> {
        self.validate()?;
        channels.check_shapes()?;
        if channels.red.is_empty() {
            return Ok(());
        }

        if self.blur_radius > 0 {
            let mask = sobel(&channels.greyscale())?.map(|e| 1.0 - e);
            masked_blur(channels, self.blur_radius, &mask)?;
        }

        match self.mode {
            Mode::Search => self.search(channels)?,
            Mode::Equidistant => self.equidistant(channels)?,
            Mode::SelfLevels => {
                for grid in channels.rgb_mut() {
                    reduce_levels(grid, self.resolution);
                }
            }
            Mode::SelfSort => self.self_sort(channels)?,
            Mode::BlackWhite => {
                let mut grey = channels.greyscale();
                reduce_levels(&mut grey, self.resolution);
                channels.green = grey.clone();
                channels.blue = grey.clone();
                channels.red = grey;
            }
        }

        if self.antialias_radius > 0 {
            let mask = sobel(&channels.greyscale())?;
            masked_blur(channels, self.antialias_radius, &mask)?;
        }
        Ok(())
    }

    fn require_palette(&self) -> Result<&Palette, QuantizeError> {
        self.palette
            .as_ref()
            .ok_or(QuantizeError::MissingPalette { mode: self.mode })
    }

    fn search(&self, channels: &mut Channels) -> Result<(), QuantizeError> {
        let palette = self.require_palette()?;
        let points: Vec<[i32; 3]> = palette.iter().map(|&c| c.map(i32::from)).collect();
        let tree = KdTree::new(points)?;
        debug!(colors = palette.len(), height = tree.height(), "palette tree");

        let Channels {
            red, green, blue, ..
        } = channels;
        nearest_colors(
            &tree,
            red.as_mut_slice(),
            green.as_mut_slice(),
            blue.as_mut_slice(),
            self.chunk_pixels,
        );
        Ok(())
    }

    fn equidistant(&self, channels: &mut Channels) -> Result<(), QuantizeError> {
        let sorted = self.require_palette()?.sorted_by_brightness();
        apply_equidistant(channels, &sorted);
        Ok(())
    }

    fn self_sort(&self, channels: &mut Channels) -> Result<(), QuantizeError> {
        let own = own_palette(channels.color_list(), self.resolution as usize);
        let sorted = Palette::new(own)?.sorted_by_brightness();
        debug!(colors = sorted.len(), "palette from image colors");
        apply_equidistant(channels, &sorted);
        Ok(())
    }
}

fn apply_equidistant(channels: &mut Channels, sorted: &Palette) {
    let colors: Vec<Color> = equidistant_colors(&channels.greyscale(), sorted);
    for (index, color) in colors.into_iter().enumerate() {
        channels.set_pixel(index, color.map(i32::from));
    }
}

/// Gaussian blur of the color grids blended through `mask`.
fn masked_blur(
    channels: &mut Channels,
    radius: usize,
    mask: &Grid<f32>,
) -> Result<(), QuantizeError> {
    let (size, deviation) = blur_parameters(radius);
    debug!(radius, size, deviation, "masked blur");
    for grid in channels.rgb_mut() {
        *grid = grid.gaussian_blur_masked(size, deviation, mask)?;
    }
    Ok(())
}
