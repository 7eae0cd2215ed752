//! Level reduction and brightness-indexed mapping.

use crate::grid::Grid;
use crate::palette::{brightness, Color, Palette};

/// Snap a `0..=255` value to the nearest of `resolution` evenly spaced
/// levels: `round(round(v / 255 * (n - 1)) / (n - 1) * 255)`.
///
/// Resolutions below 2 behave like 2.
#[inline]
pub fn requantize(value: i32, resolution: u32) -> i32 {
    let steps = resolution.saturating_sub(1).max(1) as f64;
    let level = (value as f64 / 255.0 * steps).round();
    (level / steps * 255.0).round() as i32
}

/// Palette slot for a greyscale value: `round(v / 255 * (len - 1))`,
/// clamped into the palette.
#[inline]
pub fn equidistant_index(value: i32, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let index = (value as f64 / 255.0 * (len - 1) as f64).round();
    (index.max(0.0) as usize).min(len - 1)
}

/// [`requantize`] every cell.
pub fn reduce_levels(grid: &mut Grid<i32>, resolution: u32) {
    for v in grid.as_mut_slice() {
        *v = requantize(*v, resolution);
    }
}

/// Reduce the image's own colors to at most `resolution` representatives.
///
/// The colors are ordered by brightness (stable) and split into
/// `resolution` runs of equal length; each run contributes its mean
/// color. Fewer colors than bins yields one representative per color.
pub fn own_palette(mut colors: Vec<Color>, resolution: usize) -> Vec<Color> {
    colors.sort_by_key(brightness);
    let total = colors.len();
    let bins = resolution.min(total);

    (0..bins)
        .filter_map(|bin| {
            let start = bin * total / bins;
            let end = (bin + 1) * total / bins;
            mean_color(&colors[start..end])
        })
        .collect()
}

fn mean_color(colors: &[Color]) -> Option<Color> {
    if colors.is_empty() {
        return None;
    }
    let mut sums = [0u64; 3];
    for color in colors {
        for (sum, &c) in sums.iter_mut().zip(color) {
            *sum += c as u64;
        }
    }
    let n = colors.len() as u64;
    // Rounded division
    Some(sums.map(|s| ((s + n / 2) / n) as u8))
}

/// Map every greyscale cell onto a brightness-sorted palette.
pub fn equidistant_colors(greyscale: &Grid<i32>, sorted: &Palette) -> Vec<Color> {
    let colors = sorted.colors();
    greyscale
        .as_slice()
        .iter()
        .map(|&v| colors[equidistant_index(v, colors.len())])
        .collect()
}
