//! Ordered reference color sets.

use thiserror::Error;

/// An RGB color triple.
pub type Color = [u8; 3];

/// Integer mean of the three components.
#[inline]
pub fn brightness(color: &Color) -> u8 {
    ((color[0] as u16 + color[1] as u16 + color[2] as u16) / 3) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("palette has no colors")]
    EmptyPalette,
}

/// A non-empty ordered list of colors.
///
/// Order is significant: the equidistant mapping indexes the palette
/// directly, and the k-d tree breaks distance ties by construction order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// # Errors
    ///
    /// [`PaletteError::EmptyPalette`] if `colors` is empty.
    pub fn new(colors: Vec<Color>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Color> {
        self.colors.iter()
    }

    /// Copy of the palette ordered darkest first. Colors of equal
    /// brightness keep their relative order.
    pub fn sorted_by_brightness(&self) -> Palette {
        let mut colors = self.colors.clone();
        colors.sort_by_key(brightness);
        Palette { colors }
    }

    pub fn into_colors(self) -> Vec<Color> {
        self.colors
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = PaletteError;

    fn try_from(colors: Vec<Color>) -> Result<Self, Self::Error> {
        Palette::new(colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_palette_rejected() {
        assert_eq!(Palette::new(Vec::new()), Err(PaletteError::EmptyPalette));
        assert!(Palette::try_from(vec![[1, 2, 3]]).is_ok());
    }

    #[test]
    fn test_brightness_is_integer_mean() {
        assert_eq!(brightness(&[255, 255, 255]), 255);
        assert_eq!(brightness(&[1, 1, 2]), 1);
        assert_eq!(brightness(&[0, 0, 0]), 0);
    }

    #[test]
    fn test_sorted_by_brightness_is_stable() {
        let palette = Palette::new(vec![
            [255, 255, 255],
            [30, 0, 0],
            [0, 0, 0],
            [0, 0, 30],
            [100, 100, 100],
        ])
        .unwrap();
        let sorted = palette.sorted_by_brightness();
        assert_eq!(
            sorted.colors(),
            &[
                [0, 0, 0],
                [30, 0, 0],
                [0, 0, 30],
                [100, 100, 100],
                [255, 255, 255]
            ]
        );
        // Source is left untouched
        assert_eq!(palette.colors()[0], [255, 255, 255]);
    }
}
