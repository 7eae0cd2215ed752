use thiserror::Error;

use crate::grid::GridError;
use crate::kdtree::KdTreeError;
use crate::palette::PaletteError;

use super::mode::Mode;

/// Errors raised while splitting, filtering or quantizing an image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantizeError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    KdTree(#[from] KdTreeError),

    #[error(transparent)]
    Palette(#[from] PaletteError),

    #[error("mode '{mode}' requires a palette")]
    MissingPalette { mode: Mode },

    #[error("resolution must be at least 2, got {0}")]
    InvalidResolution(u32),

    #[error("unsupported channel count {0}: expected 3 (RGB) or 4 (RGBA)")]
    InvalidChannelCount(usize),

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("unknown mode '{0}' (expected one of: search, equidistant, self, self-sort, bw)")]
    UnknownMode(String),
}
