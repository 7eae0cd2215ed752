use std::fmt;
use std::str::FromStr;

use super::error::QuantizeError;

/// Color reduction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Nearest palette color per pixel, through the k-d tree.
    Search,
    /// Greyscale spread evenly over the brightness-sorted palette.
    Equidistant,
    /// Each channel reduced to `resolution` evenly spaced levels.
    SelfLevels,
    /// Equidistant mapping over `resolution` colors taken from the image.
    SelfSort,
    /// Greyscale reduced to `resolution` levels.
    BlackWhite,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Search,
        Mode::Equidistant,
        Mode::SelfLevels,
        Mode::SelfSort,
        Mode::BlackWhite,
    ];

    /// Name used on the command line and in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Search => "search",
            Mode::Equidistant => "equidistant",
            Mode::SelfLevels => "self",
            Mode::SelfSort => "self-sort",
            Mode::BlackWhite => "bw",
        }
    }

    /// Whether the mode maps onto an external palette.
    pub fn needs_palette(self) -> bool {
        matches!(self, Mode::Search | Mode::Equidistant)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = QuantizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| QuantizeError::UnknownMode(s.to_string()))
    }
}
