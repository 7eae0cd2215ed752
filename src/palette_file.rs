//! Palette definition file parser.
//!
//! ```text
//! # comment
//! [bw]
//! 0 0 0
//! 255 255 255   # trailing comments are fine
//! ```
//!
//! A line holding `[` opens a new section. Each non-empty line inside a
//! section is one color: the first three whitespace-separated tokens are
//! its red, green and blue components (0-255); further tokens are ignored.
//! Lines before the first section are ignored.
//!
//! Parsing the file only indexes sections. Color lines are validated when a
//! palette is requested, so a broken section never affects the others.

use recolor_core::{Color, Palette};

use crate::error::PaletteFileError;

#[derive(Debug, Clone)]
struct Section {
    name: String,
    /// `(1-based line number, cleaned line)`
    lines: Vec<(usize, String)>,
}

/// All sections of a palette definition file, in file order.
#[derive(Debug, Clone, Default)]
pub struct PaletteBook {
    sections: Vec<Section>,
}

/// Strip the comment and surrounding whitespace.
fn clean_line(line: &str) -> &str {
    let line = match line.find('#') {
        Some(comment) => &line[..comment],
        None => line,
    };
    line.trim()
}

/// Section name of a header line, or `None` if the line is not a header.
fn header_name(line: &str) -> Option<&str> {
    let start = line.find('[')?;
    let rest = &line[start + 1..];
    let name = match rest.find(']') {
        Some(end) => &rest[..end],
        None => rest,
    };
    Some(name.trim())
}

impl PaletteBook {
    pub fn parse(text: &str) -> Self {
        let mut sections: Vec<Section> = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = clean_line(raw);
            if line.is_empty() {
                continue;
            }
            if let Some(name) = header_name(line) {
                sections.push(Section {
                    name: name.to_string(),
                    lines: Vec::new(),
                });
            } else if let Some(section) = sections.last_mut() {
                section.lines.push((index + 1, line.to_string()));
            }
        }

        tracing::debug!(sections = sections.len(), "Parsed palette definitions");
        Self { sections }
    }

    /// Section names in file order. A repeated name is listed once.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for section in &self.sections {
            if !names.contains(&section.name.as_str()) {
                names.push(&section.name);
            }
        }
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    fn find(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Colors of section `name`, in file order. When the name repeats, the
    /// first section wins.
    ///
    /// # Errors
    ///
    /// - [`PaletteFileError::NotFound`] if no section has that name
    /// - [`PaletteFileError::MalformedLine`] for a line without three
    ///   integer components in `0..=255`
    /// - [`PaletteFileError::Empty`] if the section holds no colors
    pub fn colors(&self, name: &str) -> Result<Vec<Color>, PaletteFileError> {
        let section = self.find(name).ok_or_else(|| PaletteFileError::NotFound {
            name: name.to_string(),
        })?;

        let colors = section
            .lines
            .iter()
            .map(|(line, content)| {
                parse_color(content).ok_or_else(|| PaletteFileError::MalformedLine {
                    section: section.name.clone(),
                    line: *line,
                    content: content.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if colors.is_empty() {
            return Err(PaletteFileError::Empty {
                name: name.to_string(),
            });
        }
        Ok(colors)
    }

    /// Section `name` as a core [`Palette`].
    pub fn palette(&self, name: &str) -> Result<Palette, PaletteFileError> {
        let colors = self.colors(name)?;
        Palette::new(colors).map_err(|_| PaletteFileError::Empty {
            name: name.to_string(),
        })
    }
}

fn parse_color(line: &str) -> Option<Color> {
    let mut tokens = line.split_whitespace();
    let mut color = [0u8; 3];
    for component in &mut color {
        *component = tokens.next()?.parse().ok()?;
    }
    Some(color)
}
