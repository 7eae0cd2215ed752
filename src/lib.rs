//! Recolor - color reduction for PNG images
//!
//! Palette mapping, level reduction and edge-aware smoothing on top of
//! `recolor-core`. This library exposes modules for integration testing.

pub mod assets;
pub mod codec;
pub mod error;
pub mod models;
pub mod palette_file;
pub mod services;
