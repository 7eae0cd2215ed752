//! Scratch workspace for file-level conversions.

use std::fs;
use std::path::{Path, PathBuf};

use recolor::assets::AssetLoader;
use recolor::codec::{self, RasterImage};
use recolor::palette_file::PaletteBook;
use recolor::services::{ConvertRequest, Converter, EdgeMethod, EdgeRequest};
use recolor_core::Mode;
use tempfile::TempDir;

/// A temporary directory plus a converter loaded with the embedded palettes
pub struct TestWorkspace {
    dir: TempDir,
    pub converter: Converter,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let text = AssetLoader::new(None, None)
            .read_palettes_string()
            .expect("Embedded palettes should be readable");
        Self::with_palettes(&text)
    }

    /// Workspace using custom palette definitions
    pub fn with_palettes(text: &str) -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
            converter: Converter::new(PaletteBook::parse(text)),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `image` as `<name>` and return its path
    pub fn write_image(&self, name: &str, image: &RasterImage) -> PathBuf {
        let path = self.path(name);
        codec::write_png(&path, image, false).expect("Failed to write fixture PNG");
        path
    }

    pub fn write_bytes(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, bytes).expect("Failed to write fixture");
        path
    }

    pub fn read_image(&self, path: &Path) -> RasterImage {
        codec::read_png(path).expect("Output should be a readable PNG")
    }

    /// Request with defaults matching the embedded config
    pub fn convert_request(
        &self,
        input: &Path,
        mode: Mode,
        palette: Option<&str>,
    ) -> ConvertRequest {
        ConvertRequest {
            input: input.to_path_buf(),
            output: None,
            mode,
            palette: palette.map(str::to_string),
            resolution: 2,
            blur_radius: 0,
            antialias_radius: 0,
            chunk_pixels: 1280 * 720,
            optimize: false,
        }
    }

    pub fn edge_request(&self, input: &Path, method: EdgeMethod) -> EdgeRequest {
        EdgeRequest {
            input: input.to_path_buf(),
            output: None,
            method,
            sigma: 1.0,
            optimize: false,
        }
    }
}
