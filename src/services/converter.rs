use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use recolor_core::edges::{horizontal, sobel, vertical};
use recolor_core::{dog, Channels, Grid, GridError, Mode, QuantizeError, Quantizer};

use crate::codec::{self, RasterImage};
use crate::error::{CodecError, PaletteFileError};
use crate::palette_file::PaletteBook;

/// Error from a conversion run
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Palette error: {0}")]
    Palette(#[from] PaletteFileError),

    #[error("Quantize error: {0}")]
    Quantize(#[from] QuantizeError),

    #[error("Edge detection error: {0}")]
    Grid(#[from] GridError),

    #[error("Unknown edge method '{0}' (expected one of: dog, sobel, horizontal, vertical)")]
    UnknownEdgeMethod(String),
}

/// Parameters of one `convert` run
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub input: PathBuf,
    /// Defaults to `<stem>_<palette or mode>.<ext>` beside the input
    pub output: Option<PathBuf>,
    pub mode: Mode,
    /// Palette name, required by palette modes
    pub palette: Option<String>,
    pub resolution: u32,
    pub blur_radius: usize,
    pub antialias_radius: usize,
    pub chunk_pixels: usize,
    pub optimize: bool,
}

impl ConvertRequest {
    /// Suffix of the default output file name
    pub fn suffix(&self) -> String {
        match (&self.palette, self.mode.needs_palette()) {
            (Some(name), true) => name.clone(),
            _ => self.mode.to_string(),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| codec::default_output_path(&self.input, &self.suffix()))
    }
}

/// Edge map flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeMethod {
    /// Difference of gaussians
    Dog,
    /// Sobel gradient magnitude
    Sobel,
    /// Sobel horizontal gradient
    Horizontal,
    /// Sobel vertical gradient
    Vertical,
}

impl EdgeMethod {
    pub const ALL: [EdgeMethod; 4] = [
        EdgeMethod::Dog,
        EdgeMethod::Sobel,
        EdgeMethod::Horizontal,
        EdgeMethod::Vertical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EdgeMethod::Dog => "dog",
            EdgeMethod::Sobel => "sobel",
            EdgeMethod::Horizontal => "horizontal",
            EdgeMethod::Vertical => "vertical",
        }
    }
}

impl fmt::Display for EdgeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeMethod {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EdgeMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConvertError::UnknownEdgeMethod(s.to_string()))
    }
}

/// Parameters of one `edges` run
#[derive(Debug, Clone)]
pub struct EdgeRequest {
    pub input: PathBuf,
    /// Defaults to `<stem>_<method>.<ext>` beside the input
    pub output: Option<PathBuf>,
    pub method: EdgeMethod,
    /// Narrow deviation for [`EdgeMethod::Dog`]
    pub sigma: f32,
    pub optimize: bool,
}

impl EdgeRequest {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| codec::default_output_path(&self.input, self.method.as_str()))
    }
}

/// Summary of a finished run
#[derive(Debug, Clone)]
pub struct ConvertReport {
    pub output: PathBuf,
    pub width: usize,
    pub height: usize,
    pub bytes: usize,
}

/// Converts PNG files with the palettes of one palette book
pub struct Converter {
    palettes: PaletteBook,
}

impl Converter {
    pub fn new(palettes: PaletteBook) -> Self {
        Self { palettes }
    }

    pub fn palettes(&self) -> &PaletteBook {
        &self.palettes
    }

    /// Build the quantizer for a request, resolving its palette
    ///
    /// Palette problems surface here, before any image is decoded.
    pub fn quantizer(&self, request: &ConvertRequest) -> Result<Quantizer, ConvertError> {
        let mut quantizer = Quantizer::new(request.mode)
            .resolution(request.resolution)
            .blur_radius(request.blur_radius)
            .antialias_radius(request.antialias_radius)
            .chunk_pixels(request.chunk_pixels);

        if request.mode.needs_palette() {
            let name = request
                .palette
                .as_deref()
                .ok_or(QuantizeError::MissingPalette { mode: request.mode })?;
            let palette = self.palettes.palette(name)?;
            tracing::debug!(palette = name, colors = palette.len(), "Resolved palette");
            quantizer = quantizer.palette(palette);
        }

        quantizer.validate()?;
        Ok(quantizer)
    }

    /// Quantize an in-memory image
    pub fn convert_image(
        &self,
        image: &RasterImage,
        quantizer: &Quantizer,
    ) -> Result<RasterImage, ConvertError> {
        let mut channels =
            Channels::from_interleaved(&image.data, image.height, image.width, image.channels)?;
        quantizer.quantize(&mut channels)?;
        Ok(RasterImage {
            width: image.width,
            height: image.height,
            channels: image.channels,
            data: channels.to_interleaved()?,
        })
    }

    /// Read, quantize and write one file
    pub fn convert(&self, request: &ConvertRequest) -> Result<ConvertReport, ConvertError> {
        let started = Instant::now();
        let output = request.output_path();
        codec::check_output_format(&output)?;
        let quantizer = self.quantizer(request)?;

        let image = codec::read_png(&request.input)?;
        let converted = self.convert_image(&image, &quantizer)?;
        let bytes = codec::write_png(&output, &converted, request.optimize)?;

        tracing::info!(
            input = %request.input.display(),
            output = %output.display(),
            width = image.width,
            height = image.height,
            mode = %request.mode,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Converted image"
        );

        Ok(ConvertReport {
            output,
            width: image.width,
            height: image.height,
            bytes,
        })
    }

    /// Render the edge map of an in-memory image as greyscale
    pub fn edge_image(
        &self,
        image: &RasterImage,
        method: EdgeMethod,
        sigma: f32,
    ) -> Result<RasterImage, ConvertError> {
        let channels =
            Channels::from_interleaved(&image.data, image.height, image.width, image.channels)?;
        let grey = channels.greyscale();

        let map: Grid<f32> = match method {
            EdgeMethod::Dog => dog(&grey, sigma)?,
            EdgeMethod::Sobel => sobel(&grey)? * 255.0,
            EdgeMethod::Horizontal => horizontal(&grey)? * 255.0,
            EdgeMethod::Vertical => vertical(&grey)? * 255.0,
        };

        let plane = map.cast::<i32>();
        let rendered = Channels {
            red: plane.clone(),
            green: plane.clone(),
            blue: plane,
            alpha: channels.alpha,
        };
        Ok(RasterImage {
            width: image.width,
            height: image.height,
            channels: image.channels,
            data: rendered.to_interleaved()?,
        })
    }

    /// Read one file and write its edge map
    pub fn edges(&self, request: &EdgeRequest) -> Result<ConvertReport, ConvertError> {
        let started = Instant::now();
        let output = request.output_path();
        codec::check_output_format(&output)?;

        let image = codec::read_png(&request.input)?;
        let edges = self.edge_image(&image, request.method, request.sigma)?;
        let bytes = codec::write_png(&output, &edges, request.optimize)?;

        tracing::info!(
            input = %request.input.display(),
            output = %output.display(),
            width = image.width,
            height = image.height,
            method = %request.method,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Rendered edge map"
        );

        Ok(ConvertReport {
            output,
            width: image.width,
            height: image.height,
            bytes,
        })
    }
}
