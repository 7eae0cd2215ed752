//! PNG decoding and encoding.
//!
//! Decoded images are normalized to 8-bit RGB or RGBA so the core only
//! ever sees 3 or 4 interleaved channels.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::error::CodecError;

/// An interleaved 8-bit pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: usize,
    pub height: usize,
    /// 3 (RGB) or 4 (RGBA)
    pub channels: usize,
    pub data: Vec<u8>,
}

impl RasterImage {
    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }
}

/// Decode PNG bytes into 8-bit RGB or RGBA.
///
/// Palette images are expanded, 16-bit samples are stripped to 8 bits,
/// greyscale becomes RGB and greyscale with alpha becomes RGBA.
pub fn decode_png(bytes: &[u8]) -> Result<RasterImage, CodecError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let width = info.width as usize;
    let height = info.height as usize;

    if info.bit_depth != png::BitDepth::Eight {
        return Err(CodecError::UnsupportedLayout {
            color_type: info.color_type,
            bit_depth: info.bit_depth,
        });
    }

    let (channels, data) = match info.color_type {
        png::ColorType::Rgb => (3, buf),
        png::ColorType::Rgba => (4, buf),
        png::ColorType::Grayscale => (3, buf.iter().flat_map(|&v| [v, v, v]).collect()),
        png::ColorType::GrayscaleAlpha => (
            4,
            buf.chunks_exact(2)
                .flat_map(|pair| [pair[0], pair[0], pair[0], pair[1]])
                .collect(),
        ),
        color_type => {
            return Err(CodecError::UnsupportedLayout {
                color_type,
                bit_depth: info.bit_depth,
            })
        }
    };

    tracing::trace!(width, height, channels, "Decoded PNG");
    Ok(RasterImage {
        width,
        height,
        channels,
        data,
    })
}

/// Encode an 8-bit RGB or RGBA buffer as PNG.
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>, CodecError> {
    let too_large = || CodecError::TooLarge {
        width: image.width,
        height: image.height,
    };
    let width = u32::try_from(image.width).map_err(|_| too_large())?;
    let height = u32::try_from(image.height).map_err(|_| too_large())?;
    let color_type = if image.has_alpha() {
        png::ColorType::Rgba
    } else {
        png::ColorType::Rgb
    };

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&image.data)?;
        writer.finish()?;
    }
    Ok(buf.into_inner())
}

/// Recompress PNG bytes with oxipng, keeping the input on failure.
pub fn optimize_png(png_bytes: Vec<u8>) -> Vec<u8> {
    let before = png_bytes.len();
    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => {
            tracing::debug!(before, after = optimized.len(), "Optimized PNG");
            optimized
        }
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, keeping unoptimized output");
            png_bytes
        }
    }
}

/// Ensure `path` names a format we can write.
pub fn check_output_format(path: &Path) -> Result<(), CodecError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    if extension.eq_ignore_ascii_case("png") {
        Ok(())
    } else {
        Err(CodecError::UnsupportedFormat {
            extension: extension.to_string(),
        })
    }
}

/// `<stem>_<suffix>.<ext>` beside `input`. Inputs without an extension
/// get `.png`.
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let extension = input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());
    input.with_file_name(format!("{stem}_{suffix}.{extension}"))
}

/// Read and decode a PNG file.
pub fn read_png(path: &Path) -> Result<RasterImage, CodecError> {
    let bytes = fs::read(path)?;
    decode_png(&bytes)
}

/// Encode, optionally optimize and write a PNG file. Returns the number
/// of bytes written.
pub fn write_png(path: &Path, image: &RasterImage, optimize: bool) -> Result<usize, CodecError> {
    check_output_format(path)?;
    let mut bytes = encode_png(image)?;
    if optimize {
        bytes = optimize_png(bytes);
    }
    fs::write(path, &bytes)?;
    Ok(bytes.len())
}
