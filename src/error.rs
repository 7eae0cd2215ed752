use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("PNG decode error: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("Unsupported output format '{extension}' (only .png is supported)")]
    UnsupportedFormat { extension: String },

    #[error("Unsupported pixel layout: {color_type:?} at {bit_depth:?}")]
    UnsupportedLayout {
        color_type: png::ColorType,
        bit_depth: png::BitDepth,
    },

    #[error("Image too large: {width}x{height}")]
    TooLarge { width: usize, height: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteFileError {
    #[error("Palette not found: {name}")]
    NotFound { name: String },

    #[error("Malformed color in palette '{section}' at line {line}: {content}")]
    MalformedLine {
        section: String,
        line: usize,
        content: String,
    },

    #[error("Palette '{name}' has no colors")]
    Empty { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format() {
        let error = CodecError::UnsupportedFormat {
            extension: "jpg".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unsupported output format 'jpg' (only .png is supported)"
        );
    }

    #[test]
    fn test_too_large() {
        let error = CodecError::TooLarge {
            width: 70000,
            height: 1,
        };
        assert_eq!(error.to_string(), "Image too large: 70000x1");
    }

    #[test]
    fn test_codec_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = CodecError::from(io_error);
        assert!(error.to_string().contains("IO error"));
    }

    #[test]
    fn test_palette_not_found() {
        let error = PaletteFileError::NotFound {
            name: "sunset".to_string(),
        };
        assert_eq!(error.to_string(), "Palette not found: sunset");
    }

    #[test]
    fn test_malformed_line() {
        let error = PaletteFileError::MalformedLine {
            section: "bw".to_string(),
            line: 4,
            content: "12 x 9".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Malformed color in palette 'bw' at line 4: 12 x 9"
        );
    }

    #[test]
    fn test_empty_palette() {
        let error = PaletteFileError::Empty {
            name: "blank".to_string(),
        };
        assert_eq!(error.to_string(), "Palette 'blank' has no colors");
    }
}
