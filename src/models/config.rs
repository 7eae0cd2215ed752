use crate::assets::AssetLoader;
use recolor_core::quantize::{DEFAULT_CHUNK_PIXELS, DEFAULT_RESOLUTION};
use serde::Deserialize;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Color reduction mode name
    pub mode: String,

    /// Palette name for search and equidistant
    pub palette: String,

    /// Level count for self, self-sort and bw
    pub resolution: u32,

    /// Pre-quantization blur radius (0 disables)
    pub blur_radius: usize,

    /// Post-quantization antialias radius (0 disables)
    pub antialias_radius: usize,

    /// Pixels per search worker
    pub chunk_pixels: usize,

    /// Recompress output with oxipng
    pub optimize: bool,

    /// Edge map settings
    pub edges: EdgesConfig,
}

/// Settings for the `edges` command
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EdgesConfig {
    /// Narrow deviation of the difference-of-gaussians detector
    pub sigma: f32,
}

impl Default for EdgesConfig {
    fn default() -> Self {
        Self { sigma: 1.0 }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: "search".to_string(),
            palette: "bw".to_string(),
            resolution: DEFAULT_RESOLUTION,
            blur_radius: 0,
            antialias_radius: 0,
            chunk_pixels: DEFAULT_CHUNK_PIXELS,
            optimize: false,
            edges: EdgesConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // A document without content is null, not an empty mapping
        let blank = content.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        });
        if blank {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::debug!(
                        mode = %config.mode,
                        palette = %config.palette,
                        resolution = config.resolution,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}
