//! Asset loading with embedded fallbacks
//!
//! The palette definitions and the default config are compiled into the
//! binary. Either can be overridden by a file on disk:
//!
//! - If no path is configured: use the embedded asset (no filesystem access)
//! - If a path is configured and exists: read it from the filesystem
//! - If a path is configured but missing: fall back to the embedded asset

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Embedded default assets (palette definitions and config)
#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "*.txt"]
#[include = "*.yaml"]
struct EmbeddedAssets;

pub const PALETTES_FILE: &str = "palettes.txt";
pub const CONFIG_FILE: &str = "config.yaml";

/// Environment variable naming an external palette definitions file
pub const PALETTES_ENV: &str = "RECOLOR_PALETTES";
/// Environment variable naming an external config file
pub const CONFIG_ENV: &str = "RECOLOR_CONFIG";

/// Asset category for selective operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Palettes,
    Config,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 2] = [AssetCategory::Palettes, AssetCategory::Config];

    /// Name of the embedded file backing this category
    pub fn file_name(self) -> &'static str {
        match self {
            AssetCategory::Palettes => PALETTES_FILE,
            AssetCategory::Config => CONFIG_FILE,
        }
    }
}

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Asset loader with optional filesystem override
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External palette definitions (from --palettes or RECOLOR_PALETTES)
    palettes_file: Option<PathBuf>,
    /// External config file (from --config or RECOLOR_CONFIG)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// Paths should be `Some` only if the user configured them.
    /// If `None`, embedded assets are used exclusively.
    pub fn new(palettes_file: Option<PathBuf>, config_file: Option<PathBuf>) -> Self {
        Self {
            palettes_file,
            config_file,
        }
    }

    /// Resolve paths from explicit flags, falling back to the environment
    pub fn from_env(palettes_file: Option<PathBuf>, config_file: Option<PathBuf>) -> Self {
        let palettes_file =
            palettes_file.or_else(|| std::env::var(PALETTES_ENV).ok().map(PathBuf::from));
        let config_file = config_file.or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));
        Self::new(palettes_file, config_file)
    }

    fn external(&self, category: AssetCategory) -> Option<&PathBuf> {
        match category {
            AssetCategory::Palettes => self.palettes_file.as_ref(),
            AssetCategory::Config => self.config_file.as_ref(),
        }
    }

    /// Read an asset
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to the embedded file.
    pub fn read(&self, category: AssetCategory) -> io::Result<Cow<'static, [u8]>> {
        // Try external first
        if let Some(path) = self.external(category) {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading asset from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
            tracing::warn!(path = %path.display(), "Configured asset not found, using embedded default");
        }

        // Fall back to embedded
        let name = category.file_name();
        EmbeddedAssets::get(name)
            .map(|f| {
                tracing::trace!(asset = name, "Loading asset from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Embedded {name} not found"),
                )
            })
    }

    /// Read an asset as a UTF-8 string
    pub fn read_string(&self, category: AssetCategory) -> io::Result<String> {
        let bytes = self.read(category)?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Read the palette definitions file
    pub fn read_palettes_string(&self) -> io::Result<String> {
        self.read_string(AssetCategory::Palettes)
    }

    /// Read the config file
    pub fn read_config_string(&self) -> io::Result<String> {
        self.read_string(AssetCategory::Config)
    }

    /// Extract embedded assets to filesystem (init command)
    ///
    /// Uses the configured paths, or the file name in the working directory.
    pub fn init(&self, categories: &[AssetCategory], force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();

        for &category in categories {
            let path = self
                .external(category)
                .cloned()
                .unwrap_or_else(|| PathBuf::from(category.file_name()));

            if !force && path.exists() {
                report.skipped.push(path.display().to_string());
                continue;
            }
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            if let Some(data) = EmbeddedAssets::get(category.file_name()) {
                fs::write(&path, &*data.data)?;
                report.written.push(path.display().to_string());
            }
        }

        Ok(report)
    }

    /// List embedded assets (for display)
    pub fn list_embedded() -> Vec<String> {
        let mut files: Vec<String> = EmbeddedAssets::iter().map(|s| s.to_string()).collect();
        files.sort();
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_assets_present() {
        assert_eq!(
            AssetLoader::list_embedded(),
            vec!["config.yaml".to_string(), "palettes.txt".to_string()]
        );
    }

    #[test]
    fn test_embedded_fallback() {
        let loader = AssetLoader::new(None, None);
        let palettes = loader.read_palettes_string().unwrap();
        assert!(palettes.contains("[bw]"));
        let config = loader.read_config_string().unwrap();
        assert!(config.contains("mode:"));
    }

    #[test]
    fn test_missing_external_falls_back() {
        let loader = AssetLoader::new(Some(PathBuf::from("/nonexistent/palettes.txt")), None);
        assert!(loader.read_palettes_string().unwrap().contains("[bw]"));
    }

    #[test]
    fn test_external_overrides_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mine.txt");
        fs::write(&path, "[mine]\n1 2 3\n").unwrap();

        let loader = AssetLoader::new(Some(path), None);
        assert_eq!(loader.read_palettes_string().unwrap(), "[mine]\n1 2 3\n");
    }

    #[test]
    fn test_init_writes_then_skips() {
        let dir = tempfile::tempdir().unwrap();
        let palettes = dir.path().join("out/palettes.txt");
        let config = dir.path().join("config.yaml");
        let loader = AssetLoader::new(Some(palettes.clone()), Some(config.clone()));

        let report = loader.init(&AssetCategory::ALL, false).unwrap();
        assert_eq!(report.written.len(), 2);
        assert!(report.skipped.is_empty());
        assert!(palettes.exists());
        assert!(config.exists());

        let report = loader.init(&AssetCategory::ALL, false).unwrap();
        assert!(report.written.is_empty());
        assert_eq!(report.skipped.len(), 2);

        let report = loader.init(&[AssetCategory::Config], true).unwrap();
        assert_eq!(report.written, vec![config.display().to_string()]);
    }
}
