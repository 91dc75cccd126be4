//! Editor settings
//!
//! Stored as RON in the user config directory. A missing file means
//! defaults; a broken file is reported and also falls back to defaults so
//! the editor always starts.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ComposerError, Result};
use crate::palette::PALETTE_COLS;

/// Default tile edge length in pixels
pub const DEFAULT_TILE_SIZE: u32 = 16;

/// Largest accepted tile edge length in pixels
pub const MAX_TILE_SIZE: u32 = 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Tile edge length used for the canvas grid and sheet slicing
    pub tile_size: u32,
    /// Thumbnail columns in the palette panel
    pub palette_columns: usize,
    /// Thumbnail edge length in the palette panel
    pub thumb_size: u32,
    pub palette_margin: u32,
    /// Window never shrinks below this height when fitting a canvas
    pub min_window_height: u32,
    /// Grid overlay visible at startup
    pub grid_visible: bool,
    pub grid_color: [u8; 3],
    pub palette_background: [u8; 3],
    pub background: [u8; 3],
    /// Opacity of the floating tile while dragging
    pub preview_alpha: u8,
    /// How long status messages stay on screen
    pub status_seconds: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            palette_columns: PALETTE_COLS,
            thumb_size: 32,
            palette_margin: 10,
            min_window_height: 400,
            grid_visible: true,
            grid_color: [80, 80, 80],
            palette_background: [30, 30, 30],
            background: [40, 40, 40],
            preview_alpha: 200,
            status_seconds: 3.0,
        }
    }
}

impl EditorConfig {
    /// Reject values the editor cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.tile_size == 0 || self.tile_size > MAX_TILE_SIZE {
            return Err(ComposerError::InvalidTileSize(self.tile_size));
        }
        if self.palette_columns == 0 {
            return Err(ComposerError::Config("palette_columns must be at least 1".to_string()));
        }
        if self.thumb_size == 0 {
            return Err(ComposerError::Config("thumb_size must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Parse and validate settings from RON text
    pub fn from_ron(contents: &str) -> Result<Self> {
        let config: Self = ron::from_str(contents)
            .map_err(|e| ComposerError::Config(format!("failed to parse settings: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from a RON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ComposerError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_ron(&contents)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded settings from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty RON
    pub fn save(&self, path: &Path) -> Result<()> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .indentor("  ".to_string());
        let contents = ron::ser::to_string_pretty(self, pretty)
            .map_err(|e| ComposerError::Config(format!("failed to serialize settings: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ComposerError::Config(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }
        fs::write(path, contents).map_err(|e| {
            ComposerError::Config(format!("failed to write {}: {}", path.display(), e))
        })
    }

    /// Apply command-line overrides on top of file settings
    pub fn with_overrides(mut self, tile_size: Option<u32>, columns: Option<usize>) -> Result<Self> {
        if let Some(tile_size) = tile_size {
            self.tile_size = tile_size;
        }
        if let Some(columns) = columns {
            self.palette_columns = columns;
        }
        self.validate()?;
        Ok(self)
    }
}

/// Default settings location: `<config dir>/tile-composer/config.ron`
#[cfg(not(target_arch = "wasm32"))]
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tile-composer")
        .join("config.ron")
}

#[cfg(target_arch = "wasm32")]
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_defaults_are_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tile_size, 16);
        assert_eq!(config.palette_columns, 8);
        assert_eq!(config.thumb_size, 32);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = EditorConfig::from_ron("(tile_size: 8, grid_visible: false)").unwrap();
        assert_eq!(config.tile_size, 8);
        assert!(!config.grid_visible);
        assert_eq!(config.palette_columns, PALETTE_COLS);
    }

    #[test]
    fn test_zero_tile_size_rejected() {
        assert_eq!(
            EditorConfig::from_ron("(tile_size: 0)"),
            Err(ComposerError::InvalidTileSize(0))
        );
    }

    #[test]
    fn test_oversized_tile_size_rejected() {
        assert!(EditorConfig::from_ron("(tile_size: 1024)").is_ok());
        assert_eq!(
            EditorConfig::default().with_overrides(Some(1_000_000), None),
            Err(ComposerError::InvalidTileSize(1_000_000))
        );
    }

    #[test]
    fn test_save_fails_when_parent_is_a_file() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().join("config.ron");

        let result = EditorConfig::default().save(&path);
        assert!(matches!(result, Err(ComposerError::Config(msg)) if msg.starts_with("failed to create")));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.ron");

        let config = EditorConfig {
            tile_size: 24,
            grid_color: [1, 2, 3],
            ..Default::default()
        };
        config.save(&path).unwrap();

        assert_eq!(EditorConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_bad_file_falls_back_to_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid ron data").unwrap();

        assert!(EditorConfig::load(file.path()).is_err());
        assert_eq!(EditorConfig::load_or_default(file.path()), EditorConfig::default());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = EditorConfig::load_or_default(&dir.path().join("absent.ron"));
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = EditorConfig::default().with_overrides(Some(32), Some(4)).unwrap();
        assert_eq!((config.tile_size, config.palette_columns), (32, 4));

        assert!(EditorConfig::default().with_overrides(Some(0), None).is_err());
        assert!(EditorConfig::default().with_overrides(None, Some(0)).is_err());
    }
}
