//! Filesystem image store backed by the `image` crate

use std::path::{Path, PathBuf};

use image::RgbaImage;

use super::ImageStore;
use crate::error::{ComposerError, Result};

/// Extension used when a save path has none
const DEFAULT_EXTENSION: &str = "png";

/// Reads and writes image files on the local filesystem
///
/// Relative paths resolve against `base_dir`.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    base_dir: PathBuf,
}

impl Default for FsImageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FsImageStore {
    /// Store rooted at the current directory
    pub fn new() -> Self {
        Self::with_base_dir(".")
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }
}

/// Path with `.png` appended when no extension was given
pub fn with_default_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

impl ImageStore for FsImageStore {
    fn load(&self, path: &Path) -> Result<RgbaImage> {
        let full = self.resolve(path);
        let decoded = image::open(&full).map_err(|e| ComposerError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(decoded.to_rgba8())
    }

    fn save(&self, image: &RgbaImage, path: &Path) -> Result<PathBuf> {
        let target = with_default_extension(path);
        image.save(self.resolve(&target)).map_err(|e| ComposerError::Encode {
            path: target.clone(),
            message: e.to_string(),
        })?;
        Ok(target)
    }
}
