//! External collaborators: image decoding/encoding and file selection
//!
//! The editor only talks to these traits. The native build plugs in the
//! filesystem store (backed by the `image` crate) and rfd dialogs; tests
//! plug in in-memory fakes.

mod dialogs;
mod local;

pub use dialogs::*;
pub use local::*;

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::error::Result;

/// Decodes and encodes raster images
pub trait ImageStore {
    /// Decode the image at `path` into RGBA pixels
    fn load(&self, path: &Path) -> Result<RgbaImage>;

    /// Encode `image` to `path`
    ///
    /// Returns the path actually written, which may differ from `path` when
    /// the store fills in a default extension.
    fn save(&self, image: &RgbaImage, path: &Path) -> Result<PathBuf>;
}

/// Asks the user for file paths. `None`/empty means the user cancelled.
pub trait FilePrompt {
    fn open_one(&self, title: &str) -> Option<PathBuf>;

    fn open_many(&self, title: &str) -> Vec<PathBuf>;

    fn save_as(&self, title: &str) -> Option<PathBuf>;
}

/// Display name for a loaded file (file name, falling back to the full path)
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
pub use fakes::*;
