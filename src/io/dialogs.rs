//! Native file dialogs

use std::path::PathBuf;

use super::FilePrompt;

#[cfg(not(target_arch = "wasm32"))]
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Modal rfd dialogs (blocks the editor loop while open)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct NativePrompt;

#[cfg(not(target_arch = "wasm32"))]
impl NativePrompt {
    fn open_dialog(title: &str) -> rfd::FileDialog {
        rfd::FileDialog::new()
            .set_title(title)
            .add_filter("PNG images", &["png"])
            .add_filter("All images", IMAGE_EXTENSIONS)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl FilePrompt for NativePrompt {
    fn open_one(&self, title: &str) -> Option<PathBuf> {
        Self::open_dialog(title).pick_file()
    }

    fn open_many(&self, title: &str) -> Vec<PathBuf> {
        Self::open_dialog(title).pick_files().unwrap_or_default()
    }

    fn save_as(&self, title: &str) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title(title)
            .add_filter("PNG images", &["png"])
            .set_file_name("combined.png")
            .save_file()
    }
}

/// Prompt for builds without native dialogs; every request reads as cancelled
#[cfg(any(target_arch = "wasm32", test))]
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPrompt;

#[cfg(any(target_arch = "wasm32", test))]
impl FilePrompt for NoPrompt {
    fn open_one(&self, _title: &str) -> Option<PathBuf> {
        None
    }

    fn open_many(&self, _title: &str) -> Vec<PathBuf> {
        Vec::new()
    }

    fn save_as(&self, _title: &str) -> Option<PathBuf> {
        None
    }
}
