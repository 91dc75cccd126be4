//! Exporter - hands the canvas pixels to an image store

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::canvas::Canvas;
use crate::error::{ComposerError, Result};
use crate::io::ImageStore;

/// Current canvas pixels, or `NoCanvas` before a base image was opened
pub fn export(canvas: Option<&Canvas>) -> Result<RgbaImage> {
    canvas.map(Canvas::snapshot).ok_or(ComposerError::NoCanvas)
}

/// Encode the canvas to `path` through `store`, returning the path written
pub fn export_to(canvas: Option<&Canvas>, path: &Path, store: &dyn ImageStore) -> Result<PathBuf> {
    let image = export(canvas)?;
    store.save(&image, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CellPos;
    use crate::io::{FsImageStore, MemoryImageStore};
    use image::Rgba;
    use tempfile::TempDir;

    #[test]
    fn test_export_without_canvas() {
        assert_eq!(export(None), Err(ComposerError::NoCanvas));
        let store = MemoryImageStore::default();
        assert_eq!(
            export_to(None, Path::new("out.png"), &store),
            Err(ComposerError::NoCanvas)
        );
        assert!(store.saved.borrow().is_empty());
    }

    #[test]
    fn test_export_is_read_only() {
        let base = RgbaImage::from_pixel(32, 32, Rgba([4, 5, 6, 255]));
        let canvas = Canvas::from_image(&base, 16).unwrap();
        let revision = canvas.revision();

        assert_eq!(export(Some(&canvas)).unwrap(), base);
        assert_eq!(canvas.revision(), revision);
    }

    #[test]
    fn test_export_to_disk_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = FsImageStore::with_base_dir(dir.path());
        let mut canvas = Canvas::from_image(&RgbaImage::from_pixel(32, 16, Rgba([9, 9, 9, 255])), 16).unwrap();
        canvas.clear_cell(CellPos::new(16, 0));

        let written = export_to(Some(&canvas), Path::new("combined.png"), &store).unwrap();
        assert_eq!(written, PathBuf::from("combined.png"));
        let loaded = image::open(dir.path().join("combined.png")).unwrap().to_rgba8();
        assert_eq!(loaded, canvas.snapshot());
        assert_eq!(loaded.get_pixel(20, 4)[3], 0);
    }
}
