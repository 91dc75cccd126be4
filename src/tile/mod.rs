//! Tiles - fixed-size RGBA blocks, the atomic unit of editing
//!
//! A `Tile` owns its pixels. Cloning a tile produces an independent copy,
//! so a tile lifted off the canvas never aliases canvas memory.

mod sheet;

pub use sheet::*;

use image::{Rgba, RgbaImage};

use crate::error::{ComposerError, Result};

/// Fully transparent pixel
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// A square block of RGBA pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pixels: RgbaImage,
}

impl Tile {
    /// Create a fully transparent tile
    pub fn transparent(size: u32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(size, size, TRANSPARENT),
        }
    }

    /// Wrap an existing square buffer
    pub fn from_image(pixels: RgbaImage) -> Result<Self> {
        let (width, height) = pixels.dimensions();
        if width != height || width == 0 {
            return Err(ComposerError::InvalidTileImage { width, height });
        }
        Ok(Self { pixels })
    }

    /// Edge length in pixels
    pub fn size(&self) -> u32 {
        self.pixels.width()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Tight bounding box `(x, y, w, h)` of pixels with non-zero alpha
    ///
    /// Returns `None` for a fully transparent tile.
    pub fn bounding_rect(&self) -> Option<(u32, u32, u32, u32)> {
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0;
        let mut max_y = 0;
        let mut found = false;

        for (x, y, px) in self.pixels.enumerate_pixels() {
            if px[3] == 0 {
                continue;
            }
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        found.then(|| (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }

    /// True when every pixel is fully transparent
    pub fn is_empty(&self) -> bool {
        self.bounding_rect().is_none()
    }
}
