//! Canvas - the single mutable image being edited
//!
//! The canvas is addressed in tile-aligned cells. `cell_at` is the only
//! hit-test: every place/lift/drop/erase resolves its target through it.
//! Dimensions are fixed at creation; edits never resize the buffer.

use image::{imageops, RgbaImage};

use crate::error::{ComposerError, Result};
use crate::tile::{Tile, TRANSPARENT};

/// Top-left pixel of a tile-aligned canvas cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub x: u32,
    pub y: u32,
}

impl CellPos {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: RgbaImage,
    tile_size: u32,
    /// Bumped on every mutation (renderers use it to refresh textures)
    revision: u64,
}

impl Canvas {
    /// Allocate a fully transparent canvas
    pub fn new(width: u32, height: u32, tile_size: u32) -> Result<Self> {
        if tile_size == 0 {
            return Err(ComposerError::InvalidTileSize(tile_size));
        }
        Ok(Self {
            pixels: RgbaImage::from_pixel(width, height, TRANSPARENT),
            tile_size,
            revision: 0,
        })
    }

    /// Create a canvas the size of `base`, seeded with its pixels
    pub fn from_image(base: &RgbaImage, tile_size: u32) -> Result<Self> {
        let mut canvas = Self::new(base.width(), base.height(), tile_size)?;
        imageops::replace(&mut canvas.pixels, base, 0, 0);
        Ok(canvas)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of cell columns and rows (partial edge cells included)
    pub fn cell_grid(&self) -> (u32, u32) {
        let t = self.tile_size;
        (self.width().div_ceil(t), self.height().div_ceil(t))
    }

    /// Cell containing pixel `(x, y)`, or `None` outside `[0, W) x [0, H)`
    pub fn cell_at(&self, x: i64, y: i64) -> Option<CellPos> {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return None;
        }
        let t = self.tile_size as i64;
        Some(CellPos::new((x / t * t) as u32, (y / t * t) as u32))
    }

    /// Same as `cell_at` for surface (floating point) coordinates
    pub fn cell_at_point(&self, x: f32, y: f32) -> Option<CellPos> {
        self.cell_at(x.floor() as i64, y.floor() as i64)
    }

    /// Detached copy of the block at `cell`
    ///
    /// Parts of a partial edge cell that fall outside the canvas read as
    /// transparent.
    pub fn read_cell(&self, cell: CellPos) -> Tile {
        let t = self.tile_size;
        let region = imageops::crop_imm(&self.pixels, cell.x, cell.y, t, t).to_image();
        let mut block = RgbaImage::from_pixel(t, t, TRANSPARENT);
        imageops::replace(&mut block, &region, 0, 0);
        // block is t x t with t > 0, so this cannot fail
        Tile::from_image(block).unwrap_or_else(|_| Tile::transparent(t))
    }

    /// True iff the tile has any non-transparent pixel
    pub fn is_non_empty(tile: &Tile) -> bool {
        !tile.is_empty()
    }

    /// Overwrite the block at `cell` with `tile`, replacing alpha (no blending)
    pub fn write_cell(&mut self, cell: CellPos, tile: &Tile) {
        debug_assert_eq!(tile.size(), self.tile_size);
        imageops::replace(&mut self.pixels, tile.pixels(), cell.x as i64, cell.y as i64);
        self.revision += 1;
    }

    /// Make the block at `cell` fully transparent
    pub fn clear_cell(&mut self, cell: CellPos) {
        let x_end = (cell.x + self.tile_size).min(self.width());
        let y_end = (cell.y + self.tile_size).min(self.height());
        for y in cell.y..y_end {
            for x in cell.x..x_end {
                self.pixels.put_pixel(x, y, TRANSPARENT);
            }
        }
        self.revision += 1;
    }

    /// Borrow the full pixel grid
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Copy of the full pixel grid for export
    pub fn snapshot(&self) -> RgbaImage {
        self.pixels.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(color: [u8; 4], size: u32) -> Tile {
        Tile::from_image(RgbaImage::from_pixel(size, size, Rgba(color))).unwrap()
    }

    fn base_32x16() -> RgbaImage {
        RgbaImage::from_fn(32, 16, |x, _| {
            if x < 16 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        })
    }

    #[test]
    fn test_from_image_copies_base() {
        let base = base_32x16();
        let canvas = Canvas::from_image(&base, 16).unwrap();
        assert_eq!(canvas.snapshot(), base);
        assert_eq!(canvas.cell_grid(), (2, 1));
    }

    #[test]
    fn test_zero_tile_size_rejected() {
        assert!(matches!(
            Canvas::new(16, 16, 0),
            Err(ComposerError::InvalidTileSize(0))
        ));
    }

    #[test]
    fn test_cell_at_snaps_and_bounds() {
        let canvas = Canvas::new(32, 16, 16).unwrap();
        assert_eq!(canvas.cell_at(0, 0), Some(CellPos::new(0, 0)));
        assert_eq!(canvas.cell_at(20, 5), Some(CellPos::new(16, 0)));
        assert_eq!(canvas.cell_at(31, 15), Some(CellPos::new(16, 0)));
        assert_eq!(canvas.cell_at(32, 0), None);
        assert_eq!(canvas.cell_at(0, 16), None);
        assert_eq!(canvas.cell_at(-1, 3), None);
        assert_eq!(canvas.cell_at_point(-0.5, 3.0), None);
        assert_eq!(canvas.cell_at_point(15.9, 0.2), Some(CellPos::new(0, 0)));
    }

    #[test]
    fn test_write_replaces_alpha() {
        let mut canvas = Canvas::from_image(&base_32x16(), 16).unwrap();
        let half_clear = solid([0, 255, 0, 0], 16);
        canvas.write_cell(CellPos::new(0, 0), &half_clear);

        // A transparent tile overwrites rather than blends
        assert_eq!(canvas.pixels().get_pixel(3, 3), &Rgba([0, 255, 0, 0]));
        assert_eq!(canvas.pixels().get_pixel(20, 3), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_read_write_round_trip_is_noop() {
        let base = base_32x16();
        let mut canvas = Canvas::from_image(&base, 16).unwrap();
        for cell in [CellPos::new(0, 0), CellPos::new(16, 0)] {
            let tile = canvas.read_cell(cell);
            canvas.write_cell(cell, &tile);
        }
        assert_eq!(canvas.snapshot(), base);
    }

    #[test]
    fn test_write_twice_is_idempotent() {
        let mut once = Canvas::from_image(&base_32x16(), 16).unwrap();
        let mut twice = once.clone();
        let tile = solid([9, 8, 7, 255], 16);

        once.write_cell(CellPos::new(16, 0), &tile);
        twice.write_cell(CellPos::new(16, 0), &tile);
        twice.write_cell(CellPos::new(16, 0), &tile);
        assert_eq!(once.snapshot(), twice.snapshot());
    }

    #[test]
    fn test_clear_cell_only_touches_its_block() {
        let mut canvas = Canvas::from_image(&base_32x16(), 16).unwrap();
        canvas.clear_cell(CellPos::new(0, 0));

        assert!(canvas.read_cell(CellPos::new(0, 0)).is_empty());
        assert_eq!(
            canvas.read_cell(CellPos::new(16, 0)),
            solid([0, 0, 255, 255], 16)
        );
    }

    #[test]
    fn test_partial_edge_cells() {
        // 20x20 canvas with 16px tiles: right and bottom cells are 4px wide
        let base = RgbaImage::from_pixel(20, 20, Rgba([1, 1, 1, 255]));
        let mut canvas = Canvas::from_image(&base, 16).unwrap();
        assert_eq!(canvas.cell_grid(), (2, 2));

        let edge = CellPos::new(16, 16);
        let tile = canvas.read_cell(edge);
        assert_eq!(tile.bounding_rect(), Some((0, 0, 4, 4)));

        canvas.write_cell(edge, &solid([7, 7, 7, 255], 16));
        assert_eq!((canvas.width(), canvas.height()), (20, 20));
        assert_eq!(canvas.pixels().get_pixel(19, 19), &Rgba([7, 7, 7, 255]));

        canvas.clear_cell(edge);
        assert_eq!(canvas.pixels().get_pixel(19, 19)[3], 0);
        assert_eq!(canvas.pixels().get_pixel(15, 15), &Rgba([1, 1, 1, 255]));
    }

    #[test]
    fn test_is_non_empty() {
        assert!(!Canvas::is_non_empty(&Tile::transparent(16)));
        assert!(Canvas::is_non_empty(&solid([0, 0, 0, 1], 16)));
    }

    #[test]
    fn test_revision_tracks_mutations() {
        let mut canvas = Canvas::new(32, 32, 16).unwrap();
        let start = canvas.revision();
        let _ = canvas.read_cell(CellPos::new(0, 0));
        let _ = canvas.snapshot();
        assert_eq!(canvas.revision(), start);

        canvas.clear_cell(CellPos::new(0, 0));
        canvas.write_cell(CellPos::new(16, 16), &Tile::transparent(16));
        assert_eq!(canvas.revision(), start + 2);
    }
}
