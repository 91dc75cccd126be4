//! Tile sheets - decoded images sliced into a row-major grid of tiles

use image::{imageops, RgbaImage};

use super::Tile;
use crate::error::{ComposerError, Result};

/// Slice an image into `tile_size` squares, row-major from the top-left
///
/// Always yields at least one tile: an image smaller than a tile produces a
/// single tile holding whatever content exists, padded with transparency.
/// Edge tiles that run past the image are padded the same way.
pub fn slice(image: &RgbaImage, tile_size: u32) -> Result<Vec<Tile>> {
    if tile_size == 0 {
        return Err(ComposerError::InvalidTileSize(tile_size));
    }

    let (cols, rows) = grid_dimensions(image.width(), image.height(), tile_size);
    let mut tiles = Vec::with_capacity((cols * rows) as usize);

    for row in 0..rows {
        for col in 0..cols {
            let x = col * tile_size;
            let y = row * tile_size;
            // crop_imm clamps the rect to the image bounds
            let region = imageops::crop_imm(image, x, y, tile_size, tile_size).to_image();
            let mut tile = Tile::transparent(tile_size);
            imageops::replace(&mut tile.pixels, &region, 0, 0);
            tiles.push(tile);
        }
    }

    Ok(tiles)
}

/// Columns and rows of tiles for an image, each clamped to at least 1
pub fn grid_dimensions(width: u32, height: u32, tile_size: u32) -> (u32, u32) {
    let cols = (width / tile_size).max(1);
    let rows = (height / tile_size).max(1);
    (cols, rows)
}

/// A source image sliced into tiles
#[derive(Debug, Clone)]
pub struct TileSheet {
    /// Display name (usually the file name)
    pub name: String,
    /// Source image width in pixels
    pub width: u32,
    /// Source image height in pixels
    pub height: u32,
    pub tile_size: u32,
    pub cols: u32,
    pub rows: u32,
    tiles: Vec<Tile>,
}

impl TileSheet {
    /// Slice `image` into a new sheet
    pub fn from_image(name: impl Into<String>, image: &RgbaImage, tile_size: u32) -> Result<Self> {
        let tiles = slice(image, tile_size)?;
        let (cols, rows) = grid_dimensions(image.width(), image.height(), tile_size);
        Ok(Self {
            name: name.into(),
            width: image.width(),
            height: image.height(),
            tile_size,
            cols,
            rows,
            tiles,
        })
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Source rectangle `(x, y, w, h)` tile `index` was cropped from
    #[cfg(test)]
    pub fn tile_rect(&self, index: usize) -> Option<(u32, u32, u32, u32)> {
        if index >= self.tiles.len() {
            return None;
        }
        let index = index as u32;
        let col = index % self.cols;
        let row = index / self.cols;
        Some((col * self.tile_size, row * self.tile_size, self.tile_size, self.tile_size))
    }
}
