//! Error type shared by the composer core and its collaborators

use std::path::PathBuf;

/// Everything that can go wrong in a user-triggered action
///
/// Hit-testing outside the canvas is not an error: `Canvas::cell_at`
/// returns `None` and callers treat that as a no-op.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComposerError {
    /// Tile size must be between 1 and `MAX_TILE_SIZE` pixels
    #[error("invalid tile size: {0} (must be 1 to 1024)")]
    InvalidTileSize(u32),
    /// A buffer handed to `Tile::from_image` was not square
    #[error("tile image must be square, got {width}x{height}")]
    InvalidTileImage { width: u32, height: u32 },
    /// An image could not be read or decoded
    #[error("failed to open {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },
    /// An image could not be encoded or written
    #[error("failed to save {}: {message}", path.display())]
    Encode { path: PathBuf, message: String },
    /// An export or cell operation ran before a base image was opened
    #[error("no canvas: open a base tilesheet first")]
    NoCanvas,
    /// Settings file or command-line values were rejected
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ComposerError>;
