//! Drag state for lifting a tile off the canvas and dropping it elsewhere

use crate::canvas::CellPos;
use crate::tile::Tile;

/// A tile lifted off the canvas, waiting to be dropped
#[derive(Debug, Clone, PartialEq)]
pub struct HeldTile {
    /// Detached copy of the lifted pixels
    pub tile: Tile,
    /// Cell the tile was lifted from (restored there on an off-canvas drop)
    pub origin: CellPos,
    /// Last observed pointer position
    pub pointer: (f32, f32),
}

/// Pointer state machine: either idle or carrying exactly one tile
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(HeldTile),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    pub fn held(&self) -> Option<&HeldTile> {
        match self {
            DragState::Idle => None,
            DragState::Dragging(held) => Some(held),
        }
    }

    /// Record the pointer position of an in-flight drag
    pub fn track(&mut self, x: f32, y: f32) {
        if let DragState::Dragging(held) = self {
            held.pointer = (x, y);
        }
    }
}
