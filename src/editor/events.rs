//! Input events consumed by the editor and the effects they produce

use std::path::PathBuf;

use crate::canvas::CellPos;
use crate::error::ComposerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
}

/// Pointer input in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { button: PointerButton, x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { button: PointerButton, x: f32, y: f32 },
    /// Wheel notches in palette rows (positive scrolls down)
    Scroll { x: f32, y: f32, delta: i32 },
}

impl PointerEvent {
    pub fn position(&self) -> (f32, f32) {
        match *self {
            PointerEvent::Down { x, y, .. }
            | PointerEvent::Move { x, y }
            | PointerEvent::Up { x, y, .. }
            | PointerEvent::Scroll { x, y, .. } => (x, y),
        }
    }
}

/// Keyboard-triggered editor commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorAction {
    OpenBase,
    AddSheet,
    Save,
    ToggleGrid,
    Quit,
    /// Clear the cell under the pointer
    Erase,
    /// Quick-switch to a sheet (zero-based index)
    SelectSheet(usize),
}

/// What an event did
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Nothing,
    /// Palette entry selected (flattened index)
    Selected(usize),
    /// Selected palette tile written into an empty cell
    Placed(CellPos),
    /// Tile lifted off the canvas; a drag is in progress
    Lifted(CellPos),
    /// Held tile committed to a different cell
    Dropped { from: CellPos, to: CellPos },
    /// Held tile put back where it came from (same-cell or off-canvas drop)
    Restored(CellPos),
    Erased(CellPos),
    Scrolled(usize),
    GridToggled(bool),
    SheetSelected(usize),
    OpenedBase { name: String, width: u32, height: u32 },
    AddedSheets { added: usize, failed: usize },
    Saved(PathBuf),
    Quit,
    /// Event refused in the current state
    Rejected(&'static str),
    /// Action failed; editor state is unchanged
    Failed(ComposerError),
}

impl Effect {
    /// Status-line text for effects the user should be told about
    pub fn status_text(&self) -> Option<String> {
        match self {
            Effect::OpenedBase { name, width, height } => {
                Some(format!("Opened {} ({}x{})", name, width, height))
            }
            Effect::AddedSheets { added, failed: 0 } => Some(format!("Added {} sheet(s)", added)),
            Effect::AddedSheets { added, failed } => {
                Some(format!("Added {} sheet(s), {} failed to open", added, failed))
            }
            Effect::Saved(path) => Some(format!("Saved combined tilesheet to {}", path.display())),
            Effect::Rejected(reason) => Some(reason.to_string()),
            Effect::Failed(err) => Some(err.to_string()),
            _ => None,
        }
    }

    /// True for outcomes shown as errors
    pub fn is_error(&self) -> bool {
        match self {
            Effect::Failed(_) => true,
            Effect::AddedSheets { failed, .. } => *failed > 0,
            _ => false,
        }
    }
}
