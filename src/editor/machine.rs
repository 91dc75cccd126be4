//! The editor state machine
//!
//! One handler per (state, event) pair. Pointer handlers never touch the
//! collaborators; actions reach the outside world only through the
//! `ImageStore` and `FilePrompt` passed in, so everything here runs without
//! a window.

use std::path::Path;

use crate::canvas::Canvas;
use crate::config::EditorConfig;
use crate::error::{ComposerError, Result};
use crate::export;
use crate::io::{display_name, FilePrompt, ImageStore};
use crate::tile::TileSheet;

use super::{DragState, EditorAction, EditorState, Effect, HeldTile, PointerButton, PointerEvent};

const HOLDING_TILE: &str = "Drop the held tile first";

pub struct Editor {
    state: EditorState,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            state: EditorState::new(config),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn quit_requested(&self) -> bool {
        self.state.quit_requested
    }

    /// Advance time-based state (status message expiry)
    pub fn tick(&mut self, dt: f32) {
        self.state.tick(dt);
    }

    // ========================================================================
    // Pointer
    // ========================================================================

    /// Feed one pointer event through the state machine
    pub fn pointer(&mut self, event: PointerEvent) -> Effect {
        self.state.pointer = event.position();
        match event {
            PointerEvent::Down { button: PointerButton::Left, x, y } => self.press(x, y),
            PointerEvent::Up { button: PointerButton::Left, x, y } => self.release(x, y),
            PointerEvent::Move { x, y } => {
                self.state.drag.track(x, y);
                Effect::Nothing
            }
            PointerEvent::Scroll { delta, .. } => {
                self.state.palette.scroll(delta);
                Effect::Scrolled(self.state.palette.scroll_offset())
            }
            PointerEvent::Down { .. } | PointerEvent::Up { .. } => Effect::Nothing,
        }
    }

    fn press(&mut self, x: f32, y: f32) -> Effect {
        // A second press while a tile is held is ignored
        if self.state.drag.is_dragging() {
            return Effect::Nothing;
        }

        let layout = self.state.palette_layout();
        if layout.in_panel(x) {
            let Some((row, col)) = layout.hit(x, y) else {
                return Effect::Nothing;
            };
            if !self.state.palette.select_at(row, col) {
                return Effect::Nothing;
            }
            return self
                .state
                .palette
                .selected_index()
                .map_or(Effect::Nothing, Effect::Selected);
        }

        let Some(canvas) = self.state.canvas.as_mut() else {
            return Effect::Nothing;
        };
        let Some(cell) = canvas.cell_at_point(x, y) else {
            return Effect::Nothing;
        };

        let tile = canvas.read_cell(cell);
        if Canvas::is_non_empty(&tile) {
            canvas.clear_cell(cell);
            self.state.drag = DragState::Dragging(HeldTile {
                tile,
                origin: cell,
                pointer: (x, y),
            });
            log::debug!("lifted tile from ({}, {})", cell.x, cell.y);
            Effect::Lifted(cell)
        } else if let Some(selected) = self.state.palette.selected_tile() {
            canvas.write_cell(cell, selected);
            log::debug!("placed palette tile at ({}, {})", cell.x, cell.y);
            Effect::Placed(cell)
        } else {
            Effect::Nothing
        }
    }

    fn release(&mut self, x: f32, y: f32) -> Effect {
        let held = match std::mem::take(&mut self.state.drag) {
            DragState::Dragging(held) => held,
            DragState::Idle => return Effect::Nothing,
        };
        let Some(canvas) = self.state.canvas.as_mut() else {
            return Effect::Nothing;
        };

        match canvas.cell_at_point(x, y) {
            Some(to) if to != held.origin => {
                canvas.write_cell(to, &held.tile);
                log::debug!(
                    "moved tile ({}, {}) -> ({}, {})",
                    held.origin.x,
                    held.origin.y,
                    to.x,
                    to.y
                );
                Effect::Dropped { from: held.origin, to }
            }
            _ => {
                canvas.write_cell(held.origin, &held.tile);
                log::debug!("restored tile at ({}, {})", held.origin.x, held.origin.y);
                Effect::Restored(held.origin)
            }
        }
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Run an action, reporting the outcome on the status line
    pub fn run_action(&mut self, action: EditorAction, store: &dyn ImageStore, prompt: &dyn FilePrompt) -> Effect {
        let outcome = self.try_action(action, store, prompt);
        self.report(outcome)
    }

    /// Turn an action outcome into an `Effect`, logging and showing
    /// anything the user should see
    pub fn report(&mut self, outcome: Result<Effect>) -> Effect {
        let effect = match outcome {
            Ok(effect) => effect,
            Err(err) => {
                log::error!("{err}");
                Effect::Failed(err)
            }
        };
        if let Effect::Rejected(reason) = &effect {
            log::warn!("rejected: {reason}");
        }
        if let Some(text) = effect.status_text() {
            self.state.set_status(&text, effect.is_error());
        }
        effect
    }

    /// Run an action, returning collaborator failures to the caller
    ///
    /// A failed action leaves canvas, palette and drag state untouched.
    pub fn try_action(&mut self, action: EditorAction, store: &dyn ImageStore, prompt: &dyn FilePrompt) -> Result<Effect> {
        match action {
            EditorAction::OpenBase => {
                if self.state.drag.is_dragging() {
                    return Ok(Effect::Rejected(HOLDING_TILE));
                }
                match prompt.open_one("Open base tilesheet") {
                    Some(path) => self.open_base(&path, store),
                    None => Ok(Effect::Nothing),
                }
            }
            EditorAction::AddSheet => {
                let paths = prompt.open_many("Add palette tilesheets");
                if paths.is_empty() {
                    return Ok(Effect::Nothing);
                }
                Ok(self.add_sheets(&paths, store))
            }
            EditorAction::Save => {
                if self.state.drag.is_dragging() {
                    return Ok(Effect::Rejected(HOLDING_TILE));
                }
                if self.state.canvas.is_none() {
                    return Err(ComposerError::NoCanvas);
                }
                match prompt.save_as("Save combined tilesheet") {
                    Some(path) => self.save_to(&path, store),
                    None => Ok(Effect::Nothing),
                }
            }
            EditorAction::ToggleGrid => {
                self.state.grid_visible = !self.state.grid_visible;
                Ok(Effect::GridToggled(self.state.grid_visible))
            }
            EditorAction::Quit => {
                self.state.quit_requested = true;
                Ok(Effect::Quit)
            }
            EditorAction::Erase => self.erase_under_pointer(),
            EditorAction::SelectSheet(index) => {
                if self.state.palette.select_first_of_sheet(index) {
                    Ok(Effect::SheetSelected(index))
                } else {
                    Ok(Effect::Nothing)
                }
            }
        }
    }

    /// Replace the canvas with a decoded base image
    pub fn open_base(&mut self, path: &Path, store: &dyn ImageStore) -> Result<Effect> {
        if self.state.drag.is_dragging() {
            return Ok(Effect::Rejected(HOLDING_TILE));
        }
        let image = store.load(path)?;
        let canvas = Canvas::from_image(&image, self.state.tile_size())?;
        let (width, height) = (canvas.width(), canvas.height());
        let (cols, rows) = canvas.cell_grid();
        let name = display_name(path);

        self.state.canvas = Some(canvas);
        self.state.canvas_generation += 1;
        self.state.base_name = Some(name.clone());
        log::info!("opened base {} ({}x{}, {}x{} cells)", name, width, height, cols, rows);
        Ok(Effect::OpenedBase { name, width, height })
    }

    /// Decode, slice and append one palette sheet
    pub fn add_sheet(&mut self, path: &Path, store: &dyn ImageStore) -> Result<()> {
        let image = store.load(path)?;
        let sheet = TileSheet::from_image(display_name(path), &image, self.state.tile_size())?;
        log::info!("added sheet {} ({} tiles)", sheet.name, sheet.len());
        self.state.palette.add_sheet(sheet);
        log::debug!("palette now holds {} tiles", self.state.palette.len());
        Ok(())
    }

    /// Add several sheets; each path succeeds or fails on its own
    pub fn add_sheets(&mut self, paths: &[impl AsRef<Path>], store: &dyn ImageStore) -> Effect {
        let mut added = 0;
        let mut failed = 0;
        for path in paths {
            match self.add_sheet(path.as_ref(), store) {
                Ok(()) => added += 1,
                Err(err) => {
                    log::warn!("skipping sheet: {err}");
                    failed += 1;
                }
            }
        }
        Effect::AddedSheets { added, failed }
    }

    /// Export the canvas to `path`
    pub fn save_to(&mut self, path: &Path, store: &dyn ImageStore) -> Result<Effect> {
        if self.state.drag.is_dragging() {
            return Ok(Effect::Rejected(HOLDING_TILE));
        }
        let written = export::export_to(self.state.canvas.as_ref(), path, store)?;
        log::info!("saved combined tilesheet to {}", written.display());
        Ok(Effect::Saved(written))
    }

    fn erase_under_pointer(&mut self) -> Result<Effect> {
        if self.state.drag.is_dragging() {
            return Ok(Effect::Rejected("Can't erase while holding a tile"));
        }
        let (x, y) = self.state.pointer;
        let canvas = self.state.canvas.as_mut().ok_or(ComposerError::NoCanvas)?;
        match canvas.cell_at_point(x, y) {
            Some(cell) => {
                canvas.clear_cell(cell);
                log::debug!("erased cell ({}, {})", cell.x, cell.y);
                Ok(Effect::Erased(cell))
            }
            None => Ok(Effect::Nothing),
        }
    }
}
