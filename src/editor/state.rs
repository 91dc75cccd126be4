//! Editor state aggregate

use crate::canvas::Canvas;
use crate::config::EditorConfig;
use crate::palette::{Palette, PaletteLayout};

use super::DragState;

/// Transient message shown in the status line
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    /// Seconds until the message disappears
    pub remaining: f32,
}

/// Everything the editor owns
///
/// Canvas, palette and drag state are separate members; only the state
/// machine in `Editor` mutates them together.
#[derive(Debug, Clone)]
pub struct EditorState {
    pub config: EditorConfig,
    /// `None` until a base image is opened
    pub canvas: Option<Canvas>,
    /// Bumped each time a base image replaces the canvas
    pub canvas_generation: u64,
    pub palette: Palette,
    pub drag: DragState,
    /// Display-only grid overlay toggle
    pub grid_visible: bool,
    /// Last pointer position seen in any pointer event
    pub pointer: (f32, f32),
    /// Name of the opened base image
    pub base_name: Option<String>,
    pub quit_requested: bool,
    status: Option<StatusMessage>,
}

impl EditorState {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            palette: Palette::new(config.palette_columns),
            grid_visible: config.grid_visible,
            config,
            canvas: None,
            canvas_generation: 0,
            drag: DragState::Idle,
            pointer: (0.0, 0.0),
            base_name: None,
            quit_requested: false,
            status: None,
        }
    }

    pub fn tile_size(&self) -> u32 {
        self.config.tile_size
    }

    /// Canvas width, or 0 when nothing is open
    pub fn canvas_width(&self) -> u32 {
        self.canvas.as_ref().map_or(0, Canvas::width)
    }

    /// Palette geometry for the current canvas
    pub fn palette_layout(&self) -> PaletteLayout {
        PaletteLayout::new(
            self.canvas_width(),
            self.config.palette_margin,
            self.config.thumb_size,
            self.palette.columns(),
        )
    }

    /// Window size fitting the canvas and the palette panel
    pub fn preferred_window_size(&self) -> (u32, u32) {
        let canvas_height = self.canvas.as_ref().map_or(0, Canvas::height);
        self.palette_layout()
            .preferred_window_size(canvas_height, self.config.min_window_height)
    }

    pub fn set_status(&mut self, text: &str, is_error: bool) {
        self.status = Some(StatusMessage {
            text: text.to_string(),
            is_error,
            remaining: self.config.status_seconds,
        });
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Age the status message by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        if let Some(status) = &mut self.status {
            status.remaining -= dt;
            if status.remaining <= 0.0 {
                self.status = None;
            }
        }
    }

    /// One-line summary for the HUD
    pub fn info_line(&self) -> String {
        let mut line = format!(
            "Tile size: {}  Palette sheets: {}  Selected: {}",
            self.tile_size(),
            self.palette.sheets().len(),
            if self.palette.selected_index().is_some() { "yes" } else { "no" },
        );
        if self.drag.is_dragging() {
            line.push_str("  Holding tile");
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_and_empty() {
        let state = EditorState::new(EditorConfig::default());
        assert!(state.canvas.is_none());
        assert!(state.palette.is_empty());
        assert!(!state.drag.is_dragging());
        assert!(state.grid_visible);
        assert_eq!(state.canvas_width(), 0);
    }

    #[test]
    fn test_status_expires() {
        let mut state = EditorState::new(EditorConfig {
            status_seconds: 1.0,
            ..Default::default()
        });
        state.set_status("Saved", false);
        state.tick(0.6);
        assert_eq!(state.status().map(|s| s.text.as_str()), Some("Saved"));
        state.tick(0.6);
        assert!(state.status().is_none());
    }

    #[test]
    fn test_info_line() {
        let state = EditorState::new(EditorConfig::default());
        assert_eq!(state.info_line(), "Tile size: 16  Palette sheets: 0  Selected: no");
    }

    #[test]
    fn test_preferred_window_size_without_canvas() {
        let state = EditorState::new(EditorConfig::default());
        assert_eq!(state.preferred_window_size(), (276, 400));
    }
}
