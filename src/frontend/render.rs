//! Frame drawing
//!
//! Reads editor state and draws it; never mutates canvas, palette or drag
//! state. GPU textures are cached and refreshed only when the canvas
//! revision, the palette length or the held tile changes.

use image::RgbaImage;
use macroquad::prelude::*;

use crate::canvas::{Canvas, CellPos};
use crate::editor::{EditorState, HeldTile};
use crate::palette::{preview_origin, Palette};

const INFO_FONT_SIZE: f32 = 16.0;
const SELECTION_COLOR: Color = Color::new(1.0, 1.0, 0.0, 1.0);
const INFO_COLOR: Color = Color::new(1.0, 1.0, 1.0, 1.0);
const HINT_COLOR: Color = Color::new(0.6, 0.6, 0.6, 1.0);
const ERROR_COLOR: Color = Color::new(1.0, 0.4, 0.4, 1.0);
const OK_COLOR: Color = Color::new(0.5, 1.0, 0.5, 1.0);

fn rgb(c: [u8; 3]) -> Color {
    Color::from_rgba(c[0], c[1], c[2], 255)
}

/// Upload an RGBA buffer as a pixel-exact texture
fn upload(image: &RgbaImage) -> Texture2D {
    let tex = Texture2D::from_rgba8(image.width() as u16, image.height() as u16, image.as_raw());
    tex.set_filter(FilterMode::Nearest);
    tex
}

#[derive(Default)]
pub struct Renderer {
    /// Canvas texture with the (generation, revision) it was built from
    canvas: Option<((u64, u64), Texture2D)>,
    /// One texture per flattened palette entry; the palette only ever grows
    thumbs: Vec<Texture2D>,
    /// Texture of the held tile, keyed by the cell it was lifted from
    held: Option<(CellPos, Texture2D)>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw(&mut self, state: &EditorState, help: &str) {
        let cfg = &state.config;
        clear_background(rgb(cfg.background));

        if let Some(canvas) = &state.canvas {
            let key = (state.canvas_generation, canvas.revision());
            let tex = self.canvas_texture(key, canvas);
            draw_texture(&tex, 0.0, 0.0, WHITE);
            if state.grid_visible {
                draw_grid(canvas, rgb(cfg.grid_color));
            }
        }

        if let Some(held) = state.drag.held() {
            self.draw_held(state, held);
        } else {
            self.held = None;
        }

        self.draw_palette(state);
        draw_hud(state, help);
    }

    fn canvas_texture(&mut self, key: (u64, u64), canvas: &Canvas) -> Texture2D {
        match &self.canvas {
            Some((cached, tex)) if *cached == key => tex.clone(),
            _ => {
                let tex = upload(canvas.pixels());
                self.canvas = Some((key, tex.clone()));
                tex
            }
        }
    }

    fn sync_thumbnails(&mut self, palette: &Palette) {
        let tiles = palette.flattened_tiles();
        if self.thumbs.len() > tiles.len() {
            self.thumbs.clear();
        }
        for tile in &tiles[self.thumbs.len()..] {
            self.thumbs.push(upload(tile.pixels()));
        }
    }

    fn draw_palette(&mut self, state: &EditorState) {
        let layout = state.palette_layout();
        let surface_h = screen_height();
        let panel = layout.panel_rect(surface_h);
        draw_rectangle(panel.x, panel.y, panel.w, panel.h, rgb(state.config.palette_background));

        self.sync_thumbnails(&state.palette);
        let selected = state.palette.selected_index();
        for (index, row, col) in state.palette.visible_entries(layout.visible_rows(surface_h)) {
            let Some(tex) = self.thumbs.get(index) else {
                continue;
            };
            let r = layout.thumb_rect(row, col);
            draw_texture_ex(
                tex,
                r.x,
                r.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(r.w, r.h)),
                    ..Default::default()
                },
            );
            if selected == Some(index) {
                draw_rectangle_lines(r.x, r.y, r.w, r.h, 2.0, SELECTION_COLOR);
            }
        }

        let sheets = state.palette.sheets();
        if let Some(sheet) = sheets.get(state.palette.active_sheet()) {
            let label = format!("Sheet {}/{}: {}", state.palette.active_sheet() + 1, sheets.len(), sheet.name);
            draw_text(&label, panel.x + layout.margin, surface_h - 10.0, INFO_FONT_SIZE, HINT_COLOR);
        }
    }

    fn draw_held(&mut self, state: &EditorState, held: &HeldTile) {
        let tex = match &self.held {
            Some((origin, tex)) if *origin == held.origin => tex.clone(),
            _ => {
                let tex = upload(held.tile.pixels());
                self.held = Some((held.origin, tex.clone()));
                tex
            }
        };

        let (px, py) = held.pointer;
        let cell = state
            .canvas
            .as_ref()
            .and_then(|c| c.cell_at_point(px, py))
            .map(|c| (c.x, c.y));
        let (x, y) = preview_origin(cell, held.pointer, state.tile_size());
        let tint = Color::from_rgba(255, 255, 255, state.config.preview_alpha);
        draw_texture(&tex, x, y, tint);
    }
}

fn draw_grid(canvas: &Canvas, color: Color) {
    let (w, h) = (canvas.width() as f32, canvas.height() as f32);
    let t = canvas.tile_size() as usize;
    for x in (0..canvas.width()).step_by(t) {
        draw_line(x as f32, 0.0, x as f32, h, 1.0, color);
    }
    for y in (0..canvas.height()).step_by(t) {
        draw_line(0.0, y as f32, w, y as f32, 1.0, color);
    }
}

/// Status (or key hints) above the info line, bottom-left
fn draw_hud(state: &EditorState, help: &str) {
    let bottom = screen_height();
    let (line, color) = match state.status() {
        Some(status) if status.is_error => (status.text.as_str(), ERROR_COLOR),
        Some(status) => (status.text.as_str(), OK_COLOR),
        None => (help, HINT_COLOR),
    };
    draw_text(line, 10.0, bottom - 30.0, INFO_FONT_SIZE, color);
    draw_text(&state.info_line(), 10.0, bottom - 10.0, INFO_FONT_SIZE, INFO_COLOR);
}
