//! Screen geometry for the palette panel
//!
//! The canvas is drawn at the surface origin; the palette occupies the
//! strip to its right. All conversions between surface points and
//! palette-grid positions live here.

/// Axis-aligned rectangle in surface coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[cfg(test)]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[cfg(test)]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[cfg(test)]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Thumbnail-grid geometry for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteLayout {
    /// Left edge of the palette panel (the canvas's right edge)
    pub panel_x: f32,
    /// Gap between the panel edge and the first thumbnail
    pub margin: f32,
    /// Thumbnail edge length
    pub thumb: f32,
    pub columns: usize,
}

impl PaletteLayout {
    pub fn new(canvas_width: u32, margin: u32, thumb: u32, columns: usize) -> Self {
        Self {
            panel_x: canvas_width as f32,
            margin: margin as f32,
            thumb: thumb.max(1) as f32,
            columns: columns.max(1),
        }
    }

    /// Width of the palette panel including both margins
    pub fn panel_width(&self) -> f32 {
        self.thumb * self.columns as f32 + self.margin * 2.0
    }

    /// Everything right of the canvas edge routes to the palette
    pub fn in_panel(&self, x: f32) -> bool {
        x >= self.panel_x
    }

    /// Panel rectangle for a surface of the given height
    pub fn panel_rect(&self, surface_height: f32) -> Rect {
        Rect::new(self.panel_x, 0.0, self.panel_width(), surface_height)
    }

    /// Palette-grid position `(row, col)` under a surface point
    ///
    /// Rows are relative to the current scroll offset. Points left of or
    /// above the first thumbnail give `None`.
    pub fn hit(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let px = (x - self.panel_x - self.margin).floor();
        let py = (y - self.margin).floor();
        if px < 0.0 || py < 0.0 {
            return None;
        }
        let col = (px / self.thumb).floor() as usize;
        let row = (py / self.thumb).floor() as usize;
        Some((row, col))
    }

    /// Rectangle of the thumbnail at `(row, col)` of the visible grid
    pub fn thumb_rect(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            self.panel_x + self.margin + col as f32 * self.thumb,
            self.margin + row as f32 * self.thumb,
            self.thumb,
            self.thumb,
        )
    }

    /// Whole thumbnail rows that fit on a surface of the given height
    pub fn visible_rows(&self, surface_height: f32) -> usize {
        ((surface_height - self.margin) / self.thumb).ceil().max(0.0) as usize
    }

    /// Window size that fits the canvas plus the palette panel
    pub fn preferred_window_size(&self, canvas_height: u32, min_height: u32) -> (u32, u32) {
        let width = self.panel_x + self.panel_width();
        (width.ceil() as u32, canvas_height.max(min_height))
    }
}

/// Top-left corner for the floating drag preview
///
/// `cell` is the canvas cell under the pointer, if any. Off-canvas, the
/// preview still snaps to the tile grid extended past the canvas edges.
pub fn preview_origin(cell: Option<(u32, u32)>, pointer: (f32, f32), tile_size: u32) -> (f32, f32) {
    match cell {
        Some((x, y)) => (x as f32, y as f32),
        None => {
            let t = tile_size.max(1) as f32;
            ((pointer.0 / t).floor() * t, (pointer.1 / t).floor() * t)
        }
    }
}
