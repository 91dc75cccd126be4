//! Palette - every loaded sheet's tiles as one scrollable, selectable list
//!
//! Sheets keep their load order. The flattened tile list is rebuilt whenever
//! a sheet is added, so readers never see a stale list. Selection is an
//! index into that list: two identical-looking tiles are still different
//! entries.

mod layout;

pub use layout::*;

use crate::tile::{Tile, TileSheet};

/// Default number of thumbnail columns
pub const PALETTE_COLS: usize = 8;

#[derive(Debug, Clone)]
pub struct Palette {
    sheets: Vec<TileSheet>,
    /// Cached concatenation of every sheet's tiles
    tiles: Vec<Tile>,
    selected: Option<usize>,
    /// First visible row
    scroll: usize,
    columns: usize,
    /// Sheet last chosen with a quick-switch key
    active_sheet: usize,
}

impl Palette {
    pub fn new(columns: usize) -> Self {
        Self {
            sheets: Vec::new(),
            tiles: Vec::new(),
            selected: None,
            scroll: 0,
            columns: columns.max(1),
            active_sheet: 0,
        }
    }

    /// Append a sheet and rebuild the flattened list
    ///
    /// Appending never removes entries, so an existing selection stays valid.
    pub fn add_sheet(&mut self, sheet: TileSheet) {
        self.sheets.push(sheet);
        self.rebuild();
        self.active_sheet = self.active_sheet.min(self.sheets.len() - 1);
    }

    fn rebuild(&mut self) {
        self.tiles = self
            .sheets
            .iter()
            .flat_map(|sheet| sheet.tiles().iter().cloned())
            .collect();
        if self.selected.is_some_and(|i| i >= self.tiles.len()) {
            self.selected = None;
        }
    }

    pub fn sheets(&self) -> &[TileSheet] {
        &self.sheets
    }

    /// All tiles in sheet order, then row-major within each sheet
    pub fn flattened_tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    pub fn active_sheet(&self) -> usize {
        self.active_sheet
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_tile(&self) -> Option<&Tile> {
        self.selected.and_then(|i| self.tiles.get(i))
    }

    /// Select the entry at a palette-grid position (row relative to scroll)
    ///
    /// Returns `false` and keeps the current selection when the position
    /// does not name an entry.
    pub fn select_at(&mut self, row: usize, col: usize) -> bool {
        if col >= self.columns {
            return false;
        }
        let index = row
            .checked_add(self.scroll)
            .and_then(|r| r.checked_mul(self.columns))
            .and_then(|i| i.checked_add(col));
        match index {
            Some(index) if index < self.tiles.len() => {
                self.selected = Some(index);
                true
            }
            _ => false,
        }
    }

    /// Scroll by `delta` rows, never above the first row
    ///
    /// There is no upper limit: scrolling past the end just shows nothing.
    pub fn scroll(&mut self, delta: i32) {
        self.scroll = self.scroll.saturating_add_signed(delta as isize);
    }

    /// Index of the first flattened entry contributed by `sheet_index`
    pub fn sheet_offset(&self, sheet_index: usize) -> usize {
        self.sheets.iter().take(sheet_index).map(TileSheet::len).sum()
    }

    /// Select the first tile of a sheet; no-op when the index is out of range
    pub fn select_first_of_sheet(&mut self, sheet_index: usize) -> bool {
        if sheet_index >= self.sheets.len() {
            return false;
        }
        self.active_sheet = sheet_index;
        self.selected = Some(self.sheet_offset(sheet_index));
        true
    }

    /// Entries on screen as `(index, row, col)`, rows counted from the top
    /// of the visible area
    pub fn visible_entries(&self, visible_rows: usize) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let start = self.scroll.saturating_mul(self.columns);
        let end = self
            .scroll
            .saturating_add(visible_rows)
            .saturating_mul(self.columns)
            .min(self.tiles.len());
        (start..end).map(move |i| (i, i / self.columns - self.scroll, i % self.columns))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(PALETTE_COLS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    /// Sheet of `count` 16px tiles in a single row, each filled with `shade + i`
    fn sheet(name: &str, count: u32, shade: u8) -> TileSheet {
        let img = RgbaImage::from_fn(16 * count, 16, |x, _| {
            Rgba([shade + (x / 16) as u8, 0, 0, 255])
        });
        TileSheet::from_image(name, &img, 16).unwrap()
    }

    #[test]
    fn test_flattened_concatenates_in_load_order() {
        let mut palette = Palette::new(8);
        palette.add_sheet(sheet("a", 3, 10));
        palette.add_sheet(sheet("b", 2, 100));

        let reds: Vec<u8> = palette
            .flattened_tiles()
            .iter()
            .map(|t| t.pixels().get_pixel(0, 0)[0])
            .collect();
        assert_eq!(reds, vec![10, 11, 12, 100, 101]);
        assert_eq!(palette.sheet_offset(1), 3);
    }

    #[test]
    fn test_select_at_uses_scroll() {
        let mut palette = Palette::new(4);
        palette.add_sheet(sheet("a", 10, 0));

        assert!(palette.select_at(0, 2));
        assert_eq!(palette.selected_index(), Some(2));

        palette.scroll(1);
        assert!(palette.select_at(1, 1));
        assert_eq!(palette.selected_index(), Some(9));
    }

    #[test]
    fn test_select_out_of_range_keeps_selection() {
        let mut palette = Palette::new(4);
        palette.add_sheet(sheet("a", 5, 0));
        assert!(palette.select_at(1, 0));

        assert!(!palette.select_at(1, 1));
        assert!(!palette.select_at(7, 0));
        assert!(!palette.select_at(0, 4));
        assert_eq!(palette.selected_index(), Some(4));
    }

    #[test]
    fn test_select_at_far_scroll_does_not_overflow() {
        let mut palette = Palette::new(4);
        palette.add_sheet(sheet("a", 5, 0));
        palette.scroll(i32::MAX);
        palette.scroll(i32::MAX);

        assert!(!palette.select_at(usize::MAX, 3));
        assert!(!palette.select_at(0, 0));
        assert_eq!(palette.selected_index(), None);
        assert_eq!(palette.visible_entries(10).count(), 0);
    }

    #[test]
    fn test_identical_tiles_are_distinct_entries() {
        let mut palette = Palette::new(8);
        palette.add_sheet(sheet("a", 1, 50));
        palette.add_sheet(sheet("a-copy", 1, 50));
        assert_eq!(palette.flattened_tiles()[0], palette.flattened_tiles()[1]);

        palette.select_at(0, 1);
        assert_eq!(palette.selected_index(), Some(1));
    }

    #[test]
    fn test_add_sheet_preserves_selection() {
        let mut palette = Palette::new(8);
        palette.add_sheet(sheet("a", 3, 0));
        palette.select_at(0, 2);
        palette.add_sheet(sheet("b", 4, 0));
        assert_eq!(palette.selected_index(), Some(2));
        assert_eq!(palette.len(), 7);
    }

    #[test]
    fn test_scroll_floor() {
        let mut palette = Palette::default();
        palette.scroll(-3);
        assert_eq!(palette.scroll_offset(), 0);
        palette.scroll(2);
        palette.scroll(-1);
        palette.scroll(-1);
        palette.scroll(-1);
        assert_eq!(palette.scroll_offset(), 0);
        palette.scroll(i32::MIN);
        assert_eq!(palette.scroll_offset(), 0);
    }

    #[test]
    fn test_scroll_past_end_is_valid() {
        let mut palette = Palette::new(8);
        palette.add_sheet(sheet("a", 3, 0));
        palette.scroll(5);
        assert_eq!(palette.scroll_offset(), 5);
        assert!(!palette.select_at(0, 0));
        assert_eq!(palette.visible_entries(10).count(), 0);
    }

    #[test]
    fn test_select_first_of_sheet() {
        let mut palette = Palette::new(8);
        palette.add_sheet(sheet("a", 3, 0));
        palette.add_sheet(sheet("b", 2, 0));

        assert!(palette.select_first_of_sheet(1));
        assert_eq!(palette.selected_index(), Some(3));
        assert_eq!(palette.active_sheet(), 1);

        assert!(!palette.select_first_of_sheet(2));
        assert_eq!(palette.selected_index(), Some(3));
    }

    #[test]
    fn test_visible_entries_rows_relative_to_scroll() {
        let mut palette = Palette::new(2);
        palette.add_sheet(sheet("a", 5, 0));
        palette.scroll(1);

        let entries: Vec<_> = palette.visible_entries(1).collect();
        assert_eq!(entries, vec![(2, 0, 0), (3, 0, 1)]);

        let entries: Vec<_> = palette.visible_entries(5).collect();
        assert_eq!(entries, vec![(2, 0, 0), (3, 0, 1), (4, 1, 0)]);
    }
}
