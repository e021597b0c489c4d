//! Grid: the screen as a row-major vector of cells.
//!
//! The renderer keeps two grids (what is on the terminal and what should
//! be) and diffs them; the main loop paints a fresh grid for every frame.

use super::cell::Cell;
use super::rect::Rect;
use crate::style::{Modifiers, Rgb};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Colors and modifiers applied by [`Grid::put_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    /// Foreground color.
    pub fg: Rgb,
    /// Background color.
    pub bg: Rgb,
    /// Text modifiers.
    pub modifiers: Modifiers,
}

impl Pen {
    /// A pen without modifiers.
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            modifiers: Modifiers::empty(),
        }
    }

    /// Add modifiers (builder pattern).
    #[must_use]
    pub const fn with(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = self.modifiers.union(modifiers);
        self
    }
}

/// A grid of cells representing the terminal screen.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
}

impl Grid {
    /// Create a blank grid. Zero dimensions are bumped to 1.
    pub fn new(width: u16, height: u16) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
            width,
            height,
        }
    }

    /// Grid width in columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Grid height in rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The full-grid rectangle.
    #[inline]
    pub const fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Cell at (x, y), or `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Set the cell at (x, y). Returns `false` when out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Fill a rectangle (clamped to the grid) with copies of `cell`.
    pub fn fill_rect(&mut self, rect: Rect, cell: &Cell) {
        for y in rect.y..rect.bottom().min(self.height) {
            for x in rect.x..rect.right().min(self.width) {
                if let Some(idx) = self.index_of(x, y) {
                    self.cells[idx] = cell.clone();
                }
            }
        }
    }

    /// Fill the whole grid with blanks on `bg`.
    pub fn clear(&mut self, bg: Rgb) {
        self.cells.fill(Cell::blank(bg));
    }

    /// Resize to new dimensions, discarding content.
    pub fn resize(&mut self, width: u16, height: u16) {
        *self = Self::new(width, height);
    }

    /// Draw `text` starting at (x, y), never writing at or past column `limit`.
    ///
    /// Wide graphemes that would straddle `limit` are not drawn. Control
    /// characters are drawn as spaces. Returns the column after the last
    /// drawn grapheme.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, pen: Pen, limit: u16) -> u16 {
        let limit = limit.min(self.width);
        let mut col = x;
        for grapheme in text.graphemes(true) {
            let grapheme = if grapheme.chars().any(char::is_control) { " " } else { grapheme };
            let width = u16::try_from(grapheme.width().max(1)).unwrap_or(u16::MAX);
            if col.saturating_add(width) > limit {
                break;
            }
            let cell = Cell::from_grapheme(grapheme)
                .with_fg(pen.fg)
                .with_bg(pen.bg)
                .with_modifiers(pen.modifiers);
            self.set(col, y, cell);
            for extra in 1..width {
                self.set(col + extra, y, Cell::continuation(pen.bg));
            }
            col += width;
        }
        col
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.width))
    }

    /// Plain text of one row (continuations skipped), for tests and logs.
    pub fn row_text(&self, y: u16) -> String {
        let mut out = Vec::new();
        if let Some(row) = self.rows().nth(usize::from(y)) {
            for cell in row {
                cell.write_symbol(&mut out);
            }
        }
        String::from_utf8_lossy(&out).into_owned()
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEN: Pen = Pen::new(Rgb::WHITE, Rgb::BLACK);

    #[test]
    fn test_grid_bounds() {
        let grid = Grid::new(80, 24);
        assert!(grid.get(79, 23).is_some());
        assert!(grid.get(80, 23).is_none());
        assert!(grid.get(79, 24).is_none());
        assert_eq!(Grid::new(0, 0).width(), 1);
    }

    #[test]
    fn test_put_str_wide_and_limit() {
        let mut grid = Grid::new(10, 1);
        let end = grid.put_str(0, 0, "a日b", PEN, 10);
        assert_eq!(end, 4);
        assert!(grid.get(2, 0).unwrap().is_continuation());
        assert!(grid.row_text(0).starts_with("a日b "));

        // The wide char does not fit in the last column.
        let mut grid = Grid::new(3, 1);
        let end = grid.put_str(0, 0, "ab日", PEN, 3);
        assert_eq!(end, 2);
        assert_eq!(grid.row_text(0), "ab ");
    }

    #[test]
    fn test_put_str_control_chars() {
        let mut grid = Grid::new(4, 1);
        grid.put_str(0, 0, "a\u{7}b", PEN, 4);
        assert_eq!(grid.row_text(0), "a b ");
    }

    #[test]
    fn test_fill_rect_clamps() {
        let mut grid = Grid::new(4, 2);
        let red = Rgb::new(255, 0, 0);
        grid.fill_rect(Rect::new(2, 1, 10, 10), &Cell::blank(red));
        assert_eq!(grid.get(3, 1).unwrap().bg(), red);
        assert_eq!(grid.get(1, 1).unwrap().bg(), Rgb::BLACK);
        grid.clear(red);
        assert_eq!(grid.get(0, 0).unwrap().bg(), red);
    }
}
