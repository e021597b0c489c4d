//! Preview pane: paints the viewport into the grid in the theme's colors.

use super::grid::{Grid, Pen};
use super::projector::Projection;
use super::rect::Rect;
use super::viewport::Viewport;
use super::Cell;
use crate::style::{Modifiers, StyleTable, Theme};

/// Where to draw the caret, in source coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caret {
    /// Source line.
    pub line: usize,
    /// Byte offset within the line.
    pub byte: usize,
}

impl Caret {
    /// Caret just after the last character of `text`.
    pub fn at_end(text: &str) -> Self {
        let line = text.matches('\n').count();
        let line_start = text.rfind('\n').map_or(0, |i| i + 1);
        let last = &text[line_start..];
        let last = last.strip_suffix('\r').unwrap_or(last);
        Self {
            line,
            byte: last.len(),
        }
    }
}

/// Columns of padding between the pane edge and the code.
const PAD_X: u16 = 2;
/// Rows of padding between the pane edge and the code.
const PAD_Y: u16 = 1;

/// The code window: a themed background, wrapped rows and an optional caret.
#[derive(Debug, Clone)]
pub struct PreviewPane {
    area: Rect,
    viewport: Viewport,
}

impl Default for PreviewPane {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewPane {
    /// A pane with no area yet.
    pub fn new() -> Self {
        Self {
            area: Rect::ZERO,
            viewport: Viewport::new(1, 0),
        }
    }

    /// The pane's screen area.
    pub const fn area(&self) -> Rect {
        self.area
    }

    /// The scroll state.
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The scroll state, mutably (for user scrolling).
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Place the pane and set the line height (1 or 2 rows per line).
    pub fn layout(&mut self, area: Rect, line_height: u16) {
        self.area = area;
        let inner = area.inset(PAD_X, PAD_Y);
        self.viewport.resize(inner.width, inner.height);
        self.viewport.set_line_height(line_height);
    }

    /// Lay out new content. Call before scrolling so scroll bounds are current.
    pub fn set_projection(&mut self, projection: Projection) {
        self.viewport.set_content(projection.lines);
    }

    /// Paint the pane into `grid`.
    pub fn paint(&self, grid: &mut Grid, theme: Theme, caret: Option<Caret>) {
        let table = theme.style_table();
        grid.fill_rect(self.area, &Cell::blank(table.background));

        let inner = self.area.inset(PAD_X, PAD_Y);
        if inner.is_empty() {
            return;
        }
        let step = self.viewport.line_height();

        for (i, row) in self.viewport.visible_rows().iter().enumerate() {
            let Some(y) = row_y(inner, i, step) else {
                break;
            };
            let mut x = inner.x;
            for glyph in &row.glyphs {
                x = grid.put_str(x, y, &glyph.text, pen_for(table, glyph.style), inner.right());
            }
        }

        if let Some(caret) = caret {
            self.paint_caret(grid, table, inner, caret);
        }
    }

    fn paint_caret(&self, grid: &mut Grid, table: &StyleTable, inner: Rect, caret: Caret) {
        let (row, col) = self.viewport.locate(caret.line, caret.byte);
        // A caret right after a full row wraps onto the next one.
        let (row, col) = if col >= inner.width { (row + 1, 0) } else { (row, col) };
        let Some(visible) = row.checked_sub(self.viewport.scroll_top()) else {
            return;
        };
        if visible >= self.viewport.visible_count() {
            return;
        }
        if let Some(y) = row_y(inner, visible, self.viewport.line_height()) {
            let x = inner.x + col;
            let under = grid.get(x, y).cloned().unwrap_or_else(|| Cell::blank(table.background));
            grid.set(
                x,
                y,
                under
                    .with_fg(table.background)
                    .with_bg(table.foreground)
                    .with_modifiers(Modifiers::empty()),
            );
        }
    }
}

fn row_y(inner: Rect, index: usize, step: u16) -> Option<u16> {
    let offset = u16::try_from(index).ok()?.checked_mul(step)?;
    let y = inner.y.checked_add(offset)?;
    (y < inner.bottom()).then_some(y)
}

fn pen_for(table: &StyleTable, style: crate::style::TokenStyle) -> Pen {
    Pen::new(table.foreground_of(style), table.background).with(style.modifiers)
}
