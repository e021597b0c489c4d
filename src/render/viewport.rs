//! Viewport: soft-wrapped rows of a projection plus a scroll position.
//!
//! Wrapping breaks anywhere (by display width), like a code block with
//! `white-space: pre-wrap` and no word boundaries. The scroll position is
//! a row index (`scroll_top`) clamped to `scroll_height - visible`.

use super::projector::StyledLine;
use crate::style::TokenStyle;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Columns a tab expands to.
pub const TAB_WIDTH: u16 = 4;

/// One grapheme (or expanded tab) placed in a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// Text to draw.
    pub text: Box<str>,
    /// Resolved style of the token the glyph came from.
    pub style: TokenStyle,
    /// Byte offset of the grapheme within its source line.
    pub offset: usize,
    /// Display width in columns.
    pub width: u16,
}

/// One screen row of wrapped content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    /// Index of the source line.
    pub line: usize,
    /// Glyphs in display order.
    pub glyphs: Vec<Glyph>,
    /// Display columns used.
    pub width: u16,
    /// Whether the source line continues on the next row.
    pub wrapped: bool,
}

impl Row {
    const fn new(line: usize) -> Self {
        Self {
            line,
            glyphs: Vec::new(),
            width: 0,
            wrapped: false,
        }
    }

    fn start(&self) -> Option<usize> {
        self.glyphs.first().map(|g| g.offset)
    }
}

/// Wrapped, scrollable view over projected lines.
#[derive(Debug, Clone)]
pub struct Viewport {
    lines: Vec<StyledLine>,
    rows: Vec<Row>,
    width: u16,
    height: u16,
    line_height: u16,
    scroll_top: usize,
}

impl Viewport {
    /// An empty viewport of `width` columns and `height` terminal rows.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            lines: Vec::new(),
            rows: Vec::new(),
            width: width.max(1),
            height,
            line_height: 1,
            scroll_top: 0,
        }
    }

    /// Width in columns.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in terminal rows.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Terminal rows per content row.
    pub const fn line_height(&self) -> u16 {
        self.line_height
    }

    /// Content rows that fit on screen.
    pub fn visible_count(&self) -> usize {
        usize::from(self.height / self.line_height)
    }

    /// Total number of wrapped rows.
    pub fn scroll_height(&self) -> usize {
        self.rows.len()
    }

    /// First visible row.
    pub const fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Largest valid `scroll_top`.
    pub fn max_scroll_top(&self) -> usize {
        self.rows.len().saturating_sub(self.visible_count())
    }

    /// Whether the last row is visible.
    pub fn at_bottom(&self) -> bool {
        self.scroll_top >= self.max_scroll_top()
    }

    /// Change the size; content is rewrapped and the scroll position clamped.
    pub fn resize(&mut self, width: u16, height: u16) {
        let width = width.max(1);
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.rewrap();
    }

    /// Change the rows taken by one content row (zoom).
    pub fn set_line_height(&mut self, line_height: u16) {
        self.line_height = line_height.max(1);
        self.scroll_top = self.scroll_top.min(self.max_scroll_top());
    }

    /// Replace the content. The scroll position is clamped, not reset.
    pub fn set_content(&mut self, lines: Vec<StyledLine>) {
        self.lines = lines;
        self.rewrap();
    }

    fn rewrap(&mut self) {
        self.rows = wrap(&self.lines, self.width);
        self.scroll_top = self.scroll_top.min(self.max_scroll_top());
    }

    /// Scroll so the last row is visible.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_top = self.max_scroll_top();
    }

    /// Scroll up by `rows`.
    pub const fn scroll_up(&mut self, rows: usize) {
        self.scroll_top = self.scroll_top.saturating_sub(rows);
    }

    /// Scroll down by `rows`, stopping at the bottom.
    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_top = self.scroll_top.saturating_add(rows).min(self.max_scroll_top());
    }

    /// Make row `row` visible with minimal scrolling.
    pub fn scroll_into_view(&mut self, row: usize) {
        let visible = self.visible_count().max(1);
        if row < self.scroll_top {
            self.scroll_top = row;
        } else if row >= self.scroll_top + visible {
            self.scroll_top = row + 1 - visible;
        }
        self.scroll_top = self.scroll_top.min(self.max_scroll_top());
    }

    /// All rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Rows currently on screen.
    pub fn visible_rows(&self) -> &[Row] {
        let start = self.scroll_top.min(self.rows.len());
        let end = (start + self.visible_count()).min(self.rows.len());
        &self.rows[start..end]
    }

    /// Row index and column of byte `byte` in source line `line`.
    ///
    /// A position past the end of a line maps to just after its last glyph.
    /// A line the content does not reach maps to the start of the row after
    /// the content.
    pub fn locate(&self, line: usize, byte: usize) -> (usize, u16) {
        let mut found = None;
        for (idx, row) in self.rows.iter().enumerate() {
            if row.line != line {
                if found.is_some() {
                    break;
                }
                continue;
            }
            if row.start().is_some_and(|start| start > byte) {
                break;
            }
            found = Some(idx);
        }
        let Some(idx) = found else {
            return (self.rows.len(), 0);
        };
        let row = &self.rows[idx];
        let col = row
            .glyphs
            .iter()
            .take_while(|g| g.offset < byte)
            .map(|g| g.width)
            .sum();
        (idx, col)
    }
}

/// Wrap styled lines into rows of at most `width` columns.
pub fn wrap(lines: &[StyledLine], width: u16) -> Vec<Row> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for (line_idx, line) in lines.iter().enumerate() {
        let mut row = Row::new(line_idx);
        let mut offset = 0;
        for token in line {
            for (at, grapheme) in token.text.grapheme_indices(true) {
                let glyph = place(grapheme, token.style, offset + at);
                if row.width + glyph.width > width && !row.glyphs.is_empty() {
                    row.wrapped = true;
                    rows.push(std::mem::replace(&mut row, Row::new(line_idx)));
                }
                row.width += glyph.width;
                row.glyphs.push(glyph);
            }
            offset += token.text.len();
        }
        rows.push(row);
    }
    rows
}

fn place(grapheme: &str, style: TokenStyle, offset: usize) -> Glyph {
    if grapheme == "\t" {
        return Glyph {
            text: " ".repeat(usize::from(TAB_WIDTH)).into(),
            style,
            offset,
            width: TAB_WIDTH,
        };
    }
    let width = u16::try_from(grapheme.width().max(1)).unwrap_or(1);
    Glyph {
        text: grapheme.into(),
        style,
        offset,
        width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::StyledToken;

    fn line(text: &str) -> StyledLine {
        if text.is_empty() {
            return Vec::new();
        }
        vec![StyledToken {
            text: text.to_string(),
            kinds: Vec::new(),
            style: TokenStyle::default(),
        }]
    }

    fn content(lines: &[&str]) -> Vec<StyledLine> {
        lines.iter().map(|l| line(l)).collect()
    }

    #[test]
    fn test_wrap_breaks_anywhere() {
        let rows = wrap(&content(&["abcdefg", ""]), 3);
        assert_eq!(rows.len(), 4);
        assert!(rows[0].wrapped && rows[1].wrapped && !rows[2].wrapped);
        assert_eq!(rows[2].glyphs[0].offset, 6);
        assert!(rows[3].glyphs.is_empty());
        assert_eq!(rows[3].line, 1);
    }

    #[test]
    fn test_wrap_tabs_and_wide() {
        let rows = wrap(&content(&["\tx", "日日日"]), 5);
        assert_eq!(rows[0].width, 5);
        assert_eq!(rows[1].width, 4);
        assert_eq!(rows[2].width, 2);
    }

    #[test]
    fn test_scroll_to_bottom_and_clamp() {
        let mut viewport = Viewport::new(10, 3);
        viewport.set_content(content(&["1", "2", "3", "4", "5"]));
        assert_eq!(viewport.scroll_height(), 5);
        assert_eq!(viewport.scroll_top(), 0);

        viewport.scroll_to_bottom();
        assert_eq!(viewport.scroll_top(), 2);
        assert!(viewport.at_bottom());
        assert_eq!(viewport.visible_rows().len(), 3);

        viewport.scroll_down(10);
        assert_eq!(viewport.scroll_top(), 2);
        viewport.scroll_up(10);
        assert_eq!(viewport.scroll_top(), 0);

        // Shrinking content clamps the position.
        viewport.scroll_to_bottom();
        viewport.set_content(content(&["1"]));
        assert_eq!(viewport.scroll_top(), 0);
    }

    #[test]
    fn test_line_height_halves_visible_rows() {
        let mut viewport = Viewport::new(10, 4);
        viewport.set_content(content(&["1", "2", "3", "4"]));
        viewport.set_line_height(2);
        assert_eq!(viewport.visible_count(), 2);
        viewport.scroll_to_bottom();
        assert_eq!(viewport.scroll_top(), 2);
    }

    #[test]
    fn test_locate() {
        let mut viewport = Viewport::new(3, 10);
        viewport.set_content(content(&["abcdef", ""]));
        assert_eq!(viewport.locate(0, 0), (0, 0));
        assert_eq!(viewport.locate(0, 4), (1, 1));
        // End of a line that exactly fills its last row.
        assert_eq!(viewport.locate(0, 6), (1, 3));
        assert_eq!(viewport.locate(1, 0), (2, 0));
        assert_eq!(viewport.locate(5, 0), (3, 0));
    }

    #[test]
    fn test_resize_rewraps() {
        let mut viewport = Viewport::new(10, 5);
        viewport.set_content(content(&["abcdefghij"]));
        assert_eq!(viewport.scroll_height(), 1);
        viewport.resize(5, 5);
        assert_eq!(viewport.scroll_height(), 2);
    }
}
