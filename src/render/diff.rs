//! Diffing engine: turn the difference between two grids into ANSI output.
//!
//! Only changed cells are written. Cursor moves are skipped when the next
//! changed cell is where the terminal cursor already is, and SGR sequences
//! are only emitted when the color or modifier state actually changes. All
//! output lands in one byte buffer the renderer flushes with a single write.

use super::{Cell, Grid};
use crate::style::{Modifiers, Rgb};
use std::io::Write;

/// What the terminal currently has set, as far as we know.
#[derive(Debug, Clone, Default)]
pub struct DiffState {
    cursor: Option<(u16, u16)>,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    modifiers: Option<Modifiers>,
}

impl DiffState {
    /// Create a state with nothing known about the terminal.
    pub const fn new() -> Self {
        Self {
            cursor: None,
            fg: None,
            bg: None,
            modifiers: None,
        }
    }

    /// Forget everything (after a clear or an external write).
    pub const fn reset(&mut self) {
        *self = Self::new();
    }

    fn move_to(&mut self, out: &mut Vec<u8>, x: u16, y: u16) -> bool {
        if self.cursor == Some((x, y)) {
            return false;
        }
        let _ = write!(out, "\x1b[{};{}H", y + 1, x + 1);
        self.cursor = Some((x, y));
        true
    }

    fn apply_style(&mut self, out: &mut Vec<u8>, cell: &Cell) -> usize {
        let mut changes = 0;
        if self.modifiers != Some(cell.modifiers()) {
            // SGR has no portable "un-italic"; reset and rebuild instead.
            out.extend_from_slice(b"\x1b[0m");
            emit_modifiers(out, cell.modifiers());
            self.modifiers = Some(cell.modifiers());
            self.fg = None;
            self.bg = None;
            changes += 1;
        }
        if self.fg != Some(cell.fg()) {
            let c = cell.fg();
            let _ = write!(out, "\x1b[38;2;{};{};{}m", c.r, c.g, c.b);
            self.fg = Some(c);
            changes += 1;
        }
        if self.bg != Some(cell.bg()) {
            let c = cell.bg();
            let _ = write!(out, "\x1b[48;2;{};{};{}m", c.r, c.g, c.b);
            self.bg = Some(c);
            changes += 1;
        }
        changes
    }

    fn put(&mut self, out: &mut Vec<u8>, x: u16, y: u16, cell: &Cell) {
        cell.write_symbol(out);
        let advance = u16::try_from(cell.width()).unwrap_or(1);
        self.cursor = Some((x.saturating_add(advance), y));
    }
}

/// Statistics about one diff pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    /// Cells written.
    pub cells_changed: usize,
    /// Explicit cursor moves emitted.
    pub cursor_moves: usize,
    /// SGR changes emitted.
    pub style_changes: usize,
}

fn emit_modifiers(out: &mut Vec<u8>, modifiers: Modifiers) {
    const CODES: [(Modifiers, &[u8]); 6] = [
        (Modifiers::BOLD, b"\x1b[1m"),
        (Modifiers::DIM, b"\x1b[2m"),
        (Modifiers::ITALIC, b"\x1b[3m"),
        (Modifiers::UNDERLINE, b"\x1b[4m"),
        (Modifiers::REVERSED, b"\x1b[7m"),
        (Modifiers::STRIKETHROUGH, b"\x1b[9m"),
    ];
    for (flag, code) in CODES {
        if modifiers.contains(flag) {
            out.extend_from_slice(code);
        }
    }
}

/// Write the cells of `next` that differ from `current`.
///
/// Grids of different sizes cannot be diffed; `next` is then drawn in full.
pub fn render_diff(current: &Grid, next: &Grid, out: &mut Vec<u8>, state: &mut DiffState) -> DiffStats {
    if current.width() != next.width() || current.height() != next.height() {
        return render_full(next, out, state);
    }

    let mut stats = DiffStats::default();
    let width = usize::from(next.width());

    for (idx, (old, new)) in current.cells().iter().zip(next.cells()).enumerate() {
        if old == new || new.is_continuation() {
            continue;
        }
        let (x, y) = coords(idx, width);
        stats.cells_changed += 1;
        if state.move_to(out, x, y) {
            stats.cursor_moves += 1;
        }
        stats.style_changes += state.apply_style(out, new);
        state.put(out, x, y, new);
    }

    stats
}

/// Draw every cell of `grid`, ignoring what is on screen.
pub fn render_full(grid: &Grid, out: &mut Vec<u8>, state: &mut DiffState) -> DiffStats {
    state.reset();
    let mut stats = DiffStats::default();
    let width = usize::from(grid.width());

    for (idx, cell) in grid.cells().iter().enumerate() {
        if cell.is_continuation() {
            continue;
        }
        let (x, y) = coords(idx, width);
        if state.move_to(out, x, y) {
            stats.cursor_moves += 1;
        }
        stats.style_changes += state.apply_style(out, cell);
        state.put(out, x, y, cell);
        stats.cells_changed += 1;
    }

    stats
}

#[allow(clippy::cast_possible_truncation)]
fn coords(idx: usize, width: usize) -> (u16, u16) {
    // Grid dimensions are u16, so both fit.
    ((idx % width) as u16, (idx / width) as u16)
}
