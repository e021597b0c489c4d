//! Cell: one terminal character position with its style.

use crate::style::{Modifiers, Rgb};
use unicode_width::UnicodeWidthStr;

/// What a cell displays.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A single scalar value.
    Char(char),
    /// A multi-scalar grapheme cluster (combining marks, ZWJ emoji).
    Cluster(Box<str>),
    /// Right half of a wide character drawn in the cell to its left.
    Continuation,
}

/// A single terminal cell.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    symbol: Symbol,
    fg: Rgb,
    bg: Rgb,
    modifiers: Modifiers,
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(Rgb::BLACK)
    }
}

impl Cell {
    /// A space on the given background.
    #[inline]
    pub const fn blank(bg: Rgb) -> Self {
        Self {
            symbol: Symbol::Char(' '),
            fg: Rgb::WHITE,
            bg,
            modifiers: Modifiers::empty(),
        }
    }

    /// A cell holding one grapheme.
    pub fn from_grapheme(grapheme: &str) -> Self {
        let mut chars = grapheme.chars();
        let symbol = match (chars.next(), chars.next()) {
            (Some(c), None) => Symbol::Char(c),
            (None, _) => Symbol::Char(' '),
            _ => Symbol::Cluster(grapheme.into()),
        };
        Self {
            symbol,
            ..Self::default()
        }
    }

    /// A wide-character continuation cell.
    #[inline]
    pub const fn continuation(bg: Rgb) -> Self {
        Self {
            symbol: Symbol::Continuation,
            fg: Rgb::WHITE,
            bg,
            modifiers: Modifiers::empty(),
        }
    }

    /// The displayed symbol.
    #[inline]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Check if this is a wide-character continuation.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        matches!(self.symbol, Symbol::Continuation)
    }

    /// Display width in columns (0 for continuations, otherwise 1 or 2).
    pub fn width(&self) -> usize {
        match &self.symbol {
            Symbol::Char(c) => unicode_width::UnicodeWidthChar::width(*c).unwrap_or(0).max(1),
            Symbol::Cluster(s) => s.width().max(1),
            Symbol::Continuation => 0,
        }
    }

    /// Get the foreground color.
    #[inline]
    pub const fn fg(&self) -> Rgb {
        self.fg
    }

    /// Get the background color.
    #[inline]
    pub const fn bg(&self) -> Rgb {
        self.bg
    }

    /// Get the modifiers.
    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }

    /// Set the modifiers (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Write the symbol's UTF-8 bytes.
    pub(crate) fn write_symbol(&self, out: &mut Vec<u8>) {
        match &self.symbol {
            Symbol::Char(c) => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
            Symbol::Cluster(s) => out.extend_from_slice(s.as_bytes()),
            Symbol::Continuation => {}
        }
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("symbol", &self.symbol)
            .field("fg", &self.fg)
            .field("bg", &self.bg)
            .field("modifiers", &self.modifiers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_widths() {
        assert_eq!(Cell::from_grapheme("a").width(), 1);
        assert_eq!(Cell::from_grapheme("日").width(), 2);
        assert_eq!(Cell::continuation(Rgb::BLACK).width(), 0);
    }

    #[test]
    fn test_cell_cluster() {
        let cell = Cell::from_grapheme("e\u{301}");
        assert_eq!(cell.symbol(), &Symbol::Cluster("e\u{301}".into()));
        let mut out = Vec::new();
        cell.write_symbol(&mut out);
        assert_eq!(out, "e\u{301}".as_bytes());
    }

    #[test]
    fn test_cell_builder() {
        let cell = Cell::from_grapheme("x")
            .with_fg(Rgb::new(255, 0, 0))
            .with_bg(Rgb::new(0, 0, 255))
            .with_modifiers(Modifiers::ITALIC);
        assert_eq!(cell.fg(), Rgb::new(255, 0, 0));
        assert_eq!(cell.bg(), Rgb::new(0, 0, 255));
        assert!(cell.modifiers().contains(Modifiers::ITALIC));
        assert_ne!(cell, Cell::from_grapheme("x"));
    }
}
