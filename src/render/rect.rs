//! Rect: screen regions for the chrome and the preview pane.

/// A rectangle defined by position and size, in terminal cells.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate (column) of the top-left corner.
    pub x: u16,
    /// Y coordinate (row) of the top-left corner.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// The whole screen.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Zero-sized rectangle.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Check if the rectangle covers no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink by `dx` columns on the left and right and `dy` rows on top and bottom.
    #[must_use]
    pub const fn inset(&self, dx: u16, dy: u16) -> Self {
        if self.width <= dx * 2 || self.height <= dy * 2 {
            return Self::ZERO;
        }
        Self::new(self.x + dx, self.y + dy, self.width - dx * 2, self.height - dy * 2)
    }

    /// Split off the top `rows` rows: `(top, rest)`.
    pub fn take_top(&self, rows: u16) -> (Self, Self) {
        let rows = rows.min(self.height);
        (
            Self::new(self.x, self.y, self.width, rows),
            Self::new(self.x, self.y + rows, self.width, self.height - rows),
        )
    }

    /// Split off the bottom `rows` rows: `(rest, bottom)`.
    pub fn take_bottom(&self, rows: u16) -> (Self, Self) {
        let rows = rows.min(self.height);
        let rest = self.height - rows;
        (
            Self::new(self.x, self.y, self.width, rest),
            Self::new(self.x, self.y + rest, self.width, rows),
        )
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_splits() {
        let screen = Rect::from_size(80, 24);
        let (top, rest) = screen.take_top(3);
        assert_eq!(top, Rect::new(0, 0, 80, 3));
        let (body, bottom) = rest.take_bottom(2);
        assert_eq!(body, Rect::new(0, 3, 80, 19));
        assert_eq!(bottom, Rect::new(0, 22, 80, 2));
    }

    #[test]
    fn test_rect_inset() {
        let rect = Rect::new(0, 0, 10, 6).inset(2, 1);
        assert_eq!(rect, Rect::new(2, 1, 6, 4));
        assert!(Rect::new(0, 0, 3, 3).inset(2, 0).is_empty());
        assert!(rect.contains(2, 1));
        assert!(!rect.contains(8, 1));
    }
}
