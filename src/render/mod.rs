//! Rendering: projection, wrapping and the double-buffered cell grid.
//!
//! - [`RenderProjector`]: revealed text + theme → styled lines
//! - [`Viewport`]: wrapped rows and the scroll position
//! - [`PreviewPane`]: paints the viewport into a [`Grid`]
//! - [`diff`]: minimal ANSI output between two grids

mod cell;
pub mod diff;
mod grid;
mod pane;
mod projector;
mod rect;
mod viewport;

pub use cell::{Cell, Symbol};
pub use grid::{Grid, Pen};
pub use pane::{Caret, PreviewPane};
pub use projector::{Projection, RenderProjector, StyledLine, StyledToken, DEFAULT_LANGUAGE};
pub use rect::Rect;
pub use viewport::{wrap, Glyph, Row, Viewport, TAB_WIDTH};
