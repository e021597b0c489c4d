//! Edit/preview modes and the source editor.

mod controller;
mod editor;

pub use controller::{Mode, ModeController, ZoomLevel};
pub use editor::SourceEditor;
