//! Key bindings: input events → actions.

use super::messages::{KeyCode, KeyModifiers};
use crate::mode::{Mode, ZoomLevel};

/// An edit applied to the source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Insert one character.
    Insert(char),
    /// Insert pasted text.
    Paste(String),
    /// Line break.
    Newline,
    /// Delete before the cursor.
    Backspace,
    /// Delete at the cursor.
    Delete,
    /// Cursor left.
    Left,
    /// Cursor right.
    Right,
    /// Cursor up.
    Up,
    /// Cursor down.
    Down,
    /// Start of line.
    Home,
    /// End of line.
    End,
}

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Edit ↔ preview.
    ToggleMode,
    /// Next theme in the catalog.
    CycleTheme,
    /// 1x ↔ 2x.
    ToggleZoom,
    /// Select a zoom level.
    SetZoom(ZoomLevel),
    /// The (inert) export control.
    Export,
    /// Scroll the pane up by rows.
    ScrollUp(usize),
    /// Scroll the pane down by rows.
    ScrollDown(usize),
    /// Edit the buffer (edit mode only).
    Edit(EditOp),
    /// Leave the program.
    Quit,
}

/// Resolve a key press in the given mode.
///
/// `page` is the number of rows a PageUp/PageDown moves.
pub fn action_for(code: KeyCode, modifiers: KeyModifiers, mode: Mode, page: usize) -> Option<Action> {
    let action = match (code, modifiers.control) {
        (KeyCode::Char('q' | 'c'), true) => Action::Quit,
        (KeyCode::F(5), _) | (KeyCode::Char('p'), true) => Action::ToggleMode,
        (KeyCode::F(2), _) | (KeyCode::Char('t'), true) => Action::CycleTheme,
        (KeyCode::F(3), _) | (KeyCode::Char('z'), true) => Action::ToggleZoom,
        (KeyCode::F(6), _) => Action::Export,
        (KeyCode::PageUp, _) => Action::ScrollUp(page.max(1)),
        (KeyCode::PageDown, _) => Action::ScrollDown(page.max(1)),
        (KeyCode::Esc, _) if mode == Mode::Previewing => Action::ToggleMode,
        _ if mode == Mode::Editing => return edit_for(code, modifiers).map(Action::Edit),
        (KeyCode::Up, _) => Action::ScrollUp(1),
        (KeyCode::Down, _) => Action::ScrollDown(1),
        _ => return None,
    };
    Some(action)
}

fn edit_for(code: KeyCode, modifiers: KeyModifiers) -> Option<EditOp> {
    Some(match code {
        KeyCode::Char(c) if !modifiers.control && !modifiers.alt => EditOp::Insert(c),
        KeyCode::Tab => EditOp::Insert('\t'),
        KeyCode::Enter => EditOp::Newline,
        KeyCode::Backspace => EditOp::Backspace,
        KeyCode::Delete => EditOp::Delete,
        KeyCode::Left => EditOp::Left,
        KeyCode::Right => EditOp::Right,
        KeyCode::Up => EditOp::Up,
        KeyCode::Down => EditOp::Down,
        KeyCode::Home => EditOp::Home,
        KeyCode::End => EditOp::End,
        _ => return None,
    })
}

/// One-line summary of the bindings, shown in the footer.
pub const HINTS: &str = "F5 preview  F2 theme  F3 zoom  F6 export  PgUp/PgDn scroll  Ctrl+Q quit";

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: KeyModifiers = KeyModifiers::NONE;
    const CTRL: KeyModifiers = KeyModifiers::CONTROL;

    #[test]
    fn test_global_bindings_in_both_modes() {
        for mode in [Mode::Editing, Mode::Previewing] {
            assert_eq!(action_for(KeyCode::F(5), NONE, mode, 10), Some(Action::ToggleMode));
            assert_eq!(action_for(KeyCode::Char('p'), CTRL, mode, 10), Some(Action::ToggleMode));
            assert_eq!(action_for(KeyCode::Char('t'), CTRL, mode, 10), Some(Action::CycleTheme));
            assert_eq!(action_for(KeyCode::F(3), NONE, mode, 10), Some(Action::ToggleZoom));
            assert_eq!(action_for(KeyCode::F(6), NONE, mode, 10), Some(Action::Export));
            assert_eq!(action_for(KeyCode::Char('q'), CTRL, mode, 10), Some(Action::Quit));
            assert_eq!(action_for(KeyCode::PageDown, NONE, mode, 10), Some(Action::ScrollDown(10)));
        }
    }

    #[test]
    fn test_typing_only_edits_in_edit_mode() {
        assert_eq!(
            action_for(KeyCode::Char('x'), NONE, Mode::Editing, 1),
            Some(Action::Edit(EditOp::Insert('x')))
        );
        assert_eq!(action_for(KeyCode::Char('x'), NONE, Mode::Previewing, 1), None);
        assert_eq!(
            action_for(KeyCode::Enter, NONE, Mode::Editing, 1),
            Some(Action::Edit(EditOp::Newline))
        );
        assert_eq!(action_for(KeyCode::Char('x'), CTRL, Mode::Editing, 1), None);
    }

    #[test]
    fn test_arrows_scroll_in_preview() {
        assert_eq!(action_for(KeyCode::Up, NONE, Mode::Previewing, 5), Some(Action::ScrollUp(1)));
        assert_eq!(
            action_for(KeyCode::Up, NONE, Mode::Editing, 5),
            Some(Action::Edit(EditOp::Up))
        );
        assert_eq!(action_for(KeyCode::Esc, NONE, Mode::Previewing, 5), Some(Action::ToggleMode));
        assert_eq!(action_for(KeyCode::Esc, NONE, Mode::Editing, 5), None);
    }
}
