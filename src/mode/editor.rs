//! Source editor: the plain, directly editable text buffer used in edit mode.

/// A multi-line text buffer with a single byte-offset cursor.
///
/// The cursor always sits on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceEditor {
    /// Current text content.
    content: String,
    /// Cursor position (byte offset).
    cursor: usize,
}

impl SourceEditor {
    /// Create an editor holding `content`, cursor at the end.
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor = content.len();
        Self { content, cursor }
    }

    /// Get the current text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position as a byte offset.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if the buffer is empty.
    pub const fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Replace the content, moving the cursor to the end.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.content.len();
    }

    /// Cursor position as (line, byte offset within the line).
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.content[..self.cursor];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        (line, self.cursor - line_start)
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert a string at the cursor (used for paste).
    pub fn insert_str(&mut self, text: &str) {
        // Normalize pasted line endings so the buffer only holds '\n'.
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        self.content.insert_str(self.cursor, &text);
        self.cursor += text.len();
    }

    /// Insert a line break.
    pub fn newline(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the character before the cursor. Returns whether anything changed.
    pub fn backspace(&mut self) -> bool {
        let Some(prev) = self.prev_boundary() else {
            return false;
        };
        self.content.remove(prev);
        self.cursor = prev;
        true
    }

    /// Delete the character at the cursor. Returns whether anything changed.
    pub fn delete(&mut self) -> bool {
        if self.cursor < self.content.len() {
            self.content.remove(self.cursor);
            true
        } else {
            false
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.content[..self.cursor].char_indices().last().map(|(i, _)| i)
    }

    /// Move cursor left.
    pub fn cursor_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    /// Move cursor right.
    pub fn cursor_right(&mut self) {
        if let Some(c) = self.content[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Move cursor to the start of the current line.
    pub fn cursor_home(&mut self) {
        self.cursor = self.content[..self.cursor].rfind('\n').map_or(0, |i| i + 1);
    }

    /// Move cursor to the end of the current line.
    pub fn cursor_end(&mut self) {
        self.cursor = self.content[self.cursor..]
            .find('\n')
            .map_or(self.content.len(), |i| self.cursor + i);
    }

    /// Move cursor one line up, keeping the column (in chars) where possible.
    pub fn cursor_up(&mut self) {
        let line_start = self.content[..self.cursor].rfind('\n').map_or(0, |i| i + 1);
        if line_start == 0 {
            self.cursor = 0;
            return;
        }
        let column = self.content[line_start..self.cursor].chars().count();
        let prev_end = line_start - 1;
        let prev_start = self.content[..prev_end].rfind('\n').map_or(0, |i| i + 1);
        self.cursor = Self::offset_at_column(&self.content, prev_start, prev_end, column);
    }

    /// Move cursor one line down, keeping the column (in chars) where possible.
    pub fn cursor_down(&mut self) {
        let Some(next_break) = self.content[self.cursor..].find('\n') else {
            self.cursor = self.content.len();
            return;
        };
        let line_start = self.content[..self.cursor].rfind('\n').map_or(0, |i| i + 1);
        let column = self.content[line_start..self.cursor].chars().count();
        let next_start = self.cursor + next_break + 1;
        let next_end = self.content[next_start..]
            .find('\n')
            .map_or(self.content.len(), |i| next_start + i);
        self.cursor = Self::offset_at_column(&self.content, next_start, next_end, column);
    }

    fn offset_at_column(content: &str, start: usize, end: usize, column: usize) -> usize {
        content[start..end]
            .char_indices()
            .nth(column)
            .map_or(end, |(i, _)| start + i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_basic() {
        let mut editor = SourceEditor::default();
        editor.insert_char('H');
        editor.insert_char('i');
        assert_eq!(editor.content(), "Hi");
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn test_editor_backspace_and_delete() {
        let mut editor = SourceEditor::new("Héllo");
        assert!(editor.backspace());
        assert_eq!(editor.content(), "Héll");
        editor.cursor_home();
        assert!(editor.delete());
        assert_eq!(editor.content(), "éll");
        assert!(!SourceEditor::default().backspace());
    }

    #[test]
    fn test_editor_multibyte_movement() {
        let mut editor = SourceEditor::new("aé");
        editor.cursor_left();
        assert_eq!(editor.cursor(), 1);
        editor.cursor_right();
        assert_eq!(editor.cursor(), 3);
    }

    #[test]
    fn test_editor_vertical_movement() {
        let mut editor = SourceEditor::new("abcd\nx\nlonger line");
        editor.cursor_up();
        // From end of "longer line" (col 11) to end of "x".
        assert_eq!(editor.cursor_line_col(), (1, 1));
        editor.cursor_up();
        assert_eq!(editor.cursor_line_col(), (0, 1));
        editor.cursor_down();
        editor.cursor_down();
        assert_eq!(editor.cursor_line_col(), (2, 1));
        editor.cursor_end();
        assert_eq!(editor.cursor_line_col(), (2, 11));
        editor.cursor_down();
        assert_eq!(editor.cursor(), editor.content().len());
    }

    #[test]
    fn test_editor_paste_normalizes_newlines() {
        let mut editor = SourceEditor::default();
        editor.insert_str("a\r\nb\rc");
        assert_eq!(editor.content(), "a\nb\nc");
        assert_eq!(editor.cursor(), 5);
    }
}
