/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Single-line text buffer backing the text-entry surface.
///
/// The cursor is a byte offset that always sits on a char boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryBuffer {
    text: String,
    cursor: usize,
    max_chars: Option<usize>,
}

impl EntryBuffer {
    /// Create a buffer holding `text` with the cursor at the end.
    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.len(),
            max_chars: None,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Refuse insertions past `max` characters.
    pub const fn with_max_chars(mut self, max: usize) -> Self {
        self.max_chars = Some(max);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position as a byte offset.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Insert a character at the cursor.
    ///
    /// Returns `false` when the length limit would be exceeded or the
    /// character is a control character.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        if let Some(max) = self.max_chars
            && self.text.chars().count() >= max
        {
            return false;
        }
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        true
    }

    /// Insert a string at the cursor, stopping at the length limit.
    pub fn insert_str(&mut self, s: &str) {
        for ch in s.chars() {
            if !self.insert_char(ch) {
                break;
            }
        }
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_back(&mut self) -> bool {
        let Some(prev) = self.text[..self.cursor].chars().next_back() else {
            return false;
        };
        self.cursor -= prev.len_utf8();
        self.text.remove(self.cursor);
        true
    }

    /// Delete the character at the cursor (Delete).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        self.text.remove(self.cursor);
        true
    }

    /// Remove all text.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                if let Some(prev) = self.text[..self.cursor].chars().next_back() {
                    self.cursor -= prev.len_utf8();
                }
            }
            Direction::Right => {
                if let Some(next) = self.text[self.cursor..].chars().next() {
                    self.cursor += next.len_utf8();
                }
            }
        }
    }

    /// Move cursor to the beginning of the text (Home).
    pub const fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to the end of the text (End).
    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Move cursor one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self) {
        let trimmed = self.text[..self.cursor].trim_end();
        if trimmed.is_empty() {
            self.cursor = 0;
            return;
        }
        self.cursor = trimmed
            .rfind(|c: char| !c.is_alphanumeric() && c != '_')
            .map_or(0, |i| i + trimmed[i..].chars().next().map_or(1, char::len_utf8));
    }

    /// Move cursor one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self) {
        let after = &self.text[self.cursor..];
        let word_end = after
            .find(|c: char| !c.is_alphanumeric() && c != '_')
            .unwrap_or(after.len());
        let rest = &after[word_end..];
        let space_end = rest
            .find(|c: char| c.is_alphanumeric() || c == '_')
            .unwrap_or(rest.len());
        self.cursor += word_end + space_end;
    }

    /// Display column of the cursor, accounting for wide characters.
    pub fn cursor_column(&self) -> usize {
        unicode_width::UnicodeWidthStr::width(&self.text[..self.cursor])
    }
}
