use unicode_width::UnicodeWidthChar;

/// Editable text with a char-indexed caret, backing the search field, the
/// path prompt and the sentence edit box.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, ch: char) {
        let byte_idx = char_to_byte_idx(&self.text, self.cursor);
        self.text.insert(byte_idx, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        remove_char_at(&mut self.text, self.cursor)
    }

    pub fn delete(&mut self) -> bool {
        remove_char_at(&mut self.text, self.cursor)
    }

    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.cursor >= self.text.chars().count() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    pub fn move_word_left(&mut self) -> bool {
        let target = previous_word_boundary(&self.text, self.cursor);
        let moved = target != self.cursor;
        self.cursor = target;
        moved
    }

    pub fn move_word_right(&mut self) -> bool {
        let target = next_word_boundary(&self.text, self.cursor);
        let moved = target != self.cursor;
        self.cursor = target;
        moved
    }

    /// Line and display column of the caret, for placing the terminal cursor.
    pub fn caret_position(&self) -> (u16, u16) {
        let mut line = 0u16;
        let mut column = 0u16;
        for ch in self.text.chars().take(self.cursor) {
            if ch == '\n' {
                line = line.saturating_add(1);
                column = 0;
            } else {
                column = column.saturating_add(ch.width().unwrap_or(0) as u16);
            }
        }
        (line, column)
    }
}

fn remove_char_at(text: &mut String, offset: usize) -> bool {
    let start = char_to_byte_idx(text, offset);
    if start >= text.len() {
        return false;
    }
    let end = char_to_byte_idx(text, offset + 1);
    text.drain(start..end);
    true
}

pub fn char_to_byte_idx(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte_idx, _)| byte_idx)
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn previous_word_boundary(text: &str, offset: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut idx = offset.min(chars.len());

    while idx > 0 && chars[idx - 1].is_whitespace() {
        idx -= 1;
    }
    if idx > 0 && is_word_char(chars[idx - 1]) {
        while idx > 0 && is_word_char(chars[idx - 1]) {
            idx -= 1;
        }
    } else {
        while idx > 0 && !is_word_char(chars[idx - 1]) && !chars[idx - 1].is_whitespace() {
            idx -= 1;
        }
    }
    idx
}

fn next_word_boundary(text: &str, offset: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut idx = offset.min(len);

    if idx < len && is_word_char(chars[idx]) {
        while idx < len && is_word_char(chars[idx]) {
            idx += 1;
        }
    } else {
        while idx < len && !chars[idx].is_whitespace() && !is_word_char(chars[idx]) {
            idx += 1;
        }
    }
    while idx < len && chars[idx].is_whitespace() {
        idx += 1;
    }
    idx
}
