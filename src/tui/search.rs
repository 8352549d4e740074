/// Search input state for the TUI
pub struct SearchInput {
    pub query: String,
    /// Byte offset into `query`, always on a char boundary
    pub cursor_pos: usize,
    pub focused: bool,
}

impl SearchInput {
    pub fn new(query: String) -> Self {
        let cursor_pos = query.len();
        Self {
            query,
            cursor_pos,
            focused: true,
        }
    }

    pub fn insert(&mut self, c: char) {
        self.query.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    /// Returns `true` if the text changed
    pub fn backspace(&mut self) -> bool {
        if self.cursor_pos == 0 {
            return false;
        }
        let prev = self.prev_boundary();
        self.query.remove(prev);
        self.cursor_pos = prev;
        true
    }

    /// Returns `true` if the text changed
    pub fn delete(&mut self) -> bool {
        if self.cursor_pos >= self.query.len() {
            return false;
        }
        self.query.remove(self.cursor_pos);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor_pos = self.prev_boundary();
    }

    pub fn move_right(&mut self) {
        if self.cursor_pos < self.query.len() {
            self.cursor_pos = self.query[self.cursor_pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_pos + i)
                .unwrap_or(self.query.len());
        }
    }

    pub fn home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn end(&mut self) {
        self.cursor_pos = self.query.len();
    }

    /// Returns `true` if there was anything to clear
    pub fn clear(&mut self) -> bool {
        if self.query.is_empty() {
            return false;
        }
        self.query.clear();
        self.cursor_pos = 0;
        true
    }

    /// Text left of the cursor, for cursor placement
    pub fn before_cursor(&self) -> &str {
        &self.query[..self.cursor_pos]
    }

    fn prev_boundary(&self) -> usize {
        self.query[..self.cursor_pos]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_at_cursor_with_multibyte_chars() {
        let mut input = SearchInput::new(String::new());
        for c in "café".chars() {
            input.insert(c);
        }
        assert_eq!(input.query, "café");

        input.move_left();
        input.move_left();
        assert_eq!(input.before_cursor(), "ca");
        input.insert('r');
        assert_eq!(input.query, "carfé");

        input.end();
        assert!(input.backspace());
        assert_eq!(input.query, "carf");

        input.home();
        assert!(!input.backspace());
        assert!(input.delete());
        assert_eq!(input.query, "arf");
    }

    #[test]
    fn clear_reports_change() {
        let mut input = SearchInput::new("shoe".to_string());
        assert_eq!(input.cursor_pos, 4);
        assert!(input.clear());
        assert!(!input.clear());
    }
}
