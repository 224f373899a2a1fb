use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

// ── Single-line text input ────────────────────────────────────────────

/// An editable single-line buffer with a byte-offset cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    buf: String,
    cursor: usize,
}

impl TextInput {
    pub fn value(&self) -> &str {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.cursor = 0;
    }

    /// Take the contents, leaving the input empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buf)
    }

    /// Apply an editing key. Returns `true` if the key was consumed.
    ///
    /// Handles insertion, deletion, arrow/word/line cursor movement, and
    /// line deletion (Super+Backspace / Ctrl+U).
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.cursor = self.cursor.min(self.buf.len());
        let word = modifiers.contains(KeyModifiers::ALT);
        let line = modifiers.contains(KeyModifiers::SUPER);
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);

        match code {
            KeyCode::Left if line => self.cursor = 0,
            KeyCode::Left if word => self.cursor = word_boundary_left(&self.buf, self.cursor),
            KeyCode::Left => self.cursor -= self.prev_char_len(),
            KeyCode::Right if line => self.cursor = self.buf.len(),
            KeyCode::Right if word => self.cursor = word_boundary_right(&self.buf, self.cursor),
            KeyCode::Right => self.cursor += self.next_char_len(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.buf.len(),

            KeyCode::Backspace if word => self.delete_word_left(),
            KeyCode::Char('w') if ctrl => self.delete_word_left(),
            KeyCode::Backspace if line => self.delete_to_start(),
            KeyCode::Char('u') if ctrl => self.delete_to_start(),
            KeyCode::Backspace => {
                let len = self.prev_char_len();
                self.buf.drain(self.cursor - len..self.cursor);
                self.cursor -= len;
            }
            KeyCode::Delete => {
                let len = self.next_char_len();
                self.buf.drain(self.cursor..self.cursor + len);
            }

            KeyCode::Char(c) if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.buf.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            }
            _ => return false,
        }
        true
    }

    /// The buffer with a visible block cursor at the cursor position.
    pub fn display(&self) -> String {
        format_with_cursor(&self.buf, self.cursor)
    }

    fn prev_char_len(&self) -> usize {
        self.buf[..self.cursor]
            .chars()
            .next_back()
            .map_or(0, char::len_utf8)
    }

    fn next_char_len(&self) -> usize {
        self.buf[self.cursor..].chars().next().map_or(0, char::len_utf8)
    }

    fn delete_word_left(&mut self) {
        let start = word_boundary_left(&self.buf, self.cursor);
        self.buf.drain(start..self.cursor);
        self.cursor = start;
    }

    fn delete_to_start(&mut self) {
        self.buf.drain(..self.cursor);
        self.cursor = 0;
    }
}

impl From<&str> for TextInput {
    fn from(s: &str) -> Self {
        TextInput {
            buf: s.to_string(),
            cursor: s.len(),
        }
    }
}

/// Byte offset of the previous word boundary (for word-left navigation).
pub fn word_boundary_left(s: &str, pos: usize) -> usize {
    let trimmed = s[..pos].trim_end();
    match trimmed.rfind(char::is_whitespace) {
        Some(idx) => idx + trimmed[idx..].chars().next().map_or(1, char::len_utf8),
        None => 0,
    }
}

/// Byte offset of the next word boundary (for word-right navigation).
pub fn word_boundary_right(s: &str, pos: usize) -> usize {
    let after = &s[pos..];
    let Some(ws) = after.find(char::is_whitespace) else {
        return s.len();
    };
    match after[ws..].find(|c: char| !c.is_whitespace()) {
        Some(word_start) => pos + ws + word_start,
        None => s.len(),
    }
}

pub fn format_with_cursor(buf: &str, cursor: usize) -> String {
    let pos = cursor.min(buf.len());
    let (before, after) = buf.split_at(pos);
    format!("{before}\u{2588}{after}")
}

// ── Rendering helpers ─────────────────────────────────────────────────

/// Render a centered modal overlay and return the inner area (inside borders).
pub fn render_modal(
    frame: &mut Frame,
    title: &str,
    border_color: Style,
    width: u16,
    height: u16,
) -> Rect {
    let area = frame.area();
    let w = width.min(area.width.saturating_sub(4));
    let h = height.min(area.height.saturating_sub(4));
    let x = (area.width.saturating_sub(w)) / 2;
    let y = (area.height.saturating_sub(h)) / 2;
    let panel = Rect::new(x, y, w, h);

    frame.render_widget(Clear, panel);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_color);
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    inner
}

/// Render a horizontal hint bar of alternating key/description spans.
pub fn render_hints(
    frame: &mut Frame,
    area: Rect,
    hints: &[(&str, &str)],
    key_style: Style,
    desc_style: Style,
) {
    let spans: Vec<Span<'_>> = hints
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(*key, key_style),
                Span::styled(*desc, desc_style),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn input(s: &str) -> TextInput {
        TextInput::from(s)
    }

    #[test]
    fn word_boundaries() {
        assert_eq!(word_boundary_left("hello world", 11), 6);
        assert_eq!(word_boundary_left("hello world  ", 13), 6);
        assert_eq!(word_boundary_left("hello", 5), 0);
        assert_eq!(word_boundary_left("   ", 3), 0);
        assert_eq!(word_boundary_right("hello world", 0), 6);
        assert_eq!(word_boundary_right("hello world", 2), 6);
        assert_eq!(word_boundary_right("hello world", 11), 11);
    }

    #[test]
    fn typing_inserts_at_cursor() {
        let mut t = input("Bok venue");
        t.handle_key(KeyCode::Home, KeyModifiers::NONE);
        t.handle_key(KeyCode::Right, KeyModifiers::NONE);
        t.handle_key(KeyCode::Right, KeyModifiers::NONE);
        assert!(t.handle_key(KeyCode::Char('o'), KeyModifiers::SHIFT));
        assert_eq!(t.value(), "Book venue");
        assert_eq!(t.cursor(), 3);
    }

    #[test]
    fn backspace_and_delete() {
        let mut t = input("2024-06-155");
        t.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(t.value(), "2024-06-15");
        t.handle_key(KeyCode::Home, KeyModifiers::NONE);
        t.handle_key(KeyCode::Delete, KeyModifiers::NONE);
        assert_eq!(t.value(), "024-06-15");
        assert_eq!(t.cursor(), 0);
        // Nothing to delete before the start
        t.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(t.value(), "024-06-15");
    }

    #[test]
    fn word_and_line_deletion() {
        let mut t = input("Send invitations");
        t.handle_key(KeyCode::Char('w'), KeyModifiers::CONTROL);
        assert_eq!(t.value(), "Send ");
        t.handle_key(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(t.value(), "");
        assert_eq!(t.cursor(), 0);
    }

    #[test]
    fn alt_arrows_jump_words() {
        let mut t = input("hello world test");
        t.handle_key(KeyCode::Left, KeyModifiers::ALT);
        assert_eq!(t.cursor(), 12);
        t.handle_key(KeyCode::Left, KeyModifiers::ALT);
        assert_eq!(t.cursor(), 6);
        t.handle_key(KeyCode::Right, KeyModifiers::ALT);
        assert_eq!(t.cursor(), 12);
    }

    #[test]
    fn multibyte_cursor_movement() {
        let mut t = input("café");
        t.handle_key(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(t.cursor(), 3);
        t.handle_key(KeyCode::Delete, KeyModifiers::NONE);
        assert_eq!(t.value(), "caf");
    }

    #[test]
    fn control_chars_are_not_consumed() {
        let mut t = input("abc");
        assert!(!t.handle_key(KeyCode::Char('a'), KeyModifiers::CONTROL));
        assert!(!t.handle_key(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(t.value(), "abc");
    }

    #[test]
    fn take_empties_input() {
        let mut t = input("Book room");
        assert_eq!(t.take(), "Book room");
        assert!(t.is_empty());
        assert_eq!(t.cursor(), 0);
    }

    #[test]
    fn display_shows_cursor() {
        assert_eq!(format_with_cursor("hello", 0), "\u{2588}hello");
        assert_eq!(format_with_cursor("hello", 2), "he\u{2588}llo");
        assert_eq!(input("hi").display(), "hi\u{2588}");
    }
}
