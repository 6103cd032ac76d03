/// In-progress input line.
///
/// The caret is kept as a non-positive character distance from the end of
/// the text: `0` is "at the end", `-len` is "before the first character".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
    offset: isize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn offset(&self) -> isize {
        self.offset
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn at_end(&self) -> bool {
        self.offset == 0
    }

    /// Characters between the caret and the end.
    pub fn tail_len(&self) -> usize {
        self.offset.unsigned_abs()
    }

    fn caret_index(&self) -> usize {
        self.char_len() - self.tail_len()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn caret_byte(&self) -> usize {
        self.byte_index(self.caret_index())
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    /// Inserts at the caret and returns the text after the new character.
    pub fn insert(&mut self, c: char) -> String {
        let at = self.caret_byte();
        self.text.insert(at, c);
        self.text[at + c.len_utf8()..].to_string()
    }

    /// Removes the character before the caret and returns the shifted
    /// tail, or `None` when the caret is at the start.
    pub fn remove_before(&mut self) -> Option<String> {
        let caret = self.caret_index();
        if caret == 0 {
            return None;
        }
        let at = self.byte_index(caret - 1);
        self.text.remove(at);
        Some(self.text[at..].to_string())
    }

    /// Removes the character under the caret and returns the shifted tail.
    /// The caret keeps its logical slot, so the offset moves towards zero.
    pub fn remove_at(&mut self) -> Option<String> {
        if self.offset == 0 {
            return None;
        }
        let at = self.caret_byte();
        self.text.remove(at);
        self.offset += 1;
        Some(self.text[at..].to_string())
    }

    /// Drops the last character; only meaningful with the caret at the end.
    pub fn pop(&mut self) -> Option<char> {
        if self.offset != 0 {
            return None;
        }
        self.text.pop()
    }

    pub fn move_left(&mut self) -> bool {
        if self.tail_len() < self.char_len() {
            self.offset -= 1;
            true
        } else {
            false
        }
    }

    pub fn move_right(&mut self) -> bool {
        if self.offset < 0 {
            self.offset += 1;
            true
        } else {
            false
        }
    }

    /// Moves the caret to the start; returns how many columns it moved.
    pub fn home(&mut self) -> usize {
        let delta = self.caret_index();
        self.offset = -(self.char_len() as isize);
        delta
    }

    /// Moves the caret to the end; returns how many columns it moved.
    pub fn end(&mut self) -> usize {
        let delta = self.tail_len();
        self.offset = 0;
        delta
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.offset = 0;
    }

    pub fn replace(&mut self, text: &str) {
        self.text = text.to_string();
        self.offset = 0;
    }

    pub fn take(&mut self) -> String {
        self.offset = 0;
        std::mem::take(&mut self.text)
    }

    pub fn strip_suffix_char(&mut self, c: char) -> bool {
        if self.text.ends_with(c) {
            self.text.pop();
            self.offset = 0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str, offset: isize) -> InputBuffer {
        let mut buffer = InputBuffer::new();
        buffer.replace(text);
        for _ in 0..offset.unsigned_abs() {
            buffer.move_left();
        }
        buffer
    }

    #[test]
    fn test_insert_mid_buffer_keeps_slot() {
        let mut buf = buffer("helo", -1);
        let tail = buf.insert('l');
        assert_eq!(buf.text(), "hello");
        assert_eq!(tail, "o");
        assert_eq!(buf.offset(), -1);
    }

    #[test]
    fn test_remove_before_and_at() {
        let mut buf = buffer("abcd", -2);
        assert_eq!(buf.remove_before().as_deref(), Some("cd"));
        assert_eq!(buf.text(), "acd");
        assert_eq!(buf.offset(), -2);

        assert_eq!(buf.remove_at().as_deref(), Some("d"));
        assert_eq!(buf.text(), "ad");
        assert_eq!(buf.offset(), -1);
    }

    #[test]
    fn test_remove_before_at_start() {
        let mut buf = buffer("ab", -2);
        assert_eq!(buf.remove_before(), None);
        assert_eq!(buf.text(), "ab");
    }

    #[test]
    fn test_caret_clamps() {
        let mut buf = buffer("ab", 0);
        assert!(!buf.move_right());
        assert!(buf.move_left());
        assert!(buf.move_left());
        assert!(!buf.move_left());
        assert_eq!(buf.offset(), -2);
        assert_eq!(buf.end(), 2);
        assert_eq!(buf.home(), 2);
        assert_eq!(buf.home(), 0);
    }

    #[test]
    fn test_multibyte_characters() {
        let mut buf = buffer("añb", -1);
        assert_eq!(buf.remove_before().as_deref(), Some("b"));
        assert_eq!(buf.text(), "ab");
        buf.insert('é');
        assert_eq!(buf.text(), "aéb");
        assert_eq!(buf.char_len(), 3);
    }

    #[test]
    fn test_strip_suffix_char() {
        let mut buf = buffer("set a \\", 0);
        assert!(buf.strip_suffix_char('\\'));
        assert_eq!(buf.text(), "set a ");
        assert!(!buf.strip_suffix_char('\\'));
    }
}
