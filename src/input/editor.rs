use super::{
    buffer::InputBuffer,
    history::{Direction, HistoryStore},
    keys::{Key, KeyEvent},
};
use crate::{queue::QueuedCommand, render::Terminal};

pub const CONTINUATION_MARKER: char = '\\';
const LINE_TERMINATOR: char = '\r';
const ERASE_CHAR: &str = "\x08 \x08";

/// Turns key events and inbound characters into buffer edits and the
/// matching terminal deltas.
#[derive(Debug, Default)]
pub struct LineEditor {
    buffer: InputBuffer,
    /// The buffer holds text appended without echo.
    unechoed: bool,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &InputBuffer {
        &self.buffer
    }

    /// Handles one key event. Returns `false` when the renderer's default
    /// handling must be suppressed.
    pub fn handle_key(
        &mut self,
        event: KeyEvent,
        history: &mut HistoryStore,
        term: &Terminal,
    ) -> bool {
        if event.ctrl {
            match event.key {
                Key::Char('c') => {
                    term.copy_selection();
                    return false;
                }
                // paste goes through the platform and comes back as data
                Key::Char('v') => return false,
                _ => {}
            }
        }

        match event.key {
            Key::Up | Key::Down => {
                if event.is_down() {
                    let direction = if event.key == Key::Up {
                        Direction::Older
                    } else {
                        Direction::Newer
                    };
                    self.recall(direction, history, term);
                }
                false
            }
            Key::Left => {
                if event.is_down() && self.buffer.move_left() {
                    term.cursor_left(1);
                }
                false
            }
            Key::Right => {
                if event.is_down() && self.buffer.move_right() {
                    term.cursor_right(1);
                }
                false
            }
            Key::Home => {
                if event.is_down() {
                    term.cursor_left(self.buffer.home());
                }
                false
            }
            Key::End => {
                if event.is_down() {
                    term.cursor_right(self.buffer.end());
                }
                false
            }
            Key::Backspace => {
                if event.is_down() {
                    self.backspace(term);
                }
                false
            }
            Key::Delete => {
                if event.is_down() {
                    self.delete(term);
                }
                false
            }
            Key::PageUp | Key::PageDown => {
                if event.is_down() {
                    term.scroll_pages(if event.key == Key::PageUp { -1 } else { 1 });
                }
                false
            }
            Key::Insert | Key::Function(_) => false,
            Key::Char(_) | Key::Other => true,
        }
    }

    /// Feeds one inbound data chunk (typed character or pasted text).
    ///
    /// Every line terminator either continues the statement or completes a
    /// command; completed commands are returned in order. Only the first
    /// command completed by this chunk is left un-echoed, and once one has
    /// completed the remaining characters are not echoed either since they
    /// will be replayed at dispatch. Text left after the last completed
    /// command stays hidden until [`LineEditor::reveal`].
    pub fn handle_data(
        &mut self,
        data: &str,
        is_complete: &dyn Fn(&str) -> bool,
        term: &Terminal,
    ) -> Vec<QueuedCommand> {
        let mut completed = Vec::new();

        for c in data.chars() {
            if c == LINE_TERMINATOR {
                if let Some(command) = self.submit(is_complete, completed.is_empty(), term) {
                    let echo = !completed.is_empty();
                    completed.push(QueuedCommand::new(command, echo));
                }
            } else {
                self.insert(c, completed.is_empty(), term);
            }
        }

        completed
    }

    fn submit(
        &mut self,
        is_complete: &dyn Fn(&str) -> bool,
        first_in_burst: bool,
        term: &Terminal,
    ) -> Option<String> {
        self.buffer.end();

        if self.buffer.strip_suffix_char(CONTINUATION_MARKER) {
            self.buffer.push('\n');
            if first_in_burst {
                term.print_continuation();
            }
            return None;
        }

        if !is_complete(self.buffer.text()) {
            self.buffer.push('\n');
            if first_in_burst {
                term.print_continuation();
            }
            return None;
        }

        let command = self.buffer.take();
        self.unechoed = false;
        tracing::debug!(command = %command, "line accepted");
        Some(command)
    }

    fn insert(&mut self, c: char, echo: bool, term: &Terminal) {
        if self.buffer.at_end() {
            self.buffer.push(c);
            if echo {
                let mut utf8 = [0; 4];
                term.write(c.encode_utf8(&mut utf8));
            } else {
                self.unechoed = true;
            }
            return;
        }

        let tail = self.buffer.insert(c);
        let mut delta = String::with_capacity(tail.len() + c.len_utf8());
        delta.push(c);
        delta.push_str(&tail);
        term.write(&delta);
        term.cursor_left(self.buffer.tail_len());
    }

    fn backspace(&mut self, term: &Terminal) {
        if self.buffer.at_end() {
            if self.buffer.pop().is_some() {
                term.write(ERASE_CHAR);
            }
            return;
        }

        if let Some(tail) = self.buffer.remove_before() {
            term.write(&format!("\x08{} ", tail));
            term.cursor_left(self.buffer.tail_len() + 1);
        }
    }

    fn delete(&mut self, term: &Terminal) {
        let tail_before = self.buffer.tail_len();
        if let Some(tail) = self.buffer.remove_at() {
            term.write(&format!("{} ", tail));
            term.cursor_left(tail_before);
        }
    }

    /// Replaces the visible line with a history entry, caret at the end.
    pub fn recall(&mut self, direction: Direction, history: &mut HistoryStore, term: &Terminal) {
        if history.is_empty() {
            return;
        }

        term.cursor_right(self.buffer.end());
        for _ in 0..self.buffer.char_len() {
            term.write(ERASE_CHAR);
        }
        self.buffer.clear();

        if let Some(entry) = history.recall(direction) {
            self.buffer.replace(entry);
            term.write(entry);
        }
        self.unechoed = false;
    }

    /// Writes the line once if part of it was never echoed, leaving the
    /// caret where the buffer has it.
    pub fn reveal(&mut self, term: &Terminal) {
        if !std::mem::take(&mut self.unechoed) {
            return;
        }
        term.write_multiline(self.buffer.text());
        term.cursor_left(self.buffer.tail_len());
    }
}
