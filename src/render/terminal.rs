use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use super::Renderer;
use crate::style::{Gravity, MessageStyler};

struct PromptState {
    greeting: String,
    continuation: String,
    counter: Cell<u32>,
}

/// Shared writer over the renderer.
///
/// The line editor and the dispatcher both write through clones of the
/// same handle; they never do so at the same time because everything runs
/// on one event loop.
#[derive(Clone)]
pub struct Terminal {
    renderer: Rc<RefCell<Box<dyn Renderer>>>,
    styler: MessageStyler,
    prompt: Rc<PromptState>,
}

impl Terminal {
    pub fn new(
        renderer: Box<dyn Renderer>,
        styler: MessageStyler,
        greeting: &str,
        continuation: &str,
    ) -> Self {
        Self {
            renderer: Rc::new(RefCell::new(renderer)),
            styler,
            prompt: Rc::new(PromptState {
                greeting: greeting.to_string(),
                continuation: continuation.to_string(),
                counter: Cell::new(0),
            }),
        }
    }

    pub fn styler(&self) -> MessageStyler {
        self.styler
    }

    pub fn write(&self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.renderer.borrow_mut().write(text);
    }

    /// Writes `text` converting every LF into LF CR.
    pub fn write_multiline(&self, text: &str) {
        self.write(&text.replace('\n', "\n\r"));
    }

    pub fn write_line(&self, text: &str) {
        self.write("\n\r");
        self.write(text);
    }

    pub fn write_error(&self, text: &str) {
        self.write("\n\r");
        self.write_multiline(&self.styler.error(text));
    }

    pub fn write_warning(&self, text: &str) {
        self.write("\n\r");
        self.write_multiline(&self.styler.warning(text));
    }

    pub fn write_info(&self, text: &str) {
        self.write("\n\r");
        self.write_multiline(&self.styler.info(text));
    }

    pub fn write_trace(&self, text: &str) {
        self.write("\n\r");
        self.write_multiline(&self.styler.trace(text));
    }

    /// Routes an interpreter message by its gravity level; unknown levels
    /// are printed unstyled on a new line.
    pub fn print_message(&self, text: &str, level: i32) {
        match Gravity::from_level(level) {
            Some(gravity) => {
                self.write("\n\r");
                self.write_multiline(&self.styler.gravity(gravity, text));
            }
            None => {
                self.write("\n\r");
                self.write_multiline(text);
            }
        }
    }

    /// Starts a fresh input line `greeting[n]> `.
    pub fn print_prompt(&self) {
        let count = self.prompt.counter.get() + 1;
        self.prompt.counter.set(count);
        let label = format!("{}[{}]>", self.prompt.greeting, count);
        self.write("\n\r");
        self.write(&self.styler.prompt(&label));
        self.write(" ");
    }

    pub fn print_continuation(&self) {
        self.write("\n\r");
        self.write(&self.prompt.continuation);
    }

    pub fn prompt_count(&self) -> u32 {
        self.prompt.counter.get()
    }

    pub fn cursor_left(&self, columns: usize) {
        if columns > 0 {
            self.write(&format!("\x1b[{}D", columns));
        }
    }

    pub fn cursor_right(&self, columns: usize) {
        if columns > 0 {
            self.write(&format!("\x1b[{}C", columns));
        }
    }

    pub fn scroll_pages(&self, pages: i32) {
        self.renderer.borrow_mut().scroll_pages(pages);
    }

    pub fn focus(&self) {
        self.renderer.borrow_mut().focus();
    }

    pub fn copy_selection(&self) -> bool {
        self.renderer.borrow_mut().copy_selection()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::BufferRenderer;

    fn plain_terminal() -> (Terminal, BufferRenderer) {
        let buffer = BufferRenderer::new();
        let terminal = Terminal::new(
            Box::new(buffer.clone()),
            MessageStyler::plain(),
            "repl",
            "> ",
        );
        (terminal, buffer)
    }

    #[test]
    fn test_prompt_counter_increments() {
        let (terminal, buffer) = plain_terminal();
        terminal.print_prompt();
        terminal.print_prompt();
        assert_eq!(buffer.contents(), "\n\rrepl[1]> \n\rrepl[2]> ");
        assert_eq!(terminal.prompt_count(), 2);
    }

    #[test]
    fn test_multiline_converts_newlines() {
        let (terminal, buffer) = plain_terminal();
        terminal.write_multiline("a\nb\n");
        assert_eq!(buffer.contents(), "a\n\rb\n\r");
    }

    #[test]
    fn test_print_message_unknown_gravity_is_plain() {
        let (terminal, buffer) = plain_terminal();
        terminal.print_message("hello\nworld", -1);
        assert_eq!(buffer.contents(), "\n\rhello\n\rworld");
    }

    #[test]
    fn test_cursor_moves_skip_zero() {
        let (terminal, buffer) = plain_terminal();
        terminal.cursor_left(0);
        terminal.cursor_right(0);
        assert_eq!(buffer.contents(), "");
        terminal.cursor_left(3);
        terminal.cursor_right(2);
        assert_eq!(buffer.contents(), "\x1b[3D\x1b[2C");
    }

    #[test]
    fn test_clones_share_renderer() {
        let (terminal, buffer) = plain_terminal();
        let other = terminal.clone();
        terminal.write("a");
        other.write("b");
        other.scroll_pages(-1);
        assert_eq!(buffer.contents(), "ab");
        assert_eq!(buffer.scrolled_pages(), -1);
    }
}
