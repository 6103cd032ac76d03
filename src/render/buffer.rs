use std::{cell::RefCell, rc::Rc};

use super::Renderer;

#[derive(Debug, Default)]
struct BufferState {
    output: String,
    scrolled: i32,
    focused: bool,
    copies: usize,
}

/// Renderer that records everything written to it.
///
/// Clones share the same buffer, so a host can hand one clone to the
/// console and keep another to read the output back.
#[derive(Debug, Clone, Default)]
pub struct BufferRenderer {
    state: Rc<RefCell<BufferState>>,
}

impl BufferRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        self.state.borrow().output.clone()
    }

    /// Returns and clears everything written so far.
    pub fn take(&self) -> String {
        std::mem::take(&mut self.state.borrow_mut().output)
    }

    pub fn scrolled_pages(&self) -> i32 {
        self.state.borrow().scrolled
    }

    pub fn is_focused(&self) -> bool {
        self.state.borrow().focused
    }

    pub fn copies(&self) -> usize {
        self.state.borrow().copies
    }
}

impl Renderer for BufferRenderer {
    fn write(&mut self, text: &str) {
        self.state.borrow_mut().output.push_str(text);
    }

    fn scroll_pages(&mut self, pages: i32) {
        self.state.borrow_mut().scrolled += pages;
    }

    fn focus(&mut self) {
        self.state.borrow_mut().focused = true;
    }

    fn copy_selection(&mut self) -> bool {
        self.state.borrow_mut().copies += 1;
        true
    }
}
