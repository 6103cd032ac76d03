use std::io::{self, Write};

use crate::render::Renderer;

/// Writes straight to stdout; the tty interprets the escapes.
#[derive(Debug, Default)]
pub struct StdoutRenderer;

impl StdoutRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for StdoutRenderer {
    fn write(&mut self, text: &str) {
        let mut out = io::stdout().lock();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            tracing::debug!(error = %e, "stdout write failed");
        }
    }

    // the scrollback belongs to the terminal emulator
    fn scroll_pages(&mut self, pages: i32) {
        tracing::trace!(pages, "scroll request ignored");
    }
}
