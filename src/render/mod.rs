//! Output side of the console.
//!
//! The terminal widget itself is opaque: anything that can take raw
//! text with ANSI escapes implements [`Renderer`]. Keyboard input flows the
//! other way, from the widget's data and key callbacks into
//! [`Console::on_data`](crate::console::Console::on_data) and
//! [`Console::on_key`](crate::console::Console::on_key).

mod buffer;
mod terminal;

pub use buffer::BufferRenderer;
pub use terminal::Terminal;

pub trait Renderer {
    /// Writes raw text; escape sequences are interpreted by the widget.
    fn write(&mut self, text: &str);

    fn scroll_pages(&mut self, pages: i32);

    fn focus(&mut self) {}

    /// Copies the current selection to the clipboard. Returns whether
    /// anything was copied.
    fn copy_selection(&mut self) -> bool {
        false
    }
}
