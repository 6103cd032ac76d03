pub mod buffer;
pub mod editor;
pub mod history;
pub mod keys;

pub use buffer::InputBuffer;
pub use editor::LineEditor;
pub use history::{Direction, HistoryStore};
pub use keys::{Key, KeyEvent, KeyPhase};
