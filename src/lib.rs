pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod eval;
pub mod flags;
pub mod input;
pub mod path;
pub mod process;
pub mod queue;
pub mod render;
pub mod style;

#[cfg(not(target_arch = "wasm32"))]
pub mod tty;
#[cfg(all(feature = "browser", target_arch = "wasm32"))]
pub mod web;

pub use console::{Console, ConsoleState, Dispatcher};
pub use error::{CommandError, ConsoleError};
pub use eval::Evaluator;
