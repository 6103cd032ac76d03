use std::fmt;

pub mod balance;
#[cfg(not(target_arch = "wasm32"))]
pub mod executor;

pub use balance::is_balanced;
#[cfg(not(target_arch = "wasm32"))]
pub use executor::ShellEvaluator;

#[derive(Debug)]
pub enum ProcessError {
    CommandNotFound(String),
    Exited(i32),
    Killed,
    Other(String),
}

impl From<std::io::Error> for ProcessError {
    fn from(e: std::io::Error) -> Self {
        ProcessError::Other(e.to_string())
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::CommandNotFound(cmd) => write!(f, "Command not found: {}", cmd),
            ProcessError::Exited(code) => write!(f, "Process exited with status: {}", code),
            ProcessError::Killed => write!(f, "Process terminated by signal"),
            ProcessError::Other(msg) => write!(f, "Other error: {}", msg),
        }
    }
}

impl std::error::Error for ProcessError {}
