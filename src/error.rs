use crate::config::ConfigError;
use crate::process::ProcessError;

/// Failure of one dispatched command.
///
/// Every variant is caught at the dispatcher boundary and rendered with
/// error styling; none of them stops the queue except `FatalLoad`, which
/// only ever comes from the module loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Syntax(String),
    Evaluation(String),
    Resource(String),
    FatalLoad(String),
}

impl CommandError {
    pub fn kind(&self) -> &'static str {
        match self {
            CommandError::Syntax(_) => "syntax",
            CommandError::Evaluation(_) => "evaluation",
            CommandError::Resource(_) => "resource",
            CommandError::FatalLoad(_) => "fatal-load",
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Syntax(msg) => write!(f, "Syntax error: {}", msg),
            CommandError::Evaluation(msg) => write!(f, "{}", msg),
            CommandError::Resource(msg) => write!(f, "{}", msg),
            CommandError::FatalLoad(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CommandError {}

#[derive(Debug)]
pub enum ConsoleError {
    Io(std::io::Error),
    Config(ConfigError),
    Process(ProcessError),
    Flag(String),
    Terminal(String),
    DispatcherTaken,
}

impl From<std::io::Error> for ConsoleError {
    fn from(err: std::io::Error) -> Self {
        ConsoleError::Io(err)
    }
}

impl From<ConfigError> for ConsoleError {
    fn from(err: ConfigError) -> Self {
        ConsoleError::Config(err)
    }
}

impl From<ProcessError> for ConsoleError {
    fn from(err: ProcessError) -> Self {
        ConsoleError::Process(err)
    }
}

impl std::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsoleError::Io(e) => write!(f, "IO error: {}", e),
            ConsoleError::Config(e) => write!(f, "Config error: {}", e),
            ConsoleError::Process(e) => write!(f, "Process error: {}", e),
            ConsoleError::Flag(msg) => write!(f, "Flag error: {}", msg),
            ConsoleError::Terminal(msg) => write!(f, "Terminal error: {}", msg),
            ConsoleError::DispatcherTaken => write!(f, "dispatcher already created for this console"),
        }
    }
}

impl std::error::Error for ConsoleError {}
