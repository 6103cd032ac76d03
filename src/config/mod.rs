use std::{fmt, path::Path, time::Duration};

mod loader;
mod paths;

pub use loader::ConfigLoader;
pub use paths::ConfigPaths;

pub const DEFAULT_GREETING: &str = "repl";
pub const DEFAULT_COMMAND_DELAY: Duration = Duration::from_millis(10);
pub const DEFAULT_CONTINUATION_PROMPT: &str = "> ";
pub const DEFAULT_SHELL: &str = "/bin/sh";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl std::str::FromStr for ColorMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ColorMode::Auto),
            "always" | "on" => Ok(ColorMode::Always),
            "never" | "off" => Ok(ColorMode::Never),
            _ => Err(()),
        }
    }
}

/// Console settings shared by the native host and the browser front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Prompt text; the prompt renders as `greeting[n]> `.
    pub greeting: String,
    /// Pause before every dispatch so echoed input is flushed first.
    pub command_delay: Duration,
    pub continuation_prompt: String,
    pub preload_uploads: bool,
    pub color: ColorMode,
    /// Program the native evaluator hands each command to.
    pub shell: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.to_string(),
            command_delay: DEFAULT_COMMAND_DELAY,
            continuation_prompt: DEFAULT_CONTINUATION_PROMPT.to_string(),
            preload_uploads: true,
            color: ColorMode::Auto,
            shell: DEFAULT_SHELL.to_string(),
        }
    }
}

impl ConsoleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `path` on top of the defaults. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        ConfigLoader::new(path).load_into(&mut config)?;
        Ok(config)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "greeting" => self.greeting = value.to_string(),
            "delay" => {
                let millis: u64 = value.parse().map_err(|_| invalid())?;
                self.command_delay = Duration::from_millis(millis);
            }
            "continuation" => self.continuation_prompt = value.to_string(),
            "preload" => self.preload_uploads = parse_bool(value).ok_or_else(invalid)?,
            "color" => self.color = value.parse().map_err(|_| invalid())?,
            "shell" => {
                if value.is_empty() {
                    return Err(invalid());
                }
                self.shell = value.to_string();
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    HomeDirNotFound,
    ConfigFileNotFound(String),
    IoError(std::io::Error),
    UnknownKey(String),
    InvalidValue { key: String, value: String },
    Malformed { line: usize, text: String },
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::HomeDirNotFound => write!(f, "Home directory not found"),
            ConfigError::ConfigFileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::UnknownKey(key) => write!(f, "Unknown setting: {}", key),
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value for {}: '{}'", key, value)
            }
            ConfigError::Malformed { line, text } => {
                write!(f, "Malformed line {}: {}", line, text)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
