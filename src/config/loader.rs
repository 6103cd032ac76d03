use std::{fs, path::Path};

use super::{ConfigError, ConsoleConfig};

/// Reads an rc file made of `set key=value` lines.
pub struct ConfigLoader<'a> {
    path: &'a Path,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    pub fn load_into(&self, config: &mut ConsoleConfig) -> Result<(), ConfigError> {
        self.source_if_exists(self.path, config)
    }

    fn source_if_exists(&self, path: &Path, config: &mut ConsoleConfig) -> Result<(), ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no rc file, using defaults");
            return Ok(());
        }

        let content = fs::read_to_string(path)?;
        for (index, line) in content.lines().enumerate() {
            self.process_line(index + 1, line, config)?;
        }
        Ok(())
    }

    fn process_line(
        &self,
        number: usize,
        line: &str,
        config: &mut ConsoleConfig,
    ) -> Result<(), ConfigError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let malformed = || ConfigError::Malformed {
            line: number,
            text: line.to_string(),
        };

        let assignment = line.strip_prefix("set ").ok_or_else(malformed)?;
        let (key, value) = assignment.split_once('=').ok_or_else(malformed)?;
        config.set(key.trim(), strip_quotes(value.trim()))
    }
}

fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
