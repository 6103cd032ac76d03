use crate::config::ConfigError;
use std::path::{Path, PathBuf};

/// Expands a leading `~` in user-supplied paths.
#[derive(Debug, Clone, Copy)]
pub struct PathExpander;

impl Default for PathExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    pub fn expand(&self, path: &str) -> Result<PathBuf, ConfigError> {
        if path.starts_with('~') {
            self.expand_tilde(path)
        } else {
            Ok(Path::new(path).to_path_buf())
        }
    }

    fn expand_tilde(&self, path: &str) -> Result<PathBuf, ConfigError> {
        if path.len() == 1 {
            return dirs::home_dir().ok_or(ConfigError::HomeDirNotFound);
        }

        match path[1..].strip_prefix('/') {
            Some(stripped) => {
                let mut home_path = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
                home_path.extend(stripped.split('/').filter(|part| !part.is_empty()));
                Ok(home_path)
            }
            // "~user/..." is left alone
            None => Ok(Path::new(path).to_path_buf()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path_untouched() {
        let expander = PathExpander::new();
        assert_eq!(expander.expand("data/a.png").unwrap(), PathBuf::from("data/a.png"));
        assert_eq!(expander.expand("~other/x").unwrap(), PathBuf::from("~other/x"));
    }

    #[test]
    fn test_tilde_expands_to_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let expander = PathExpander::new();
        assert_eq!(expander.expand("~").unwrap(), home);
        assert_eq!(expander.expand("~//a/b").unwrap(), home.join("a").join("b"));
    }
}
