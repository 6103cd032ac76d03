use super::ConfigError;
use crate::path::PathExpander;
use std::path::PathBuf;

pub const RC_FILE_NAME: &str = ".repltermrc";

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub rc_path: PathBuf,
}

impl ConfigPaths {
    pub fn new() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        Ok(ConfigPaths {
            rc_path: home.join(RC_FILE_NAME),
        })
    }

    /// Uses an explicit rc path (from `-c`), which must exist.
    pub fn with_override(path: &str) -> Result<Self, ConfigError> {
        let rc_path = PathExpander::new().expand(path)?;
        if !rc_path.exists() {
            return Err(ConfigError::ConfigFileNotFound(rc_path.display().to_string()));
        }
        Ok(ConfigPaths { rc_path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rc_name() {
        if let Ok(paths) = ConfigPaths::new() {
            assert!(paths.rc_path.ends_with(RC_FILE_NAME));
        }
    }

    #[test]
    fn test_override_must_exist() {
        assert!(matches!(
            ConfigPaths::with_override("/nonexistent/replterm/rc"),
            Err(ConfigError::ConfigFileNotFound(_))
        ));

        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(ConfigPaths::with_override(path).unwrap().rc_path, file.path());
    }
}
