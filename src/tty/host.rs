use std::{
    fs,
    path::{Path, PathBuf},
};

use futures::{future::LocalBoxFuture, FutureExt};

use crate::{
    commands::{HostFs, HostTransfer, PickedFile},
    path::PathExpander,
};

/// The real filesystem, with `~` expansion.
#[derive(Debug, Default)]
pub struct NativeFs {
    expander: PathExpander,
}

impl NativeFs {
    pub fn new() -> Self {
        Self::default()
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, String> {
        self.expander.expand(path).map_err(|e| e.to_string())
    }
}

impl HostFs for NativeFs {
    fn read_file(&self, path: &str) -> Result<Vec<u8>, String> {
        fs::read(self.resolve(path)?).map_err(|e| e.to_string())
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<(), String> {
        let path = self.resolve(path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        fs::write(path, data).map_err(|e| e.to_string())
    }
}

/// Saves downloads into a directory and fetches `file://` URLs or plain
/// local paths. There is no file picker on a tty.
#[derive(Debug)]
pub struct NativeTransfer {
    save_dir: PathBuf,
    expander: PathExpander,
}

impl Default for NativeTransfer {
    fn default() -> Self {
        let save_dir = dirs::download_dir()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Self::with_save_dir(save_dir)
    }
}

impl NativeTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_save_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: dir.into(),
            expander: PathExpander::new(),
        }
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    fn read_url(&self, url: &str) -> Result<Vec<u8>, String> {
        let path = match url.strip_prefix("file://") {
            Some(path) => PathBuf::from(path),
            None if url.contains("://") => {
                return Err(format!("unsupported URL '{}': only local files can be fetched", url))
            }
            None => self.expander.expand(url).map_err(|e| e.to_string())?,
        };
        fs::read(&path).map_err(|e| format!("{} (URL: '{}')", e, url))
    }
}

impl HostTransfer for NativeTransfer {
    fn save(&self, data: &[u8], file_name: &str, _mime: &str) -> Result<(), String> {
        let target = self.save_dir.join(file_name);
        fs::write(&target, data).map_err(|e| format!("{}: {}", target.display(), e))?;
        tracing::info!(path = %target.display(), bytes = data.len(), "download saved");
        Ok(())
    }

    fn fetch(&self, url: &str) -> LocalBoxFuture<'static, Result<Vec<u8>, String>> {
        futures::future::ready(self.read_url(url)).boxed_local()
    }

    fn pick_file(&self) -> LocalBoxFuture<'static, Result<PickedFile, String>> {
        futures::future::ready(Err("no file chosen".to_string())).boxed_local()
    }
}
