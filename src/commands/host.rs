use futures::future::LocalBoxFuture;

/// The interpreter's (emulated) filesystem.
pub trait HostFs {
    fn read_file(&self, path: &str) -> Result<Vec<u8>, String>;

    fn write_file(&self, path: &str, data: &[u8]) -> Result<(), String>;

    /// Lets the host decode a freshly written file (images and the like).
    fn preload(&self, _path: &str, _data: &[u8]) -> LocalBoxFuture<'static, Result<(), String>> {
        Box::pin(futures::future::ready(Ok(())))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub data: Vec<u8>,
}

/// Moves files between the user's machine and the console.
pub trait HostTransfer {
    /// Hands `data` to the user as a file named `file_name`.
    fn save(&self, data: &[u8], file_name: &str, mime: &str) -> Result<(), String>;

    fn fetch(&self, url: &str) -> LocalBoxFuture<'static, Result<Vec<u8>, String>>;

    /// Asks the user to choose a local file.
    fn pick_file(&self) -> LocalBoxFuture<'static, Result<PickedFile, String>>;
}
