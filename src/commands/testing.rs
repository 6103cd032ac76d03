//! In-memory host doubles shared by the command and console tests.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use futures::{future::LocalBoxFuture, FutureExt};

use super::{CommandContext, HostFs, HostIo, HostTransfer, PickedFile};
use crate::{
    render::{BufferRenderer, Terminal},
    style::MessageStyler,
};

#[derive(Default)]
pub struct MemoryFs {
    files: RefCell<HashMap<String, Vec<u8>>>,
    preloaded: RefCell<Vec<String>>,
}

impl MemoryFs {
    pub fn insert(&self, path: &str, data: &[u8]) {
        self.files.borrow_mut().insert(path.to_string(), data.to_vec());
    }

    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }

    pub fn preloaded(&self) -> Vec<String> {
        self.preloaded.borrow().clone()
    }
}

impl HostFs for MemoryFs {
    fn read_file(&self, path: &str) -> Result<Vec<u8>, String> {
        self.get(path)
            .ok_or_else(|| "ErrnoError: No such file or directory".to_string())
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<(), String> {
        self.insert(path, data);
        Ok(())
    }

    fn preload(&self, path: &str, _data: &[u8]) -> LocalBoxFuture<'static, Result<(), String>> {
        self.preloaded.borrow_mut().push(path.to_string());
        futures::future::ready(Ok(())).boxed_local()
    }
}

#[derive(Default)]
pub struct MemoryTransfer {
    remote: RefCell<HashMap<String, Vec<u8>>>,
    picked: RefCell<Option<PickedFile>>,
    saved: RefCell<Vec<(String, String, Vec<u8>)>>,
}

impl MemoryTransfer {
    pub fn serve(&self, url: &str, data: &[u8]) {
        self.remote.borrow_mut().insert(url.to_string(), data.to_vec());
    }

    pub fn pick(&self, name: &str, data: &[u8]) {
        *self.picked.borrow_mut() = Some(PickedFile {
            name: name.to_string(),
            data: data.to_vec(),
        });
    }

    pub fn saved(&self) -> Vec<(String, String, Vec<u8>)> {
        self.saved.borrow().clone()
    }
}

impl HostTransfer for MemoryTransfer {
    fn save(&self, data: &[u8], file_name: &str, mime: &str) -> Result<(), String> {
        self.saved
            .borrow_mut()
            .push((file_name.to_string(), mime.to_string(), data.to_vec()));
        Ok(())
    }

    fn fetch(&self, url: &str) -> LocalBoxFuture<'static, Result<Vec<u8>, String>> {
        let result = self
            .remote
            .borrow()
            .get(url)
            .cloned()
            .ok_or_else(|| format!("HTTP 404 - Not Found (URL: '{}')", url));
        futures::future::ready(result).boxed_local()
    }

    fn pick_file(&self) -> LocalBoxFuture<'static, Result<PickedFile, String>> {
        let result = self
            .picked
            .borrow_mut()
            .take()
            .ok_or_else(|| "no file chosen".to_string());
        futures::future::ready(result).boxed_local()
    }
}

pub struct Fixture {
    pub ctx: CommandContext,
    pub fs: Rc<MemoryFs>,
    pub transfer: Rc<MemoryTransfer>,
    pub output: BufferRenderer,
}

impl Fixture {
    pub fn host(&self) -> HostIo {
        self.ctx.host.clone()
    }
}

pub fn fixture() -> Fixture {
    let output = BufferRenderer::new();
    let term = Terminal::new(Box::new(output.clone()), MessageStyler::plain(), "repl", "> ");
    let fs = Rc::new(MemoryFs::default());
    let transfer = Rc::new(MemoryTransfer::default());
    let host = HostIo::new(fs.clone(), transfer.clone());
    Fixture {
        ctx: CommandContext::new(term, host, true),
        fs,
        transfer,
        output,
    }
}
