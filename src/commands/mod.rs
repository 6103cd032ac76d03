//! Commands the console handles itself instead of passing them to the
//! interpreter.
//!
//! A command is reserved when it starts with one of the table's prefixes
//! followed by a space; the rest of the line (trimmed) is its argument
//! string. Reserved commands still go through the dispatch queue like any
//! other command.

use std::rc::Rc;

use futures::{future::LocalBoxFuture, FutureExt};

use crate::{error::CommandError, eval::EvalAdapter, render::Terminal};

pub mod download;
mod host;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

pub use host::{HostFs, HostTransfer, PickedFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedCommand {
    Download,
    Upload,
    Async,
}

const HELP_GROUP: &str = "JavaScript commands";

impl ReservedCommand {
    /// Usage text in the interpreter's help layout, shown under `name`.
    pub fn usage(&self, name: &str) -> String {
        match self {
            ReservedCommand::Download => format!(
                "{} filePath [fileName]\n\t\t: Download file from emulated file system\n\t\t:   filePath file path within emulated file system to download;\n\t\t:   fileName file name to download.",
                name
            ),
            ReservedCommand::Upload => format!(
                "{} fileUrl1 [-path filePath1] [fileUrl2 [-path filePath2]] ...\n\t\t: Upload files to emulated file system\n\t\t:   fileUrl  URL on server or . to show open file dialog;\n\t\t:   filePath file path within emulated file system to create.",
                name
            ),
            ReservedCommand::Async => format!("{} command ...\n\t\t: Run Tcl command asynchronously.", name),
        }
    }
}

/// Ordered prefix table, checked in a single pass.
#[derive(Debug, Clone)]
pub struct CommandTable {
    entries: Vec<(String, ReservedCommand)>,
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl CommandTable {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn standard() -> Self {
        Self::empty()
            .with_prefix("jsdownload", ReservedCommand::Download)
            .with_prefix("jsdown", ReservedCommand::Download)
            .with_prefix("download", ReservedCommand::Download)
            .with_prefix("jsupload", ReservedCommand::Upload)
            .with_prefix("upload", ReservedCommand::Upload)
            .with_prefix("jsasync", ReservedCommand::Async)
    }

    /// Appends a prefix; earlier entries win.
    pub fn with_prefix(mut self, name: &str, command: ReservedCommand) -> Self {
        self.entries.push((format!("{} ", name), command));
        self
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(prefix, _)| prefix.trim_end())
    }

    /// One `help` registration script per command, named after the first
    /// prefix that maps to it.
    pub fn help_scripts(&self) -> Vec<String> {
        let mut seen = Vec::new();
        self.entries
            .iter()
            .filter_map(|(prefix, command)| {
                if seen.contains(command) {
                    return None;
                }
                seen.push(*command);
                let name = prefix.trim_end();
                Some(format!(
                    "help {} {{{}}} {{{}}}",
                    name,
                    command.usage(name),
                    HELP_GROUP
                ))
            })
            .collect()
    }

    /// Matches `line` against the table, returning the command and its
    /// trimmed argument string.
    pub fn resolve<'a>(&self, line: &'a str) -> Option<(ReservedCommand, &'a str)> {
        self.entries.iter().find_map(|(prefix, command)| {
            line.strip_prefix(prefix.as_str())
                .map(|args| (*command, args.trim()))
        })
    }
}

/// Host services reserved commands run against.
#[derive(Clone)]
pub struct HostIo {
    pub fs: Rc<dyn HostFs>,
    pub transfer: Rc<dyn HostTransfer>,
}

impl HostIo {
    pub fn new(fs: Rc<dyn HostFs>, transfer: Rc<dyn HostTransfer>) -> Self {
        Self { fs, transfer }
    }
}

#[derive(Clone)]
pub struct CommandContext {
    pub term: Terminal,
    pub host: HostIo,
    pub preload: bool,
}

impl CommandContext {
    pub fn new(term: Terminal, host: HostIo, preload: bool) -> Self {
        Self {
            term,
            host,
            preload,
        }
    }

    pub fn execute(
        &self,
        command: ReservedCommand,
        args: &str,
        evaluator: &EvalAdapter,
    ) -> LocalBoxFuture<'static, Result<(), CommandError>> {
        match command {
            ReservedCommand::Download => futures::future::ready(download::run(args, self)).boxed_local(),
            ReservedCommand::Upload => upload::run(args, self),
            ReservedCommand::Async => evaluator.run_async(args),
        }
    }
}
