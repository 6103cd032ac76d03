use std::{
    io,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
    thread,
};

use futures::{channel::oneshot, future::LocalBoxFuture, FutureExt};

use super::{is_balanced, ProcessError};
use crate::{
    eval::{Evaluator, ASYNC_SUCCESS},
    path::PathExpander,
    render::Terminal,
};

/// Evaluator that hands every command to the system shell with `-c`.
///
/// Output is captured and written to the terminal once the command exits;
/// stdin is closed so commands cannot steal keystrokes from the editor.
#[derive(Clone)]
pub struct ShellEvaluator {
    shell: PathBuf,
    term: Terminal,
}

impl ShellEvaluator {
    pub fn new(shell: &str, term: Terminal) -> Result<Self, ProcessError> {
        let shell = PathExpander::new()
            .expand(shell)
            .map_err(|e| ProcessError::Other(e.to_string()))?;

        Ok(ShellEvaluator { shell, term })
    }

    pub fn shell(&self) -> &Path {
        &self.shell
    }

    fn spawn(shell: &Path, text: &str) -> Result<Output, ProcessError> {
        let output = Command::new(shell)
            .arg("-c")
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        match output {
            Ok(output) => Ok(output),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ProcessError::CommandNotFound(
                shell.to_string_lossy().into_owned(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes captured output and turns the exit status into a result.
    fn report(&self, output: Output) -> Result<(), ProcessError> {
        write_stream(&self.term, &output.stdout, false);
        write_stream(&self.term, &output.stderr, true);

        if output.status.success() {
            return Ok(());
        }
        match output.status.code() {
            Some(code) => Err(ProcessError::Exited(code)),
            None => Err(ProcessError::Killed),
        }
    }
}

fn write_stream(term: &Terminal, bytes: &[u8], is_stderr: bool) {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim_end_matches('\n');
    if text.is_empty() {
        return;
    }
    if is_stderr {
        term.write_warning(text);
    } else {
        term.write_line("");
        term.write_multiline(text);
    }
}

impl Evaluator for ShellEvaluator {
    fn is_complete(&self, text: &str) -> bool {
        is_balanced(text)
    }

    fn eval(&self, text: &str) -> Result<(), String> {
        let output = Self::spawn(&self.shell, text).map_err(|e| e.to_string())?;
        self.report(output).map_err(|e| e.to_string())
    }

    fn eval_async(&self, text: &str) -> Option<LocalBoxFuture<'static, Result<i32, String>>> {
        let (tx, rx) = oneshot::channel();
        let shell = self.shell.clone();
        let command = text.to_string();

        let spawned = thread::Builder::new()
            .name("replterm-async".to_string())
            .spawn(move || {
                let _ = tx.send(Self::spawn(&shell, &command));
            });

        let evaluator = self.clone();
        Some(
            async move {
                spawned.map_err(|e| e.to_string())?;
                let output = rx
                    .await
                    .map_err(|_| "asynchronous command was abandoned".to_string())?
                    .map_err(|e| e.to_string())?;
                evaluator.report(output).map_err(|e| e.to_string())?;
                Ok::<i32, String>(ASYNC_SUCCESS)
            }
            .boxed_local(),
        )
    }
}
