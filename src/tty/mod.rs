//! Native host: drives the console from a raw-mode tty.

mod decoder;
mod host;
mod raw;
mod renderer;

use std::{io::Read, rc::Rc, thread, time::Duration};

use futures::{future::LocalBoxFuture, FutureExt};
use signal_hook::{
    consts::{SIGHUP, SIGTERM},
    iterator::Signals,
};
use tokio::sync::mpsc;

pub use decoder::{InputDecoder, InputEvent};
pub use host::{NativeFs, NativeTransfer};
pub use raw::RawMode;
pub use renderer::StdoutRenderer;

use crate::{
    commands::HostIo,
    config::ConsoleConfig,
    console::{Console, Dispatcher, Sleeper},
    error::ConsoleError,
    process::ShellEvaluator,
};

/// Dispatch delay on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        tokio::time::sleep(duration).boxed_local()
    }
}

enum Input {
    Event(InputEvent),
    Closed,
    Signal(i32),
}

/// Runs an interactive session on the controlling terminal until Ctrl+D on
/// an empty line, end of input, SIGTERM or SIGHUP.
pub fn run(config: ConsoleConfig, quiet: bool) -> Result<(), ConsoleError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let raw = RawMode::enable()?;

    let local = tokio::task::LocalSet::new();
    let result = local.block_on(&runtime, session(config, quiet));

    drop(raw);
    println!();
    result
}

async fn session(config: ConsoleConfig, quiet: bool) -> Result<(), ConsoleError> {
    let shell = config.shell.clone();
    let console = Console::new(Box::new(StdoutRenderer::new()), config);
    let host = HostIo::new(Rc::new(NativeFs::new()), Rc::new(NativeTransfer::new()));
    let dispatcher = Dispatcher::new(&console, host, Rc::new(TokioSleeper))?;
    let dispatching = tokio::task::spawn_local(dispatcher.run());

    if !quiet {
        console
            .terminal()
            .write_info(&format!("replterm {} ({})", env!("CARGO_PKG_VERSION"), shell));
    }
    match ShellEvaluator::new(&shell, console.terminal().clone()) {
        Ok(evaluator) => console.attach_evaluator(Rc::new(evaluator)),
        Err(e) => console.fail_load(&e.to_string()),
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_stdin_reader(tx.clone())?;
    spawn_signal_watch(tx)?;

    while let Some(input) = rx.recv().await {
        match input {
            Input::Event(InputEvent::Data(data)) => console.on_data(&data),
            Input::Event(InputEvent::Key(event)) => {
                console.on_key(event);
            }
            Input::Event(InputEvent::Eof) => {
                if console.input().is_empty() {
                    break;
                }
            }
            Input::Closed => break,
            Input::Signal(signal) => {
                tracing::info!(signal, "terminating on signal");
                break;
            }
        }
    }

    dispatching.abort();
    Ok(())
}

fn spawn_stdin_reader(tx: mpsc::UnboundedSender<Input>) -> Result<(), ConsoleError> {
    thread::Builder::new()
        .name("replterm-stdin".to_string())
        .spawn(move || {
            let mut decoder = InputDecoder::new();
            let mut stdin = std::io::stdin().lock();
            let mut buf = [0u8; 4096];
            loop {
                let n = match stdin.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => n,
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        tracing::warn!(error = %e, "stdin read failed");
                        break;
                    }
                };
                for event in decoder.feed(&buf[..n]) {
                    if tx.send(Input::Event(event)).is_err() {
                        return;
                    }
                }
            }
            let _ = tx.send(Input::Closed);
        })?;
    Ok(())
}

fn spawn_signal_watch(tx: mpsc::UnboundedSender<Input>) -> Result<(), ConsoleError> {
    let mut signals = Signals::new([SIGTERM, SIGHUP])?;
    thread::Builder::new()
        .name("replterm-signals".to_string())
        .spawn(move || {
            if let Some(signal) = signals.forever().next() {
                let _ = tx.send(Input::Signal(signal));
            }
        })?;
    Ok(())
}
