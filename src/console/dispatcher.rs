use std::{rc::Rc, time::Duration};

use futures::{channel::mpsc, StreamExt};

use super::{Console, ConsoleState, Sleeper};
use crate::{
    commands::{CommandContext, CommandTable, HostIo},
    error::{CommandError, ConsoleError},
    queue::QueuedCommand,
};

/// Single task that drains the command queue one command at a time.
///
/// The next command is only popped after the previous one has finished,
/// successfully or not, so evaluations never overlap even when they are
/// asynchronous.
pub struct Dispatcher {
    console: Console,
    wake: mpsc::UnboundedReceiver<()>,
    table: CommandTable,
    ctx: CommandContext,
    sleeper: Rc<dyn Sleeper>,
    delay: Duration,
}

impl Dispatcher {
    /// Creates the dispatcher for `console`. There can be only one.
    pub fn new(console: &Console, host: HostIo, sleeper: Rc<dyn Sleeper>) -> Result<Self, ConsoleError> {
        let wake = console
            .take_wake_receiver()
            .ok_or(ConsoleError::DispatcherTaken)?;
        let config = console.config();
        let ctx = CommandContext::new(console.terminal().clone(), host, config.preload_uploads);

        Ok(Self {
            console: console.clone(),
            wake,
            table: CommandTable::standard(),
            ctx,
            sleeper,
            delay: config.command_delay,
        })
    }

    pub fn with_table(mut self, table: CommandTable) -> Self {
        self.table = table;
        self
    }

    /// Runs until the console fails or every console handle is gone.
    pub async fn run(mut self) {
        while self.wake.next().await.is_some() {
            if self.console.state() == ConsoleState::Failed {
                break;
            }
            self.drain().await;
        }
        tracing::debug!("dispatcher stopped");
    }

    /// Dispatches queued commands until the queue is empty. Returns how
    /// many ran.
    pub async fn drain(&mut self) -> usize {
        let mut count = 0;
        while self.console.state() != ConsoleState::Failed && self.console.has_pending() {
            self.sleeper.sleep(self.delay).await;
            let Some(command) = self.console.begin_next() else {
                break;
            };
            self.dispatch(command).await;
            count += 1;
        }
        count
    }

    async fn dispatch(&mut self, command: QueuedCommand) {
        let term = self.console.terminal().clone();
        if command.echo {
            term.write_multiline(&command.text);
        }
        tracing::debug!(command = %command.text, "dispatch");

        let outcome = match self.console.evaluator() {
            Some(evaluator) => match self.table.resolve(&command.text) {
                Some((reserved, args)) => self.ctx.execute(reserved, args, &evaluator).await,
                None => evaluator.run(&command.text),
            },
            None => Err(CommandError::FatalLoad(
                "interpreter is not loaded".to_string(),
            )),
        };

        if let Err(error) = outcome {
            tracing::warn!(command = %command.text, kind = error.kind(), error = %error, "command failed");
            term.write_error(&error.to_string());
        }

        self.console.finish_current();
        term.print_prompt();
        self.console.reveal_input();
    }
}
