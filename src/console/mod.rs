//! The console session: one owned object holding the line editor, history
//! and command queue, shared by the input handlers and the dispatcher.

use std::{cell::RefCell, rc::Rc};

use futures::channel::mpsc;

use crate::{
    commands::CommandTable,
    config::ConsoleConfig,
    error::CommandError,
    eval::{EvalAdapter, Evaluator},
    input::{HistoryStore, KeyEvent, LineEditor},
    queue::{CommandQueue, QueuedCommand},
    render::{Renderer, Terminal},
    style::MessageStyler,
};

mod dispatcher;
mod sleeper;

pub use dispatcher::Dispatcher;
pub use sleeper::{NoDelay, Sleeper};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleState {
    /// Interpreter not attached yet; input is ignored.
    Loading,
    Ready,
    /// Interpreter failed to load; nothing will ever be dispatched.
    Failed,
}

struct Session {
    editor: LineEditor,
    history: HistoryStore,
    queue: CommandQueue,
    state: ConsoleState,
    in_flight: bool,
}

/// Cloneable handle to the console session.
#[derive(Clone)]
pub struct Console {
    session: Rc<RefCell<Session>>,
    term: Terminal,
    evaluator: Rc<RefCell<Option<EvalAdapter>>>,
    wake: mpsc::UnboundedSender<()>,
    wake_rx: Rc<RefCell<Option<mpsc::UnboundedReceiver<()>>>>,
    config: Rc<ConsoleConfig>,
}

impl Console {
    pub fn new(renderer: Box<dyn Renderer>, config: ConsoleConfig) -> Self {
        let styler = MessageStyler::new(config.color);
        Self::with_styler(renderer, config, styler)
    }

    pub fn with_styler(
        renderer: Box<dyn Renderer>,
        config: ConsoleConfig,
        styler: MessageStyler,
    ) -> Self {
        let term = Terminal::new(
            renderer,
            styler,
            &config.greeting,
            &config.continuation_prompt,
        );
        let (wake, wake_rx) = mpsc::unbounded();

        Self {
            session: Rc::new(RefCell::new(Session {
                editor: LineEditor::new(),
                history: HistoryStore::new(),
                queue: CommandQueue::new(),
                state: ConsoleState::Loading,
                in_flight: false,
            })),
            term,
            evaluator: Rc::new(RefCell::new(None)),
            wake,
            wake_rx: Rc::new(RefCell::new(Some(wake_rx))),
            config: Rc::new(config),
        }
    }

    pub fn terminal(&self) -> &Terminal {
        &self.term
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn state(&self) -> ConsoleState {
        self.session.borrow().state
    }

    /// Makes the console ready and shows the first prompt.
    pub fn attach_evaluator(&self, evaluator: Rc<dyn Evaluator>) {
        if self.state() == ConsoleState::Failed {
            return;
        }
        *self.evaluator.borrow_mut() = Some(EvalAdapter::new(evaluator));
        self.session.borrow_mut().state = ConsoleState::Ready;
        tracing::debug!("evaluator attached");
        self.term.print_prompt();
    }

    /// Like [`Console::attach_evaluator`], first registering interpreter
    /// help for every reserved command in `table`. Registration failures
    /// are not reported.
    pub fn attach_evaluator_with_help(&self, evaluator: Rc<dyn Evaluator>, table: &CommandTable) {
        if self.state() == ConsoleState::Failed {
            return;
        }
        let adapter = EvalAdapter::new(evaluator.clone());
        for script in table.help_scripts() {
            if let Err(error) = adapter.run(&script) {
                tracing::debug!(error = %error, "help registration failed");
            }
        }
        self.attach_evaluator(evaluator);
    }

    /// Reports a loader failure. Only the first report is shown.
    pub fn fail_load(&self, message: &str) {
        {
            let mut session = self.session.borrow_mut();
            if session.state == ConsoleState::Failed {
                return;
            }
            session.state = ConsoleState::Failed;
        }
        let error = CommandError::FatalLoad(message.to_string());
        tracing::error!(error = %error, "interpreter failed to load");
        self.term.write_error(&error.to_string());
        // let the dispatcher notice and stop
        let _ = self.wake.unbounded_send(());
    }

    /// Progress marker while the interpreter is loading.
    pub fn load_progress(&self) -> bool {
        if self.state() != ConsoleState::Loading {
            return false;
        }
        self.term.write(".");
        true
    }

    /// Key callback. Returns `false` to suppress the renderer's default
    /// handling.
    pub fn on_key(&self, event: KeyEvent) -> bool {
        let mut session = self.session.borrow_mut();
        let Session {
            editor, history, ..
        } = &mut *session;
        editor.handle_key(event, history, &self.term)
    }

    /// Data callback: typed characters or pasted text.
    pub fn on_data(&self, data: &str) {
        if self.state() != ConsoleState::Ready {
            tracing::debug!(len = data.len(), "input ignored, console not ready");
            return;
        }
        let Some(evaluator) = self.evaluator() else {
            return;
        };

        let completed = {
            let mut session = self.session.borrow_mut();
            session
                .editor
                .handle_data(data, &|text| evaluator.is_complete(text), &self.term)
        };

        for command in completed {
            self.submit(command);
        }
    }

    /// Feeds a multi-line script as if it had been pasted.
    pub fn paste_script(&self, script: &str) {
        let mut data = script.replace("\r\n", "\r").replace('\n', "\r");
        if !data.ends_with('\r') {
            data.push('\r');
        }
        self.on_data(&data);
    }

    pub fn print_message(&self, text: &str, level: i32) {
        self.term.print_message(text, level);
    }

    fn submit(&self, command: QueuedCommand) {
        let wake = {
            let mut session = self.session.borrow_mut();
            if command.text.trim().is_empty() {
                let idle = session.queue.is_empty() && !session.in_flight;
                drop(session);
                if idle {
                    self.term.print_prompt();
                }
                return;
            }

            session.history.record(&command.text);
            tracing::debug!(command = %command.text, echo = command.echo, "queued");
            session.queue.add(command)
        };

        if wake && self.wake.unbounded_send(()).is_err() {
            tracing::warn!("dispatcher is gone, command stays queued");
        }
    }

    pub fn history(&self) -> Vec<String> {
        self.session.borrow().history.entries().to_vec()
    }

    pub fn pending(&self) -> usize {
        self.session.borrow().queue.extent()
    }

    pub fn input(&self) -> String {
        self.session.borrow().editor.buffer().text().to_string()
    }

    pub fn is_busy(&self) -> bool {
        let session = self.session.borrow();
        session.in_flight || !session.queue.is_empty()
    }

    fn evaluator(&self) -> Option<EvalAdapter> {
        self.evaluator.borrow().clone()
    }

    fn take_wake_receiver(&self) -> Option<mpsc::UnboundedReceiver<()>> {
        self.wake_rx.borrow_mut().take()
    }

    fn has_pending(&self) -> bool {
        !self.session.borrow().queue.is_empty()
    }

    fn begin_next(&self) -> Option<QueuedCommand> {
        let mut session = self.session.borrow_mut();
        let command = session.queue.pop()?;
        session.in_flight = true;
        Some(command)
    }

    fn finish_current(&self) {
        self.session.borrow_mut().in_flight = false;
    }

    /// Shows input typed during a burst once nothing is left to dispatch.
    fn reveal_input(&self) {
        let mut session = self.session.borrow_mut();
        if session.queue.is_empty() {
            session.editor.reveal(&self.term);
        }
    }
}

#[cfg(test)]
mod tests;
