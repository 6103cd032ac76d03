use std::collections::VecDeque;

/// One accepted command waiting for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedCommand {
    pub text: String,
    /// Re-print the command before evaluating it. Set for every command but
    /// the first one completed by a single input burst, so pasted scripts
    /// are replayed visibly.
    pub echo: bool,
}

impl QueuedCommand {
    pub fn new(text: impl Into<String>, echo: bool) -> Self {
        Self {
            text: text.into(),
            echo,
        }
    }
}

/// FIFO of commands awaiting sequential dispatch.
#[derive(Debug, Default)]
pub struct CommandQueue {
    items: VecDeque<QueuedCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `command`; returns `true` when it is now the only pending
    /// item, i.e. the dispatcher has to be woken.
    pub fn add(&mut self, command: QueuedCommand) -> bool {
        self.items.push_back(command);
        self.items.len() == 1
    }

    pub fn pop(&mut self) -> Option<QueuedCommand> {
        self.items.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extent(&self) -> usize {
        self.items.len()
    }
}
