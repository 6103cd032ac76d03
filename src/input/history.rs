/// Recall direction for history browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Older,
    Newer,
}

pub const COMMENT_MARKER: char = '#';

/// Session history of submitted commands, in submission order.
///
/// Entries are never removed or reordered. `position` is `None` while the
/// user is not browsing.
#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: Vec<String>,
    position: Option<usize>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `command` belongs in history at all: comments and
    /// multi-line commands are left out.
    pub fn accepts(command: &str) -> bool {
        !command.trim().is_empty()
            && !command.starts_with(COMMENT_MARKER)
            && !command.contains('\n')
    }

    /// Appends `command` unconditionally and stops browsing.
    pub fn push(&mut self, command: &str) {
        self.entries.push(command.to_string());
        self.position = None;
    }

    /// Pushes `command` if [`accepts`](Self::accepts) allows it. Browsing
    /// stops either way.
    pub fn record(&mut self, command: &str) -> bool {
        if Self::accepts(command) {
            self.push(command);
            true
        } else {
            self.position = None;
            false
        }
    }

    /// Steps through history. The first recall lands on the most recent
    /// entry; further steps clamp at both ends instead of wrapping.
    pub fn recall(&mut self, direction: Direction) -> Option<&str> {
        let last = self.entries.len().checked_sub(1)?;
        let next = match (self.position, direction) {
            (None, _) => last,
            (Some(pos), Direction::Older) => pos.saturating_sub(1),
            (Some(pos), Direction::Newer) => (pos + 1).min(last),
        };
        self.position = Some(next);
        self.entries.get(next).map(String::as_str)
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn is_browsing(&self) -> bool {
        self.position.is_some()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(entries: &[&str]) -> HistoryStore {
        let mut history = HistoryStore::new();
        for entry in entries {
            history.push(entry);
        }
        history
    }

    #[test]
    fn test_first_recall_is_most_recent() {
        let mut history = store(&["a", "b", "c"]);
        assert_eq!(history.recall(Direction::Older), Some("c"));
        assert_eq!(history.recall(Direction::Older), Some("b"));
        assert_eq!(history.recall(Direction::Newer), Some("c"));
    }

    #[test]
    fn test_older_clamps_at_oldest() {
        let mut history = store(&["a", "b"]);
        for _ in 0..5 {
            history.recall(Direction::Older);
        }
        assert_eq!(history.recall(Direction::Older), Some("a"));
        assert_eq!(history.position(), Some(0));
    }

    #[test]
    fn test_newer_clamps_at_latest_and_keeps_browsing() {
        let mut history = store(&["a", "b"]);
        history.recall(Direction::Older);
        assert_eq!(history.recall(Direction::Newer), Some("b"));
        assert_eq!(history.recall(Direction::Newer), Some("b"));
        assert!(history.is_browsing());
    }

    #[test]
    fn test_first_recall_newer_starts_at_latest() {
        let mut history = store(&["a", "b"]);
        assert_eq!(history.recall(Direction::Newer), Some("b"));
    }

    #[test]
    fn test_recall_empty_is_noop() {
        let mut history = HistoryStore::new();
        assert_eq!(history.recall(Direction::Older), None);
        assert!(!history.is_browsing());
    }

    #[test]
    fn test_push_resets_browsing() {
        let mut history = store(&["a"]);
        history.recall(Direction::Older);
        history.push("b");
        assert!(!history.is_browsing());
        assert_eq!(history.recall(Direction::Older), Some("b"));
    }

    #[test]
    fn test_record_excludes_comments_and_multiline() {
        let mut history = HistoryStore::new();
        assert!(history.record("help"));
        assert!(!history.record("# note"));
        assert!(!history.record("proc f {} {\nputs 1\n}"));
        assert!(!history.record("   "));
        assert_eq!(history.entries(), &["help".to_string()]);
    }
}
