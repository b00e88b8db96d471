//! Bounded undo/redo history over scene snapshots.

/// Maximum number of snapshots kept.
pub const MAX_HISTORY: usize = 20;

/// A bounded list of scene snapshots with a cursor.
///
/// The cursor always points at the snapshot describing the current scene.
/// Recording after an undo truncates the redo branch; recording past the
/// capacity evicts the oldest snapshot.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a snapshot of the current scene.
    pub fn record(&mut self, snapshot: String) {
        if self.entries.is_empty() {
            self.entries.push(snapshot);
            self.cursor = 0;
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        if self.entries.len() > MAX_HISTORY {
            self.entries.remove(0);
        } else {
            self.cursor += 1;
        }
        debug_assert_eq!(self.cursor, self.entries.len() - 1);
    }

    /// Step back one snapshot. Returns the snapshot to restore.
    pub fn undo(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward one snapshot. Returns the snapshot to restore.
    pub fn redo(&mut self) -> Option<&str> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    /// Whether an undo step is available.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether a redo step is available.
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Snapshot the cursor currently points at.
    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Number of snapshots kept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no snapshot has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all snapshots.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: usize) -> History {
        let mut history = History::new();
        for i in 0..n {
            history.record(format!("s{i}"));
        }
        history
    }

    #[test]
    fn undo_redo_walks_the_list() {
        let mut history = filled(3);
        assert_eq!(history.undo(), Some("s1"));
        assert_eq!(history.undo(), Some("s0"));
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), Some("s1"));
        assert_eq!(history.redo(), Some("s2"));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn record_after_undo_drops_redo_branch() {
        let mut history = filled(3);
        history.undo();
        history.record("s3".into());
        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);
        assert_eq!(history.current(), Some("s3"));
        assert_eq!(history.undo(), Some("s1"));
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut history = filled(MAX_HISTORY + 5);
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.current(), Some("s24"));
        // Walking all the way back lands on the oldest surviving snapshot.
        let mut last = None;
        while let Some(snapshot) = history.undo() {
            last = Some(snapshot.to_string());
        }
        assert_eq!(last.as_deref(), Some("s5"));
    }

    #[test]
    fn record_at_capacity_keeps_cursor_on_newest() {
        let mut history = filled(MAX_HISTORY);
        assert!(history.can_undo());
        assert!(!history.can_redo());
        history.record("extra".into());
        assert_eq!(history.current(), Some("extra"));
        assert!(!history.can_redo());
    }

    #[test]
    fn empty_history_has_nothing_to_do() {
        let mut history = History::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
    }
}
