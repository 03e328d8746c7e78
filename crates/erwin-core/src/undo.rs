//! Bounded undo log.
//!
//! Each edit records the minimal description of its inverse as an [`UndoAction`]. The log holds
//! at most `capacity` actions; recording into a full log forgets the oldest one. There is no
//! redo: undoing consumes the action and the next record discards anything after the cursor.

use crate::document::Position;

/// Default number of retained actions.
pub const DEFAULT_UNDO_CAPACITY: usize = 20;

/// One recorded edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoAction {
    /// `ch` was inserted at `(row, col)`.
    InsertChar {
        /// Row of the insertion.
        row: usize,
        /// Column the byte now occupies.
        col: usize,
        /// Inserted byte.
        ch: u8,
    },
    /// Backspace at `(row, col)` removed `ch`, which sat at `col - 1`.
    DeleteChar {
        /// Row of the deletion.
        row: usize,
        /// Cursor column before the backspace.
        col: usize,
        /// Removed byte.
        ch: u8,
    },
    /// Line `row` was split at `col`.
    InsertNewline {
        /// Row that was split.
        row: usize,
        /// Split column.
        col: usize,
    },
    /// Line `row` was merged onto `row - 1`.
    DeleteLine {
        /// Row of the removed line.
        row: usize,
        /// Cursor column before the merge.
        col: usize,
        /// Text of the removed line.
        content: Vec<u8>,
    },
    /// The whole document was cleared by select-all + delete.
    ClearAll {
        /// Every line's text before the clear.
        lines: Vec<Vec<u8>>,
        /// Cursor before the clear.
        cursor: Position,
    },
}

/// The undo log.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    actions: Vec<UndoAction>,
    idx: usize,
    capacity: usize,
    recording: bool,
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_CAPACITY)
    }
}

impl UndoHistory {
    /// Create an empty log holding at most `capacity` actions (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            actions: Vec::with_capacity(capacity),
            idx: 0,
            capacity,
            recording: true,
        }
    }

    /// Maximum number of retained actions.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of actions that can still be undone.
    pub fn undo_depth(&self) -> usize {
        self.idx
    }

    /// Returns `true` if there is something to undo.
    pub fn can_undo(&self) -> bool {
        self.idx > 0
    }

    /// Whether [`record`](Self::record) currently stores actions.
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Append `action`.
    ///
    /// Ignored while recording is suppressed. Anything after the cursor is discarded first; a
    /// full log evicts its oldest action.
    pub fn record(&mut self, action: UndoAction) {
        if !self.recording {
            return;
        }

        self.actions.truncate(self.idx);
        if self.actions.len() >= self.capacity {
            self.actions.remove(0);
            self.idx -= 1;
        }

        log::debug!("undo: record {action:?}");
        self.actions.push(action);
        self.idx += 1;
    }

    /// Step back one action and hand it out for replay.
    pub fn pop(&mut self) -> Option<UndoAction> {
        if self.idx == 0 {
            return None;
        }
        self.actions.truncate(self.idx);
        self.idx -= 1;
        self.actions.pop()
    }

    /// Drop every action (used when a new file is opened).
    pub fn clear(&mut self) {
        self.actions.clear();
        self.idx = 0;
    }

    pub(crate) fn set_recording(&mut self, recording: bool) {
        self.recording = recording;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn insert(col: usize) -> UndoAction {
        UndoAction::InsertChar {
            row: 0,
            col,
            ch: b'x',
        }
    }

    #[test]
    fn test_record_and_pop() {
        let mut history = UndoHistory::default();
        assert!(!history.can_undo());
        assert_eq!(history.pop(), None);

        history.record(insert(0));
        history.record(insert(1));
        assert_eq!(history.undo_depth(), 2);
        assert_eq!(history.pop(), Some(insert(1)));
        assert_eq!(history.pop(), Some(insert(0)));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn test_full_log_evicts_oldest() {
        let mut history = UndoHistory::new(3);
        for col in 0..4 {
            history.record(insert(col));
        }
        assert_eq!(history.undo_depth(), 3);
        let popped: Vec<_> = std::iter::from_fn(|| history.pop()).collect();
        assert_eq!(popped, vec![insert(3), insert(2), insert(1)]);
    }

    #[test]
    fn test_record_after_pop_discards_tail() {
        let mut history = UndoHistory::new(5);
        history.record(insert(0));
        history.record(insert(1));
        history.pop();
        history.record(insert(7));
        assert_eq!(history.pop(), Some(insert(7)));
        assert_eq!(history.pop(), Some(insert(0)));
    }

    #[test]
    fn test_suppressed_recording() {
        let mut history = UndoHistory::default();
        history.set_recording(false);
        history.record(insert(0));
        assert_eq!(history.undo_depth(), 0);
        history.set_recording(true);
        assert!(history.is_recording());
        history.record(insert(0));
        assert_eq!(history.undo_depth(), 1);
    }
}
