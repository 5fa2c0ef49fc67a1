//! Snapshot-based undo/redo history.

use crate::object::BoardObject;
use serde::{Deserialize, Serialize};

/// Maximum number of undo snapshots to keep.
const MAX_HISTORY: usize = 50;

/// A full copy of the object sequence at one point in time.
pub type Snapshot = Vec<BoardObject>;

/// Two-stack snapshot history.
///
/// `past` holds older snapshots (most recent last), `future` holds redo
/// snapshots. Recording a new snapshot clears `future`: history is linear,
/// there is no redo after a fresh edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    past: Vec<Snapshot>,
    future: Vec<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pre-mutation state of an undoable command.
    pub fn record(&mut self, pre_mutation: Snapshot) {
        self.past.push(pre_mutation);
        self.future.clear();

        if self.past.len() > MAX_HISTORY {
            self.past.remove(0);
        }
    }

    /// Pop the most recent snapshot, stashing `current` for redo.
    ///
    /// Returns `None` (and leaves `current` unused) when there is nothing to
    /// undo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.past.pop()?;
        self.future.push(current);
        Some(snapshot)
    }

    /// Mirror of [`History::undo`].
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.future.pop()?;
        self.past.push(current);
        Some(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }
}
