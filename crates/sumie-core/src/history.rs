//! Bounded, indexed undo/redo history.

use std::collections::HashMap;

use crate::patch::PatchSet;

/// Committed transitions kept before the oldest entries are evicted.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Forward and backward patches of one committed transition.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub forward: PatchSet,
    pub backward: PatchSet,
}

/// Indexed window of committed transitions.
///
/// The cursor `current_version` points at the most recently applied entry;
/// −1 means nothing is applied (no commits yet, or everything undone).
/// Entries fall out of the window in two ways: a fresh commit discards the
/// superseded redo branch above the cursor, and the entry `capacity` steps
/// below the cursor is evicted.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: HashMap<i64, HistoryEntry>,
    current_version: i64,
    capacity: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            current_version: -1,
            capacity,
        }
    }

    pub fn current_version(&self) -> i64 {
        self.current_version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a committed transition at the next version.
    ///
    /// Any entry at the new version + 1 belonged to a redo branch that is
    /// no longer reachable and is dropped; the entry falling out of the
    /// capacity window is evicted.
    pub fn record(&mut self, forward: PatchSet, backward: PatchSet) {
        self.current_version += 1;
        self.entries
            .insert(self.current_version, HistoryEntry { forward, backward });
        self.entries.remove(&(self.current_version + 1));
        self.entries
            .remove(&(self.current_version - self.capacity as i64));
    }

    /// Backward patches of the entry under the cursor, stepping the cursor
    /// back. `None` at the empty boundary or when the entry was evicted;
    /// the cursor does not move on a miss.
    pub fn undo(&mut self) -> Option<PatchSet> {
        if self.current_version < 0 {
            return None;
        }
        let entry = self.entries.get(&self.current_version)?;
        let patches = entry.backward.clone();
        self.current_version -= 1;
        Some(patches)
    }

    /// Forward patches of the entry above the cursor, advancing the cursor.
    ///
    /// The cursor only advances when an entry exists at the target version;
    /// redo past the end of history is a full no-op rather than burning a
    /// version slot.
    pub fn redo(&mut self) -> Option<PatchSet> {
        let entry = self.entries.get(&(self.current_version + 1))?;
        let patches = entry.forward.clone();
        self.current_version += 1;
        Some(patches)
    }
}
