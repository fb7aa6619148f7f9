//! Bounded history of pre-answer snapshots.

use std::collections::VecDeque;

use crate::model::{ProgressRecord, SessionStats};

/// Number of snapshots kept by default.
pub const DEFAULT_UNDO_CAPACITY: usize = 50;

/// Copy of the live state taken immediately before an answer was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoEntry {
    stats: SessionStats,
    record: ProgressRecord,
}

impl UndoEntry {
    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[must_use]
    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    #[must_use]
    pub fn into_parts(self) -> (SessionStats, ProgressRecord) {
        (self.stats, self.record)
    }
}

/// LIFO stack of snapshots that evicts its oldest entry once full.
#[derive(Debug, Clone)]
pub struct UndoLedger {
    entries: VecDeque<UndoEntry>,
    capacity: usize,
}

impl UndoLedger {
    /// Create a ledger holding at most `capacity` snapshots (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a copy of the given state, evicting the oldest snapshot when full.
    pub fn push(&mut self, stats: &SessionStats, record: &ProgressRecord) {
        self.entries.push_back(UndoEntry {
            stats: stats.clone(),
            record: record.clone(),
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Remove and return the most recent snapshot.
    pub fn pop(&mut self) -> Option<UndoEntry> {
        self.entries.pop_back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for UndoLedger {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_CAPACITY)
    }
}
