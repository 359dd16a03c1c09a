//! Results of closing a transaction.

/// What a commit folded into the parent layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeSummary {
    /// Tombstones replayed as deletes on the parent.
    pub deleted: usize,
    /// Edits replayed as puts on the parent.
    pub written: usize,
    /// Depth after the commit.
    pub depth: usize,
}

impl MergeSummary {
    /// Checks if the committed transaction made no changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deleted == 0 && self.written == 0
    }
}

/// What a rollback discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollbackSummary {
    /// Edits and tombstones dropped with the layer.
    pub discarded: usize,
    /// Depth after the rollback.
    pub depth: usize,
}
