//! Transaction stack statistics.
//!
//! # Usage
//!
//! ```rust
//! use layerkv_core::TransactionStack;
//!
//! let mut stack: TransactionStack<String, u32> = TransactionStack::new();
//! stack.begin();
//! stack.put("k".to_string(), 1);
//! stack.commit().unwrap();
//!
//! let stats = stack.stats();
//! assert_eq!(stats.transactions_committed, 1);
//! assert_eq!(stats.edits, 1);
//! ```

/// Lifetime transaction counters kept by the stack.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TxnCounters {
    started: u64,
    committed: u64,
    rolled_back: u64,
}

impl TxnCounters {
    /// Records a transaction start.
    pub(crate) fn record_begin(&mut self) {
        self.started += 1;
    }

    /// Records a transaction commit.
    pub(crate) fn record_commit(&mut self) {
        self.committed += 1;
    }

    /// Records a transaction rollback.
    pub(crate) fn record_rollback(&mut self) {
        self.rolled_back += 1;
    }
}

/// Point-in-time snapshot of a stack's shape and counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StackStats {
    /// Number of open transactions.
    pub depth: usize,
    /// Edits held across all layers.
    pub edits: usize,
    /// Tombstones held across all layers.
    pub tombstones: usize,
    /// Transactions started since construction.
    pub transactions_started: u64,
    /// Transactions committed since construction.
    pub transactions_committed: u64,
    /// Transactions rolled back since construction.
    pub transactions_rolled_back: u64,
}

impl StackStats {
    pub(crate) fn new(depth: usize, edits: usize, tombstones: usize, counters: TxnCounters) -> Self {
        Self {
            depth,
            edits,
            tombstones,
            transactions_started: counters.started,
            transactions_committed: counters.committed,
            transactions_rolled_back: counters.rolled_back,
        }
    }

    /// Returns the number of transactions that were closed either way.
    #[must_use]
    pub fn transactions_closed(&self) -> u64 {
        self.transactions_committed + self.transactions_rolled_back
    }
}
