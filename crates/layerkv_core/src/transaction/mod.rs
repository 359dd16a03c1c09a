//! Nested transactions over a stack of layers.
//!
//! Each open transaction owns one [`Layer`](crate::Layer) on top of the
//! stack. Commit folds the top layer into the one below it; rollback drops it.

mod stack;
mod summary;

pub use stack::TransactionStack;
pub use summary::{MergeSummary, RollbackSummary};
