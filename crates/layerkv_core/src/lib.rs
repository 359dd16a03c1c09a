//! # LayerKV Core
//!
//! In-memory key-value store with nested transactions.
//!
//! This crate provides:
//! - [`Layer`] - a copy-on-write overlay of edits and tombstones
//! - [`TransactionStack`] - nested begin/commit/rollback over a stack of layers
//! - [`Store`] - the get/put/delete capability shared by layers and the stack
//!
//! ## Example
//!
//! ```rust
//! use layerkv_core::TransactionStack;
//!
//! let mut stack: TransactionStack<String, i64> = TransactionStack::new();
//! stack.put("A".to_string(), 1);
//!
//! stack.begin();
//! stack.delete("A".to_string());
//! assert_eq!(stack.get("A"), None);
//!
//! stack.rollback().unwrap();
//! assert_eq!(stack.get("A"), Some(&1));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod layer;
mod stats;
mod store;
mod transaction;
mod types;

pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use layer::{Layer, LayerView, Probe};
pub use stats::StackStats;
pub use store::Store;
pub use transaction::{MergeSummary, RollbackSummary, TransactionStack};
pub use types::{LayerIndex, TxnOperation};

/// Crate version, for display by front ends.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
