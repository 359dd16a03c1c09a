//! Error types for LayerKV core.

use crate::types::TxnOperation;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in LayerKV core operations.
///
/// Reads and writes never fail; only closing a transaction can.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Commit or rollback was requested while no transaction is open.
    #[error("no active transaction: cannot {operation}")]
    NoActiveTransaction {
        /// The operation that was rejected.
        operation: TxnOperation,
    },
}

impl CoreError {
    /// Creates a no active transaction error.
    pub fn no_active_transaction(operation: TxnOperation) -> Self {
        Self::NoActiveTransaction { operation }
    }
}
