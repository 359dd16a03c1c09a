//! Core type definitions for LayerKV.

use std::fmt;

/// Position of a layer in its stack's layer arena.
///
/// Index 0 is always the root layer. A layer's index also equals the
/// transaction depth at which it is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerIndex(pub usize);

impl LayerIndex {
    /// The root layer's index.
    pub const ROOT: Self = Self(0);

    /// Creates a new layer index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index value.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0
    }

    /// Returns true if this is the root layer's index.
    #[must_use]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for LayerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer:{}", self.0)
    }
}

/// Operation that closes a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxnOperation {
    /// Fold the top layer into its parent.
    Commit,
    /// Discard the top layer.
    Rollback,
}

impl fmt::Display for TxnOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Commit => f.write_str("commit"),
            Self::Rollback => f.write_str("rollback"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_index_display() {
        assert_eq!(LayerIndex::new(3).to_string(), "layer:3");
        assert!(LayerIndex::ROOT.is_root());
        assert!(!LayerIndex::new(1).is_root());
    }

    #[test]
    fn operation_display() {
        assert_eq!(TxnOperation::Commit.to_string(), "commit");
        assert_eq!(TxnOperation::Rollback.to_string(), "rollback");
    }
}
