//! Property-based test generators using proptest.
//!
//! Keys are drawn from a small alphabet so that random sequences revisit
//! the same keys across nested transactions often.

use proptest::prelude::*;

/// Keys used by generated operations.
pub const KEY_ALPHABET: [&str; 6] = ["a", "b", "c", "d", "e", "f"];

/// A single operation against a transaction stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Read a key
    Get(String),
    /// Write a key
    Put(String, i64),
    /// Delete a key
    Delete(String),
    /// Open a transaction
    Begin,
    /// Commit the innermost transaction
    Commit,
    /// Roll back the innermost transaction
    Rollback,
}

/// Strategy for generating keys from [`KEY_ALPHABET`].
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(KEY_ALPHABET.to_vec()).prop_map(String::from)
}

/// Strategy for generating values.
pub fn value_strategy() -> impl Strategy<Value = i64> {
    -1000i64..1000
}

/// Strategy for generating a single operation.
///
/// Writes dominate; commit and rollback are weighted so that generated
/// sequences regularly hit depth 0 and exercise the rejection path.
pub fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (key_strategy(), value_strategy()).prop_map(|(k, v)| Op::Put(k, v)),
        2 => key_strategy().prop_map(Op::Delete),
        2 => key_strategy().prop_map(Op::Get),
        2 => Just(Op::Begin),
        1 => Just(Op::Commit),
        1 => Just(Op::Rollback),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn op_sequence_strategy(min_ops: usize, max_ops: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), min_ops..max_ops)
}

/// Case count and sequence length for stack property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of generated sequences.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
    /// Exclusive upper bound on operations per sequence.
    pub max_ops: usize,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
            max_ops: 128,
        }
    }
}

impl PropTestConfig {
    /// Few short sequences, for checks on the generators themselves.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
            max_ops: 16,
        }
    }

    /// Fewer but much longer sequences, reaching deep nesting.
    #[must_use]
    pub fn deep() -> Self {
        Self {
            cases: 64,
            max_shrink_iters: 2000,
            max_ops: 1024,
        }
    }

    /// Strategy for op sequences bounded by [`max_ops`](Self::max_ops).
    pub fn op_sequences(&self) -> impl Strategy<Value = Vec<Op>> {
        op_sequence_strategy(1, self.max_ops)
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn keys_come_from_alphabet(key in key_strategy()) {
            prop_assert!(KEY_ALPHABET.contains(&key.as_str()));
        }

        #[test]
        fn sequence_length_in_range(ops in op_sequence_strategy(2, 10)) {
            prop_assert!(ops.len() >= 2 && ops.len() < 10);
        }

        #[test]
        fn config_bounds_sequence_length(ops in PropTestConfig::quick().op_sequences()) {
            prop_assert!(!ops.is_empty() && ops.len() < PropTestConfig::quick().max_ops);
        }
    }
}
