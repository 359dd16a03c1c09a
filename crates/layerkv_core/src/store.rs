//! The key-value capability shared by layers and the transaction stack.

use std::borrow::Borrow;
use std::hash::Hash;

/// A readable and writable key-value store.
///
/// Implemented by [`LayerView`](crate::LayerView) (a single overlay and its
/// ancestors) and [`TransactionStack`](crate::TransactionStack) (which
/// forwards to its active layer). Code that only needs get/put/delete can be
/// written once against this trait.
///
/// # Invariants
///
/// - `get` after `put(k, v)` returns `v`
/// - `get` after `delete(k)` returns `None`
/// - None of the operations fail
pub trait Store<K, V> {
    /// Returns the value visible for `key`, if any.
    fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Sets `key` to `value`.
    fn put(&mut self, key: K, value: V);

    /// Hides `key` so that subsequent reads return `None`.
    fn delete(&mut self, key: K);
}
