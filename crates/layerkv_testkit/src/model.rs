//! Reference model of the transaction stack.
//!
//! The model keeps a full copy of the visible key space per depth instead of
//! overlays. It is slow and obviously correct, which makes it a good oracle
//! for the layered implementation.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// A transaction stack that snapshots the whole map on every `begin`.
#[derive(Debug, Clone)]
pub struct ModelStack<K, V> {
    snapshots: Vec<HashMap<K, V>>,
}

impl<K: Clone + Eq + Hash, V: Clone> Default for ModelStack<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Eq + Hash, V: Clone> ModelStack<K, V> {
    /// Creates a model with an empty root snapshot.
    pub fn new() -> Self {
        Self {
            snapshots: vec![HashMap::new()],
        }
    }

    /// Returns the number of open transactions.
    pub fn depth(&self) -> usize {
        self.snapshots.len() - 1
    }

    /// Returns the value visible for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.top().get(key)
    }

    /// Sets `key` to `value`.
    pub fn put(&mut self, key: K, value: V) {
        self.top_mut().insert(key, value);
    }

    /// Removes `key`.
    pub fn delete(&mut self, key: &K) {
        self.top_mut().remove(key);
    }

    /// Opens a transaction by copying the current view.
    pub fn begin(&mut self) {
        let copy = self.top().clone();
        self.snapshots.push(copy);
    }

    /// Replaces the parent view with the current one.
    ///
    /// Returns false at depth 0.
    pub fn commit(&mut self) -> bool {
        if self.depth() == 0 {
            return false;
        }
        let top = self.snapshots.pop().unwrap_or_default();
        *self.top_mut() = top;
        true
    }

    /// Drops the current view.
    ///
    /// Returns false at depth 0.
    pub fn rollback(&mut self) -> bool {
        if self.depth() == 0 {
            return false;
        }
        self.snapshots.pop();
        true
    }

    /// Returns the full visible key space.
    pub fn visible(&self) -> &HashMap<K, V> {
        self.top()
    }

    fn top(&self) -> &HashMap<K, V> {
        &self.snapshots[self.snapshots.len() - 1]
    }

    fn top_mut(&mut self) -> &mut HashMap<K, V> {
        let top = self.snapshots.len() - 1;
        &mut self.snapshots[top]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_begin_copies_view() {
        let mut model = ModelStack::new();
        model.put("A", 1);
        model.begin();
        assert_eq!(model.get("A"), Some(&1));
        assert_eq!(model.depth(), 1);
    }

    #[test]
    fn model_commit_replaces_parent() {
        let mut model = ModelStack::new();
        model.put("A", 1);
        model.begin();
        model.delete(&"A");
        model.put("B", 2);
        assert!(model.commit());

        assert_eq!(model.get("A"), None);
        assert_eq!(model.get("B"), Some(&2));
        assert!(!model.commit());
    }

    #[test]
    fn model_rollback_restores_parent() {
        let mut model = ModelStack::new();
        model.put("A", 1);
        model.begin();
        model.put("A", 2);
        assert!(model.rollback());

        assert_eq!(model.get("A"), Some(&1));
        assert!(!model.rollback());
        assert_eq!(model.visible().len(), 1);
    }
}
