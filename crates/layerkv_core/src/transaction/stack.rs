//! The transaction stack.

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::layer::{Layer, LayerView};
use crate::stats::{StackStats, TxnCounters};
use crate::store::Store;
use crate::transaction::summary::{MergeSummary, RollbackSummary};
use crate::types::{LayerIndex, TxnOperation};
use std::borrow::Borrow;
use std::hash::Hash;
use tracing::{debug, trace};

/// An in-memory key-value store with nested transactions.
///
/// The stack holds one [`Layer`] per depth. Index 0 is the root layer, which
/// exists for the stack's whole lifetime. Every other layer belongs to an
/// open transaction and falls through to the layer directly below it. All
/// reads and writes go to the top layer.
///
/// ## State machine
///
/// - `begin`: depth N -> N+1, always succeeds
/// - `commit`: depth N -> N-1, folds the top layer into the new top
/// - `rollback`: depth N -> N-1, discards the top layer
///
/// `commit` and `rollback` at depth 0 fail with
/// [`CoreError::NoActiveTransaction`] and leave the stack untouched.
///
/// # Example
///
/// ```rust
/// use layerkv_core::TransactionStack;
///
/// let mut stack: TransactionStack<String, i64> = TransactionStack::new();
/// stack.put("A".to_string(), 1);
///
/// stack.begin();
/// stack.delete("A".to_string());
/// stack.begin();
/// stack.put("B".to_string(), 2);
/// stack.commit().unwrap();
/// stack.put("A".to_string(), 3);
/// assert_eq!(stack.get("A"), Some(&3));
///
/// stack.delete("A".to_string());
/// stack.commit().unwrap();
/// assert_eq!(stack.get("A"), None);
/// assert_eq!(stack.get("B"), Some(&2));
/// ```
#[derive(Debug, Clone)]
pub struct TransactionStack<K, V> {
    /// Layer arena. `layers[i]` falls through to `layers[i - 1]`.
    layers: Vec<Layer<K, V>>,
    /// Emptied layer kept from the last commit or rollback for reuse.
    spare: Option<Layer<K, V>>,
    /// Allocation hints.
    config: Config,
    /// Lifetime transaction counters.
    counters: TxnCounters,
}

impl<K: Eq + Hash, V> Default for TransactionStack<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> TransactionStack<K, V> {
    /// Creates a stack holding only an empty root layer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a stack with the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        let mut layers = Vec::with_capacity(config.depth_capacity.max(1));
        layers.push(Layer::root(config.layer_capacity));
        Self {
            layers,
            spare: None,
            config,
            counters: TxnCounters::default(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// Checks if at least one transaction is open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.layers.len() > 1
    }

    /// Returns the index of the layer that receives reads and writes.
    #[must_use]
    pub fn active_index(&self) -> LayerIndex {
        LayerIndex::new(self.depth())
    }

    /// Returns the layer that receives reads and writes.
    #[must_use]
    pub fn active_layer(&self) -> &Layer<K, V> {
        &self.layers[self.depth()]
    }

    /// Returns the layer at `index`, if it exists.
    #[must_use]
    pub fn layer(&self, index: LayerIndex) -> Option<&Layer<K, V>> {
        self.layers.get(index.as_usize())
    }

    /// Returns a [`Store`] handle on the active layer.
    ///
    /// Ancestors are read-only through the handle, so its writes are
    /// discarded by [`rollback`](Self::rollback) like any other write.
    pub fn view(&mut self) -> LayerView<'_, K, V> {
        let depth = self.depth();
        let (ancestors, active) = self.layers.split_at_mut(depth);
        LayerView::new(&mut active[0], ancestors)
    }

    /// Returns the value visible for `key` in the active layer.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.active_layer().get(key, &self.layers)
    }

    /// Checks if `key` is visible in the active layer.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.active_layer().contains(key, &self.layers)
    }

    /// Sets `key` to `value` in the active layer.
    pub fn put(&mut self, key: K, value: V) {
        let top = self.depth();
        self.layers[top].put(key, value);
    }

    /// Deletes `key` in the active layer.
    pub fn delete(&mut self, key: K) {
        let top = self.depth();
        self.layers[top].delete(key);
    }

    /// Opens a nested transaction.
    ///
    /// Returns the index of the new active layer, which equals the new depth.
    pub fn begin(&mut self) -> LayerIndex {
        let parent = self.active_index();
        let layer = match self.spare.take() {
            Some(mut layer) => {
                layer.reparent(parent);
                layer
            }
            None => Layer::child_of(parent, self.config.layer_capacity),
        };
        self.layers.push(layer);
        self.counters.record_begin();

        debug!(depth = self.depth(), "began transaction");
        self.active_index()
    }

    /// Commits the innermost transaction.
    ///
    /// The top layer is removed and its tombstones and edits are replayed as
    /// deletes and puts on the new top layer, deletes first. Afterwards every
    /// key reads exactly as it did at the top of the removed layer.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoActiveTransaction`] at depth 0. Nothing is
    /// modified in that case.
    pub fn commit(&mut self) -> CoreResult<MergeSummary> {
        let mut committed = self.pop_transaction(TxnOperation::Commit)?;
        let depth = self.depth();

        let (deleted, written) = committed.fold_into(&mut self.layers[depth]);
        self.recycle(committed);
        self.counters.record_commit();

        trace!(deleted, written, "folded committed layer into parent");
        debug!(depth, "committed transaction");
        Ok(MergeSummary {
            deleted,
            written,
            depth,
        })
    }

    /// Rolls back the innermost transaction, discarding its layer.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoActiveTransaction`] at depth 0. Nothing is
    /// modified in that case.
    pub fn rollback(&mut self) -> CoreResult<RollbackSummary> {
        let discarded_layer = self.pop_transaction(TxnOperation::Rollback)?;
        let discarded = discarded_layer.edit_count() + discarded_layer.tombstone_count();
        self.recycle(discarded_layer);
        self.counters.record_rollback();

        let depth = self.depth();
        debug!(depth, discarded, "rolled back transaction");
        Ok(RollbackSummary { discarded, depth })
    }

    /// Commits every open transaction, innermost first.
    ///
    /// Returns the number of transactions committed; 0 at depth 0.
    pub fn commit_all(&mut self) -> usize {
        let mut committed = 0;
        while self.in_transaction() {
            if self.commit().is_err() {
                break;
            }
            committed += 1;
        }
        committed
    }

    /// Rolls back every open transaction, restoring the root layer's view.
    ///
    /// Returns the number of transactions rolled back; 0 at depth 0.
    pub fn rollback_all(&mut self) -> usize {
        let mut rolled_back = 0;
        while self.in_transaction() {
            if self.rollback().is_err() {
                break;
            }
            rolled_back += 1;
        }
        rolled_back
    }

    /// Returns a snapshot of the stack's shape and counters.
    #[must_use]
    pub fn stats(&self) -> StackStats {
        let edits = self.layers.iter().map(Layer::edit_count).sum();
        let tombstones = self.layers.iter().map(Layer::tombstone_count).sum();
        StackStats::new(self.depth(), edits, tombstones, self.counters)
    }

    /// Removes the top layer if a transaction is open.
    fn pop_transaction(&mut self, operation: TxnOperation) -> CoreResult<Layer<K, V>> {
        if !self.in_transaction() {
            debug!(%operation, "rejected: no active transaction");
            return Err(CoreError::no_active_transaction(operation));
        }
        self.layers
            .pop()
            .ok_or_else(|| CoreError::no_active_transaction(operation))
    }

    /// Empties a removed layer and keeps it for the next `begin`.
    fn recycle(&mut self, mut layer: Layer<K, V>) {
        layer.reset();
        self.spare = Some(layer);
    }
}

impl<K: Eq + Hash, V> Store<K, V> for TransactionStack<K, V> {
    fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        TransactionStack::get(self, key)
    }

    fn put(&mut self, key: K, value: V) {
        TransactionStack::put(self, key, value);
    }

    fn delete(&mut self, key: K) {
        TransactionStack::delete(self, key);
    }
}
