//! Copy-on-write overlay layers.
//!
//! A [`Layer`] records the edits and deletions made at one transaction depth.
//! Reads that miss a layer fall through to its parent, unless the layer holds
//! a tombstone for the key. Parents are referenced by [`LayerIndex`] into the
//! arena owned by the [`TransactionStack`](crate::TransactionStack), so a
//! layer never borrows or owns its ancestors.

use crate::store::Store;
use crate::types::LayerIndex;
use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Outcome of looking a key up in a single layer, without consulting ancestors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe<'a, V> {
    /// The layer holds an edit for the key.
    Edited(&'a V),
    /// The layer hides the key from its ancestors.
    Tombstoned,
    /// The layer says nothing about the key; the parent decides.
    Inherited(LayerIndex),
    /// Root layer with no entry for the key.
    Absent,
}

/// One overlay of key-value edits plus deletion markers.
///
/// # Invariants
///
/// - A key is never both in `edits` and in `tombstones`
/// - A root layer (no parent) never records tombstones
#[derive(Debug, Clone)]
pub struct Layer<K, V> {
    /// Index of the layer reads fall through to. `None` for the root.
    parent: Option<LayerIndex>,
    /// Values written in this layer.
    edits: HashMap<K, V>,
    /// Keys deleted in this layer, shadowing the parent chain.
    tombstones: HashSet<K>,
}

impl<K, V> Layer<K, V> {
    /// Returns the parent index, or `None` for the root layer.
    #[must_use]
    pub fn parent(&self) -> Option<LayerIndex> {
        self.parent
    }

    /// Checks if this is the root layer.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns the number of keys edited in this layer.
    #[must_use]
    pub fn edit_count(&self) -> usize {
        self.edits.len()
    }

    /// Returns the number of keys tombstoned in this layer.
    #[must_use]
    pub fn tombstone_count(&self) -> usize {
        self.tombstones.len()
    }

    /// Checks if the layer holds no edits and no tombstones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty() && self.tombstones.is_empty()
    }

    /// Clears all edits and tombstones, returning the layer to its
    /// just-created state. The parent link is kept.
    pub fn reset(&mut self) {
        self.edits.clear();
        self.tombstones.clear();
    }
}

impl<K: Eq + Hash, V> Layer<K, V> {
    /// Creates a root layer.
    pub(crate) fn root(capacity: usize) -> Self {
        Self::with_parent(None, capacity)
    }

    /// Creates a layer that falls through to `parent`.
    pub(crate) fn child_of(parent: LayerIndex, capacity: usize) -> Self {
        Self::with_parent(Some(parent), capacity)
    }

    fn with_parent(parent: Option<LayerIndex>, capacity: usize) -> Self {
        Self {
            parent,
            edits: HashMap::with_capacity(capacity),
            tombstones: HashSet::new(),
        }
    }

    /// Re-links an emptied layer to a new parent so its allocations can be reused.
    pub(crate) fn reparent(&mut self, parent: LayerIndex) {
        debug_assert!(self.is_empty(), "only empty layers may be reparented");
        self.parent = Some(parent);
    }

    /// Looks `key` up in this layer only.
    pub fn probe<Q>(&self, key: &Q) -> Probe<'_, V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some(value) = self.edits.get(key) {
            return Probe::Edited(value);
        }
        match self.parent {
            Some(_) if self.tombstones.contains(key) => Probe::Tombstoned,
            Some(parent) => Probe::Inherited(parent),
            None => Probe::Absent,
        }
    }

    /// Checks if `key` is tombstoned in this layer.
    #[must_use]
    pub fn is_tombstoned<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.tombstones.contains(key)
    }

    /// Returns the value visible for `key` through this layer.
    ///
    /// Walks the parent chain inside `arena` until an edit is found, a
    /// tombstone blocks the key, or the root has no entry. `arena` must
    /// contain this layer's ancestors at their indices.
    pub(crate) fn get<'a, Q>(&'a self, key: &Q, arena: &'a [Layer<K, V>]) -> Option<&'a V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut layer = self;
        loop {
            match layer.probe(key) {
                Probe::Edited(value) => return Some(value),
                Probe::Inherited(parent) => layer = arena.get(parent.as_usize())?,
                Probe::Tombstoned | Probe::Absent => return None,
            }
        }
    }

    /// Checks if `key` is visible through this layer.
    pub(crate) fn contains<Q>(&self, key: &Q, arena: &[Layer<K, V>]) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key, arena).is_some()
    }

    /// Writes `key` in this layer, lifting any tombstone for it.
    pub fn put(&mut self, key: K, value: V) {
        if self.parent.is_some() {
            self.tombstones.remove(&key);
        }
        self.edits.insert(key, value);
    }

    /// Deletes `key` in this layer.
    ///
    /// Below the root a tombstone is recorded so ancestor values stay hidden.
    /// At the root there is nothing to shadow and the edit is simply removed.
    pub fn delete(&mut self, key: K) {
        self.edits.remove(&key);
        if self.parent.is_some() {
            self.tombstones.insert(key);
        }
    }

    /// Replays this layer's changes onto `target` as ordinary deletes and
    /// puts, draining this layer.
    ///
    /// Tombstones are applied before edits so a key deleted and then
    /// re-created in this layer ends up present in `target`.
    pub(crate) fn fold_into(&mut self, target: &mut Layer<K, V>) -> (usize, usize) {
        let deleted = self.tombstones.len();
        let written = self.edits.len();

        for key in self.tombstones.drain() {
            target.delete(key);
        }
        for (key, value) in self.edits.drain() {
            target.put(key, value);
        }

        (deleted, written)
    }
}

/// A mutable handle on one layer plus read access to its ancestors.
///
/// Lets a single layer be used through the [`Store`] interface.
#[derive(Debug)]
pub struct LayerView<'a, K, V> {
    layer: &'a mut Layer<K, V>,
    ancestors: &'a [Layer<K, V>],
}

impl<'a, K: Eq + Hash, V> LayerView<'a, K, V> {
    /// `ancestors` must hold every layer below `layer` at its index.
    pub(crate) fn new(layer: &'a mut Layer<K, V>, ancestors: &'a [Layer<K, V>]) -> Self {
        Self { layer, ancestors }
    }

    /// Returns the underlying layer.
    #[must_use]
    pub fn layer(&self) -> &Layer<K, V> {
        &*self.layer
    }

    /// Checks if `key` is visible through this layer.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.layer.contains(key, self.ancestors)
    }
}

impl<K: Eq + Hash, V> Store<K, V> for LayerView<'_, K, V> {
    fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.layer.get(key, self.ancestors)
    }

    fn put(&mut self, key: K, value: V) {
        self.layer.put(key, value);
    }

    fn delete(&mut self, key: K) {
        self.layer.delete(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_with(pairs: &[(&str, i32)]) -> Layer<String, i32> {
        let mut root = Layer::root(0);
        for (key, value) in pairs {
            root.put((*key).to_string(), *value);
        }
        root
    }

    #[test]
    fn root_get_missing_is_absent() {
        let root: Layer<String, i32> = Layer::root(0);
        assert_eq!(root.get("A", &[]), None);
        assert_eq!(root.probe("A"), Probe::Absent);
    }

    #[test]
    fn root_delete_records_no_tombstone() {
        let mut root = root_with(&[("A", 1)]);
        root.delete("A".to_string());
        root.delete("B".to_string());

        assert_eq!(root.get("A", &[]), None);
        assert_eq!(root.tombstone_count(), 0);
        assert!(root.is_empty());
    }

    #[test]
    fn child_falls_through_to_parent() {
        let arena = vec![root_with(&[("A", 1)])];
        let child: Layer<String, i32> = Layer::child_of(LayerIndex::ROOT, 0);

        assert_eq!(child.probe("A"), Probe::Inherited(LayerIndex::ROOT));
        assert_eq!(child.get("A", &arena), Some(&1));
        assert!(child.contains("A", &arena));
        assert!(!child.contains("B", &arena));
    }

    #[test]
    fn tombstone_shadows_parent_without_touching_it() {
        let arena = vec![root_with(&[("A", 1)])];
        let mut child = Layer::child_of(LayerIndex::ROOT, 0);
        child.delete("A".to_string());

        assert_eq!(child.probe("A"), Probe::Tombstoned);
        assert_eq!(child.get("A", &arena), None);
        assert_eq!(arena[0].get("A", &[]), Some(&1));
    }

    #[test]
    fn put_lifts_tombstone() {
        let arena = vec![root_with(&[("A", 1)])];
        let mut child = Layer::child_of(LayerIndex::ROOT, 0);
        child.delete("A".to_string());
        child.put("A".to_string(), 7);

        assert!(!child.is_tombstoned("A"));
        assert_eq!(child.tombstone_count(), 0);
        assert_eq!(child.get("A", &arena), Some(&7));
    }

    #[test]
    fn delete_removes_own_edit_and_tombstones() {
        let mut child: Layer<String, i32> = Layer::child_of(LayerIndex::ROOT, 0);
        child.put("A".to_string(), 1);
        child.delete("A".to_string());

        assert_eq!(child.edit_count(), 0);
        assert!(child.is_tombstoned("A"));
    }

    #[test]
    fn lookup_walks_multiple_ancestors() {
        let mut middle = Layer::child_of(LayerIndex::ROOT, 0);
        middle.put("B".to_string(), 2);
        let arena = vec![root_with(&[("A", 1)]), middle];
        let top: Layer<String, i32> = Layer::child_of(LayerIndex::new(1), 0);

        assert_eq!(top.get("A", &arena), Some(&1));
        assert_eq!(top.get("B", &arena), Some(&2));
        assert_eq!(top.get("C", &arena), None);
    }

    #[test]
    fn tombstone_in_middle_blocks_root() {
        let mut middle = Layer::child_of(LayerIndex::ROOT, 0);
        middle.delete("A".to_string());
        let arena = vec![root_with(&[("A", 1)]), middle];
        let top: Layer<String, i32> = Layer::child_of(LayerIndex::new(1), 0);

        assert_eq!(top.get("A", &arena), None);
    }

    #[test]
    fn reset_empties_both_collections() {
        let mut child = Layer::child_of(LayerIndex::ROOT, 0);
        child.put("A".to_string(), 1);
        child.delete("B".to_string());
        assert!(!child.is_empty());

        child.reset();

        assert!(child.is_empty());
        assert_eq!(child.edit_count(), 0);
        assert_eq!(child.tombstone_count(), 0);
        assert_eq!(child.parent(), Some(LayerIndex::ROOT));
    }

    #[test]
    fn fold_applies_tombstones_before_edits() {
        let mut target = root_with(&[("A", 1), ("B", 2)]);
        let mut source = Layer::child_of(LayerIndex::ROOT, 0);
        source.delete("A".to_string());
        source.put("C".to_string(), 3);
        source.delete("B".to_string());
        source.put("B".to_string(), 20);

        let (deleted, written) = source.fold_into(&mut target);

        assert_eq!((deleted, written), (1, 2));
        assert!(source.is_empty());
        assert_eq!(target.get("A", &[]), None);
        assert_eq!(target.get("B", &[]), Some(&20));
        assert_eq!(target.get("C", &[]), Some(&3));
        assert_eq!(target.tombstone_count(), 0);
    }

    #[test]
    fn fold_into_non_root_keeps_tombstones() {
        let mut target: Layer<String, i32> = Layer::child_of(LayerIndex::ROOT, 0);
        let mut source = Layer::child_of(LayerIndex::new(1), 0);
        source.delete("A".to_string());

        source.fold_into(&mut target);

        assert!(target.is_tombstoned("A"));
    }

    #[test]
    fn view_implements_store() {
        let mut chain = vec![root_with(&[("A", 1)]), Layer::child_of(LayerIndex::ROOT, 0)];
        let (ancestors, top) = chain.split_at_mut(1);
        let mut view = LayerView::new(&mut top[0], ancestors);

        assert_eq!(view.get("A"), Some(&1));
        view.put("B".to_string(), 2);
        view.delete("A".to_string());

        assert_eq!(view.get("A"), None);
        assert_eq!(view.get("B"), Some(&2));
        assert!(view.contains("B"));
        assert_eq!(view.layer().edit_count(), 1);
        drop(view);

        assert_eq!(chain[0].get("A", &[]), Some(&1));
    }
}
