//! Row selection tracked by key, independent of which rows are materialized.
//!
//! The selected set is shared copy-on-write: a [`SelectionSnapshot`] taken
//! before a mutation keeps seeing the old membership.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use log::debug;

/// Tri-state summary of a selection against the current set of ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregateState {
    /// No current id is selected.
    #[default]
    None,
    /// Some, but not all, current ids are selected.
    Some,
    /// Every current id is selected and there is at least one.
    All,
}

impl AggregateState {
    /// State for `selected` of `total` current ids being selected.
    pub fn from_counts(selected: usize, total: usize) -> Self {
        match selected {
            0 => AggregateState::None,
            s if s >= total => AggregateState::All,
            _ => AggregateState::Some,
        }
    }
}

/// Keys whose membership changed in one mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionDelta<K> {
    pub added: Vec<K>,
    pub removed: Vec<K>,
}

impl<K> Default for SelectionDelta<K> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl<K: Eq> SelectionDelta<K> {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Number of keys that changed.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len()
    }

    /// Whether `key` changed in this delta.
    pub fn contains(&self, key: &K) -> bool {
        self.added.contains(key) || self.removed.contains(key)
    }

    /// Iterate changed keys with their new membership.
    pub fn changes(&self) -> impl Iterator<Item = (&K, bool)> {
        self.added
            .iter()
            .map(|k| (k, true))
            .chain(self.removed.iter().map(|k| (k, false)))
    }
}

/// Read-only view of the selection at one point in time.
#[derive(Debug, Clone)]
pub struct SelectionSnapshot<K> {
    selected: Arc<HashSet<K>>,
}

impl<K: Eq + Hash> SelectionSnapshot<K> {
    pub fn is_selected(&self, key: &K) -> bool {
        self.selected.contains(key)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// The single writer for the selected key set.
#[derive(Debug, Clone)]
pub struct SelectionModel<K> {
    selected: Arc<HashSet<K>>,
}

impl<K> Default for SelectionModel<K> {
    fn default() -> Self {
        Self {
            selected: Arc::new(HashSet::new()),
        }
    }
}

impl<K: Eq + Hash> SelectionModel<K> {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selection with initial members.
    pub fn with_selected(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            selected: Arc::new(keys.into_iter().collect()),
        }
    }

    pub fn is_selected(&self, key: &K) -> bool {
        self.selected.contains(key)
    }

    /// Number of selected keys, including stale ones.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Iterate selected keys in no particular order.
    pub fn selected(&self) -> impl Iterator<Item = &K> {
        self.selected.iter()
    }

    /// An immutable view that later mutations do not affect.
    pub fn snapshot(&self) -> SelectionSnapshot<K> {
        SelectionSnapshot {
            selected: Arc::clone(&self.selected),
        }
    }
}

impl<K: Clone + Eq + Hash> SelectionModel<K> {
    fn set_mut(&mut self) -> &mut HashSet<K> {
        Arc::make_mut(&mut self.selected)
    }

    /// Flip membership of `key`.
    pub fn toggle(&mut self, key: K) -> SelectionDelta<K> {
        let mut delta = SelectionDelta::default();
        let set = self.set_mut();
        if set.remove(&key) {
            delta.removed.push(key);
        } else {
            set.insert(key.clone());
            delta.added.push(key);
        }
        delta
    }

    /// Set membership of `key` to `selected`.
    ///
    /// Setting a key to the state it already has is a no-op and returns an
    /// empty delta, so replayed events never flip a row back.
    pub fn set(&mut self, key: K, selected: bool) -> SelectionDelta<K> {
        let mut delta = SelectionDelta::default();
        if self.is_selected(&key) == selected {
            return delta;
        }
        if selected {
            self.set_mut().insert(key.clone());
            delta.added.push(key);
        } else {
            self.set_mut().remove(&key);
            delta.removed.push(key);
        }
        delta
    }

    /// Select every key in `keys`. Returns only the newly selected ones.
    pub fn select_all(&mut self, keys: impl IntoIterator<Item = K>) -> SelectionDelta<K> {
        let mut delta = SelectionDelta::default();
        for key in keys {
            if !self.selected.contains(&key) {
                self.set_mut().insert(key.clone());
                delta.added.push(key);
            }
        }
        debug!("select_all added {} keys", delta.added.len());
        delta
    }

    /// Deselect every key in `keys`. Keys outside `keys` stay selected.
    pub fn deselect_all(&mut self, keys: impl IntoIterator<Item = K>) -> SelectionDelta<K> {
        let mut delta = SelectionDelta::default();
        for key in keys {
            if self.selected.contains(&key) {
                self.set_mut().remove(&key);
                delta.removed.push(key);
            }
        }
        debug!("deselect_all removed {} keys", delta.removed.len());
        delta
    }

    /// Remove everything, stale keys included.
    pub fn clear(&mut self) -> SelectionDelta<K> {
        if self.selected.is_empty() {
            return SelectionDelta::default();
        }
        let removed: Vec<K> = self.selected.iter().cloned().collect();
        self.selected = Arc::new(HashSet::new());
        SelectionDelta {
            added: Vec::new(),
            removed,
        }
    }

    /// Summarize the selection against the current ids.
    ///
    /// Only membership of `keys` counts: selected keys that are not in `keys`
    /// (stale keys) never make the result `All`.
    pub fn aggregate_state<'a>(&self, keys: impl IntoIterator<Item = &'a K>) -> AggregateState
    where
        K: 'a,
    {
        if self.selected.is_empty() {
            return AggregateState::None;
        }

        let mut total = 0usize;
        let mut hits = 0usize;
        for key in keys {
            total += 1;
            if self.selected.contains(key) {
                hits += 1;
            }
        }

        AggregateState::from_counts(hits, total)
    }

    /// Selected keys that are not among `current`.
    pub fn stale<'a>(&self, current: impl IntoIterator<Item = &'a K>) -> Vec<K>
    where
        K: 'a,
    {
        if self.selected.is_empty() {
            return Vec::new();
        }
        let current: HashSet<&K> = current.into_iter().collect();
        self.selected
            .iter()
            .filter(|k| !current.contains(k))
            .cloned()
            .collect()
    }

    /// Drop selected keys that are not among `current`. Returns the removed keys.
    pub fn reconcile<'a>(&mut self, current: impl IntoIterator<Item = &'a K>) -> SelectionDelta<K>
    where
        K: 'a,
    {
        let stale = self.stale(current);
        if stale.is_empty() {
            return SelectionDelta::default();
        }
        let set = self.set_mut();
        for key in &stale {
            set.remove(key);
        }
        debug!("Reconciled selection, dropped {} stale keys", stale.len());
        SelectionDelta {
            added: Vec::new(),
            removed: stale,
        }
    }
}
