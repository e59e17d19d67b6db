//! Keyed entity storage with deterministic iteration order.

use std::collections::BTreeMap;

/// Identifier types that an [`Arena`] can mint and index by.
pub(crate) trait ArenaKey: Copy + Ord {
    /// Wraps a raw counter value in the identifier type.
    fn from_raw(value: u32) -> Self;
}

/// Ordered entity store that allocates identifiers monotonically.
///
/// Identifiers are never reused within a session, so a stale identifier held
/// by an in-flight projectile or a queued command simply fails its lookup.
#[derive(Clone, Debug)]
pub(crate) struct Arena<K, V> {
    entries: BTreeMap<K, V>,
    next: u32,
}

impl<K: ArenaKey, V> Arena<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next: 0,
        }
    }

    /// Stores a value and returns the identifier minted for it.
    pub(crate) fn insert(&mut self, value: V) -> K {
        let key = K::from_raw(self.next);
        self.next = self.next.wrapping_add(1);
        let _ = self.entries.insert(key, value);
        key
    }

    pub(crate) fn get(&self, key: K) -> Option<&V> {
        self.entries.get(&key)
    }

    pub(crate) fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.entries.get_mut(&key)
    }

    pub(crate) fn remove(&mut self, key: K) -> Option<V> {
        self.entries.remove(&key)
    }

    pub(crate) fn contains(&self, key: K) -> bool {
        self.entries.contains_key(&key)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (K, &mut V)> {
        self.entries.iter_mut().map(|(key, value)| (*key, value))
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.keys().copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
