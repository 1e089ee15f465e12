//! Replaceable references.
//!
//! Holders that must all follow an object when it is swapped for another store a
//! [`SlotKey`] instead of the object. Redirecting the slot retargets every holder at once.
//! Owning references are plain [`Arc`]s; observers use [`std::sync::Weak`] or borrows.

use std::collections::BTreeMap;
use std::sync::Arc;

/// Key of one logical slot inside a [`RedirectGroup`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey(u64);

/// Slot table mapping logical references to their current target.
#[derive(Debug)]
pub struct RedirectGroup<T> {
    slots: BTreeMap<SlotKey, Arc<T>>,
    next: u64,
}

impl<T> Default for RedirectGroup<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RedirectGroup<T> {
    /// Create an empty group.
    pub fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
            next: 1,
        }
    }

    /// Allocate a slot pointing at `target`.
    pub fn insert(&mut self, target: Arc<T>) -> SlotKey {
        let key = SlotKey(self.next);
        self.next += 1;
        self.slots.insert(key, target);
        key
    }

    /// Current target of `key`.
    pub fn get(&self, key: SlotKey) -> Option<Arc<T>> {
        self.slots.get(&key).cloned()
    }

    /// Point `key` at `target`, returning the previous target.
    ///
    /// Unknown keys are left alone and `None` is returned.
    pub fn redirect(&mut self, key: SlotKey, target: Arc<T>) -> Option<Arc<T>> {
        let slot = self.slots.get_mut(&key)?;
        Some(std::mem::replace(slot, target))
    }

    /// Retarget every slot currently pointing at `old` (by identity) to `new`.
    ///
    /// Returns the number of slots rewritten.
    pub fn redirect_all(&mut self, old: &Arc<T>, new: &Arc<T>) -> usize {
        let mut n = 0;
        for slot in self.slots.values_mut() {
            if Arc::ptr_eq(slot, old) {
                *slot = Arc::clone(new);
                n += 1;
            }
        }
        n
    }

    /// Release a slot.
    pub fn remove(&mut self, key: SlotKey) -> Option<Arc<T>> {
        self.slots.remove(&key)
    }

    /// Number of live slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Return `true` when no slot is live.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/redirect.rs"]
mod tests;
