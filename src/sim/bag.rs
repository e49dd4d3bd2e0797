//! The player's bounded piece inventory.

use crate::consts::BAG_CAPACITY;

/// Ordered, bounded collection of held piece kinds.
///
/// Duplicates of the same kind are allowed; insertion order is preserved.
/// Removal takes the leftmost entry of the requested kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bag {
    slots: Vec<&'static str>,
}

impl Bag {
    /// Create an empty bag
    pub fn new() -> Self {
        Self { slots: Vec::with_capacity(BAG_CAPACITY) }
    }

    /// Append a kind. Returns `false` (no-op) when the bag is at capacity.
    pub fn push(&mut self, kind: &'static str) -> bool {
        if self.slots.len() >= BAG_CAPACITY {
            return false;
        }
        self.slots.push(kind);
        true
    }

    /// Remove the leftmost entry of `kind`. Returns `false` when absent.
    pub fn take(&mut self, kind: &str) -> bool {
        match self.slots.iter().position(|k| *k == kind) {
            Some(i) => {
                self.slots.remove(i);
                true
            }
            None => false,
        }
    }

    /// Whether at least one entry of `kind` is held
    pub fn contains(&self, kind: &str) -> bool {
        self.slots.iter().any(|k| *k == kind)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= BAG_CAPACITY
    }

    /// Held kind ids in insertion order
    pub fn kinds(&self) -> &[&'static str] {
        &self.slots
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
