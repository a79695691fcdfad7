//! Generation-checked slot storage for graph entities.
//!
//! Removing an entry frees its slot for reuse and bumps the slot generation, so a handle to a
//! destroyed entity never resolves to whatever later occupies the same slot.

use std::fmt;
use std::marker::PhantomData;

use contracts::*;

/// Raw slot index plus the generation it was issued for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArenaKey {
    index: u32,
    generation: u32,
}

impl ArenaKey {
    /// Creates a key from its raw parts.
    #[ensures(ret.index == index && ret.generation == generation)]
    #[must_use]
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index as a usize for array access.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Generation the key was issued for.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

/// Typed handle into an [`Arena`].
pub trait Key: Copy {
    /// Wraps a raw key.
    fn from_key(key: ArenaKey) -> Self;
    /// Unwraps to the raw key.
    fn key(self) -> ArenaKey;
}

macro_rules! arena_handle {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(ArenaKey);

        impl Key for $name {
            #[inline]
            fn from_key(key: ArenaKey) -> Self {
                Self(key)
            }

            #[inline]
            fn key(self) -> ArenaKey {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}v{}", $prefix, self.0.index, self.0.generation)
            }
        }
    };
}

arena_handle!(
    /// Handle to a node (gate, input source or output sink) in a [`crate::Graph`].
    NodeId,
    "n"
);
arena_handle!(
    /// Handle to a wire in a [`crate::Graph`].
    WireId,
    "w"
);

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Slot storage addressed by generation-checked handles of type `K`.
#[derive(Clone, Debug)]
pub struct Arena<K, T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
    _key: PhantomData<K>,
}

impl<K: Key, T> Default for Arena<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key, T> Arena<K, T> {
    /// Creates an empty arena.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
            _key: PhantomData,
        }
    }

    /// Stores `value` and returns its handle.
    pub fn insert(&mut self, value: T) -> K {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return K::from_key(ArenaKey::new(index, slot.generation));
        }
        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        K::from_key(ArenaKey::new(index, 0))
    }

    fn slot(&self, key: K) -> Option<&Slot<T>> {
        let key = key.key();
        self.slots
            .get(key.index())
            .filter(|slot| slot.generation == key.generation())
    }

    /// Resolves a handle, or `None` if it is stale.
    #[must_use]
    pub fn get(&self, key: K) -> Option<&T> {
        self.slot(key)?.value.as_ref()
    }

    /// Mutable form of [`Arena::get`].
    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        let key = key.key();
        self.slots
            .get_mut(key.index())
            .filter(|slot| slot.generation == key.generation())?
            .value
            .as_mut()
    }

    /// Returns true if the handle still resolves.
    #[must_use]
    pub fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Removes the entry and invalidates every outstanding handle to it.
    pub fn remove(&mut self, key: K) -> Option<T> {
        let raw = key.key();
        let slot = self
            .slots
            .get_mut(raw.index())
            .filter(|slot| slot.generation == raw.generation())?;
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(raw.index);
        self.len -= 1;
        Some(value)
    }

    /// Removes every entry, invalidating all handles.
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index as u32);
        }
        self.free.reverse();
        self.len = 0;
    }

    /// Number of live entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no entries are live.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let value = slot.value.as_ref()?;
            Some((
                K::from_key(ArenaKey::new(index as u32, slot.generation)),
                value,
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removed_handle_goes_stale() {
        let mut arena: Arena<NodeId, &str> = Arena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");
        assert_eq!(arena.remove(a), Some("a"));
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.remove(a), None);
        assert_eq!(arena.get(b), Some(&"b"));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn reused_slot_gets_new_generation() {
        let mut arena: Arena<WireId, u8> = Arena::new();
        let first = arena.insert(1);
        arena.remove(first);
        let second = arena.insert(2);
        assert_eq!(first.key().index(), second.key().index());
        assert_ne!(first, second);
        assert_eq!(arena.get(first), None);
        assert_eq!(arena.get(second), Some(&2));
    }

    #[test]
    fn clear_invalidates_everything() {
        let mut arena: Arena<NodeId, u8> = Arena::new();
        let keys: Vec<_> = (0..3).map(|v| arena.insert(v)).collect();
        arena.clear();
        assert!(arena.is_empty());
        assert!(keys.iter().all(|&k| !arena.contains(k)));
        let again = arena.insert(9);
        assert_eq!(again.key().index(), 0);
        assert_eq!(arena.iter().count(), 1);
    }
}
