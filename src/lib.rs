//! # sentinel-map
//!
//! A dense map from small `usize` keys to values, where an empty slot is any
//! slot holding a reserved *sentinel* value instead of `Option<V>`.
//!
//! Storage is a single `Vec<V>` sized to the largest key ever inserted, so it
//! suits keys that are small and mostly increasing (ids, offsets, counters).
//! There is no removal, no iteration and no shrinking.
//!
//! ## Example
//!
//! ```rust
//! use sentinel_map::{SentinelMap, U32Map};
//!
//! // Sentinel chosen at runtime.
//! let mut map = SentinelMap::new(-1i64);
//! assert_eq!(map.insert(3, 30), None);
//! assert_eq!(map.insert(3, 31), Some(30));
//! assert_eq!(map.get(3), Some(&31));
//! assert_eq!(map.get(2), None);
//!
//! // `u32::MAX` as a compile-time sentinel.
//! let mut ids = U32Map::fixed();
//! assert_eq!(ids.insert(5, 10), None);
//! assert!(ids.capacity() >= 6);
//! ```
//!
//! ## Preconditions
//!
//! Values passed to `insert` must never equal the sentinel. Debug builds
//! assert this; release builds do not check, and such an insert leaves the
//! slot looking empty.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

mod error;
pub mod sentinel;

pub use error::{Error, Result};
pub use sentinel::{Max, Sentinel, Stored};

/// Storage is multiplied by this factor until the new key fits.
const GROWTH_FACTOR: usize = 4;

/// Map over `u32` values with `u32::MAX` as the sentinel.
pub type U32Map = SentinelMap<u32, Max>;

/// Dense `usize`-keyed map that marks empty slots with a sentinel value.
///
/// `S` supplies the sentinel: [`Stored`] keeps a caller-chosen value in the
/// map, [`Max`] uses the maximum of an unsigned primitive.
pub struct SentinelMap<V, S = Stored<V>> {
    /// `slots[k]` holds the value for key `k`, or the sentinel.
    slots: Vec<V>,
    sentinel: S,
}

impl<V: Clone + Eq> SentinelMap<V, Stored<V>> {
    /// Create an empty map. Nothing is allocated until the first insert.
    pub fn new(sentinel: V) -> Self {
        Self::with_sentinel(Stored(sentinel))
    }

    /// Create a map holding `capacity` empty slots, so keys below `capacity`
    /// never reallocate.
    pub fn with_capacity(sentinel: V, capacity: usize) -> Self {
        Self::with_sentinel_and_capacity(Stored(sentinel), capacity)
    }
}

impl<V> SentinelMap<V, Max>
where
    Max: Sentinel<V>,
{
    /// Create an empty map using the type's maximum value as the sentinel.
    pub fn fixed() -> Self {
        Self::with_sentinel(Max)
    }

    /// Like [`fixed`](Self::fixed), with `capacity` empty slots up front.
    pub fn fixed_with_capacity(capacity: usize) -> Self {
        Self::with_sentinel_and_capacity(Max, capacity)
    }
}

impl<V, S: Sentinel<V>> SentinelMap<V, S> {
    /// Create an empty map around an explicit sentinel provider.
    pub fn with_sentinel(sentinel: S) -> Self {
        Self {
            slots: Vec::new(),
            sentinel,
        }
    }

    /// Create a map with `capacity` slots, all holding the sentinel.
    pub fn with_sentinel_and_capacity(sentinel: S, capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || sentinel.empty());
        Self { slots, sentinel }
    }

    /// Number of addressable slots. Never decreases.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The sentinel provider.
    #[inline]
    pub fn sentinel(&self) -> &S {
        &self.sentinel
    }

    /// Heap bytes held by the slot storage.
    pub fn memory_usage(&self) -> usize {
        self.slots.capacity() * std::mem::size_of::<V>()
    }

    /// The value at `key`, or `None` if the slot is unaddressable or empty.
    #[inline]
    pub fn get(&self, key: usize) -> Option<&V> {
        self.slots
            .get(key)
            .filter(|value| !self.sentinel.is_empty(value))
    }

    /// Whether `key` holds a value.
    #[inline]
    pub fn contains_key(&self, key: usize) -> bool {
        self.get(key).is_some()
    }

    /// Insert `value` at `key`, returning the previous value if the slot was
    /// occupied.
    ///
    /// # Panics
    ///
    /// If the storage needed for `key` cannot be represented or allocated.
    /// In debug builds, also if `value` is the sentinel.
    #[inline]
    #[track_caller]
    pub fn insert(&mut self, key: usize, value: V) -> Option<V> {
        match self.try_insert(key, value) {
            Ok(previous) => previous,
            Err(err) => capacity_exceeded(err),
        }
    }

    /// Fallible [`insert`](Self::insert): storage exhaustion is reported as an
    /// [`Error`] and the map is left unchanged.
    #[inline]
    pub fn try_insert(&mut self, key: usize, value: V) -> Result<Option<V>> {
        debug_assert!(
            !self.sentinel.is_empty(&value),
            "inserted value at key {key} equals the sentinel"
        );

        match self.slots.get_mut(key) {
            Some(slot) => {
                let previous = std::mem::replace(slot, value);
                Ok((!self.sentinel.is_empty(&previous)).then_some(previous))
            }
            None => {
                self.grow(key)?;
                self.slots[key] = value;
                Ok(None)
            }
        }
    }

    /// Extend storage so that `key` is addressable. New slots hold the sentinel.
    #[cold]
    #[inline(never)]
    fn grow(&mut self, key: usize) -> Result<()> {
        let old_len = self.slots.len();
        let new_len = grown_len(old_len, key).ok_or(Error::CapacityOverflow { key })?;
        self.slots.try_reserve_exact(new_len - old_len)?;
        let sentinel = &self.sentinel;
        self.slots.resize_with(new_len, || sentinel.empty());
        log::trace!("grew sentinel map from {old_len} to {new_len} slots for key {key}");
        Ok(())
    }
}

/// Length after growing from `len` to cover `key`: start at `max(len, 1)`,
/// multiply by [`GROWTH_FACTOR`] until past `key`, then add one.
#[inline]
fn grown_len(len: usize, key: usize) -> Option<usize> {
    let mut len = len.max(1);
    while len <= key {
        len = len.checked_mul(GROWTH_FACTOR)?;
    }
    len.checked_add(1)
}

#[cold]
#[inline(never)]
#[track_caller]
fn capacity_exceeded(err: Error) -> ! {
    panic!("sentinel map cannot grow: {err}")
}

impl<V, S: Sentinel<V> + Default> Default for SentinelMap<V, S> {
    fn default() -> Self {
        Self::with_sentinel(S::default())
    }
}

impl<V: Clone, S: Clone> Clone for SentinelMap<V, S> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            sentinel: self.sentinel.clone(),
        }
    }
}

impl<V: std::fmt::Debug, S: Sentinel<V>> std::fmt::Debug for SentinelMap<V, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.slots
                    .iter()
                    .enumerate()
                    .filter(|(_, value)| !self.sentinel.is_empty(value)),
            )
            .finish()
    }
}

impl<V, S: Sentinel<V>> Extend<(usize, V)> for SentinelMap<V, S> {
    #[track_caller]
    fn extend<I: IntoIterator<Item = (usize, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}


#[cfg(test)]
mod proptests;
