//! Tagged-optional dense map as a baseline.
//!
//! Same layout and growth policy as `SentinelMap`, but every slot is an
//! `Option<V>`. For `u32` that doubles the slot size and adds a discriminant
//! check to each probe, which is exactly the overhead the sentinel removes.

/// Storage is multiplied by this factor until the new key fits.
const GROWTH_FACTOR: usize = 4;

/// A dense map storing `Option<V>` per slot.
#[derive(Debug, Clone)]
pub struct OptionVecMap<V> {
    slots: Vec<Option<V>>,
}

impl<V> OptionVecMap<V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Create a map with `capacity` empty slots.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots }
    }

    /// Insert a value, returning the previous one.
    ///
    /// # Panics
    ///
    /// If the length needed for `key` overflows `usize`.
    pub fn insert(&mut self, key: usize, value: V) -> Option<V> {
        if key >= self.slots.len() {
            let mut len = self.slots.len().max(1);
            while len <= key {
                len = len
                    .checked_mul(GROWTH_FACTOR)
                    .unwrap_or_else(|| panic!("key {key} overflows map capacity"));
            }
            self.slots.reserve_exact(len + 1 - self.slots.len());
            self.slots.resize_with(len + 1, || None);
        }
        self.slots[key].replace(value)
    }

    /// Get a reference to the value for a key.
    pub fn get(&self, key: usize) -> Option<&V> {
        self.slots.get(key).and_then(Option::as_ref)
    }

    /// Number of addressable slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Heap bytes held by the slot storage.
    pub fn memory_usage(&self) -> usize {
        self.slots.capacity() * std::mem::size_of::<Option<V>>()
    }
}

impl<V> Default for OptionVecMap<V> {
    fn default() -> Self {
        Self::new()
    }
}
