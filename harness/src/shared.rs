//! External synchronization for sentinel maps.
//!
//! `SentinelMap` has none of its own. [`SharedMap`] puts one map behind a
//! reader-writer lock; [`ShardedMap`] partitions the key space over several
//! independently locked maps so writers to different shards do not contend.

use parking_lot::RwLock;
use sentinel_map::{Max, Sentinel, SentinelMap};

/// A sentinel map guarded by a single `RwLock`.
pub struct SharedMap<V, S = Max> {
    inner: RwLock<SentinelMap<V, S>>,
}

impl<V, S: Sentinel<V>> SharedMap<V, S> {
    /// Wrap an existing map.
    pub fn new(map: SentinelMap<V, S>) -> Self {
        Self {
            inner: RwLock::new(map),
        }
    }

    /// Insert under the write lock.
    pub fn insert(&self, key: usize, value: V) -> Option<V> {
        self.inner.write().insert(key, value)
    }

    /// Read a copy of the value under the read lock.
    pub fn get(&self, key: usize) -> Option<V>
    where
        V: Clone,
    {
        self.inner.read().get(key).cloned()
    }

    /// Check whether `key` holds a value.
    pub fn contains_key(&self, key: usize) -> bool {
        self.inner.read().contains_key(key)
    }

    /// Number of addressable slots.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Unwrap the map.
    pub fn into_inner(self) -> SentinelMap<V, S> {
        self.inner.into_inner()
    }
}

impl<V, S: Sentinel<V> + Default> Default for SharedMap<V, S> {
    fn default() -> Self {
        Self::new(SentinelMap::default())
    }
}

/// Sentinel maps sharded by `key % shards`.
///
/// Key `k` lives at local key `k / shards` in shard `k % shards`, so a dense
/// global key range stays dense in every shard.
pub struct ShardedMap<V, S = Max> {
    shards: Box<[RwLock<SentinelMap<V, S>>]>,
}

impl<V, S: Sentinel<V>> ShardedMap<V, S> {
    /// Create `shards` empty maps, each with its own sentinel from `sentinel`.
    ///
    /// # Panics
    ///
    /// If `shards` is zero.
    pub fn new(shards: usize, mut sentinel: impl FnMut() -> S) -> Self {
        assert!(shards > 0, "sharded map needs at least one shard");
        let shards = (0..shards)
            .map(|_| RwLock::new(SentinelMap::with_sentinel(sentinel())))
            .collect();
        Self { shards }
    }

    #[inline]
    fn locate(&self, key: usize) -> (&RwLock<SentinelMap<V, S>>, usize) {
        let n = self.shards.len();
        (&self.shards[key % n], key / n)
    }

    /// Insert under the owning shard's write lock.
    pub fn insert(&self, key: usize, value: V) -> Option<V> {
        let (shard, local) = self.locate(key);
        shard.write().insert(local, value)
    }

    /// Read a copy of the value under the owning shard's read lock.
    pub fn get(&self, key: usize) -> Option<V>
    where
        V: Clone,
    {
        let (shard, local) = self.locate(key);
        shard.read().get(local).cloned()
    }

    /// Number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Heap bytes held by all shards.
    pub fn memory_usage(&self) -> usize {
        self.shards.iter().map(|s| s.read().memory_usage()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_map::{Stored, U32Map};

    #[test]
    fn test_shared_basic_operations() {
        let m: SharedMap<u32> = SharedMap::default();

        assert!(m.insert(1, 10).is_none());
        assert!(m.insert(2, 20).is_none());
        assert_eq!(m.insert(1, 11), Some(10));

        assert_eq!(m.get(1), Some(11));
        assert_eq!(m.get(2), Some(20));
        assert_eq!(m.get(3), None);
        assert!(m.contains_key(2));
        assert!(!m.contains_key(0));
    }

    #[test]
    fn test_shared_concurrent_writers() {
        let m = SharedMap::new(U32Map::fixed());
        let threads = 4;
        let per_thread = 10_000;

        std::thread::scope(|s| {
            for t in 0..threads {
                let m = &m;
                s.spawn(move || {
                    for i in 0..per_thread {
                        let key = i * threads + t;
                        assert_eq!(m.insert(key, key as u32), None);
                    }
                });
            }
        });

        let map = m.into_inner();
        for key in 0..threads * per_thread {
            assert_eq!(map.get(key), Some(&(key as u32)), "Failed at {}", key);
        }
    }

    #[test]
    fn test_sharded_layout() {
        let m: ShardedMap<u64, Stored<u64>> = ShardedMap::new(4, || Stored(0));
        assert_eq!(m.shard_count(), 4);

        for key in 0..100 {
            assert_eq!(m.insert(key, key as u64 + 1), None);
        }
        for key in 0..100 {
            assert_eq!(m.get(key), Some(key as u64 + 1));
        }
        assert_eq!(m.insert(42, 7), Some(43));
        assert_eq!(m.get(100), None);

        // Each shard covers 25 local keys, not 100.
        for shard in m.shards.iter() {
            assert!(shard.read().capacity() < 100);
        }
    }

    #[test]
    fn test_sharded_concurrent_writers() {
        let m: ShardedMap<u32> = ShardedMap::new(8, || Max);

        std::thread::scope(|s| {
            for t in 0..8usize {
                let m = &m;
                s.spawn(move || {
                    for i in 0..5_000usize {
                        m.insert(i * 8 + t, t as u32);
                    }
                });
            }
        });

        for key in 0..40_000usize {
            assert_eq!(m.get(key), Some((key % 8) as u32));
        }
        assert!(m.memory_usage() > 0);
    }

    #[test]
    #[should_panic(expected = "at least one shard")]
    fn test_sharded_rejects_zero() {
        let _: ShardedMap<u32> = ShardedMap::new(0, || Max);
    }
}
