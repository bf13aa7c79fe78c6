//! # sentinel-harness
//!
//! Drives insert-heavy workloads through several integer-keyed maps and
//! reports latency and memory, to compare the sentinel layout against the
//! alternatives it is meant to beat.
//!
//! ## Contenders
//!
//! - `SentinelMap<u32, Max>`: sentinel folded into a constant (`u32::MAX`)
//! - `SentinelMap<u32, Stored<u32>>`: sentinel read from a field
//! - [`OptionVecMap`]: same dense layout, `Option<u32>` per slot
//! - `HashMap<usize, u32>` and `BTreeMap<usize, u32>`
//!
//! ## Example
//!
//! ```rust
//! use sentinel_harness::{run, Config, KeyPattern, Workload};
//! use sentinel_map::U32Map;
//!
//! let workload = Workload::generate(&Config {
//!     key_count: 1_000,
//!     pattern: KeyPattern::Sequential,
//!     ..Config::default()
//! });
//!
//! let mut map = U32Map::fixed();
//! let stats = run(&mut map, &workload);
//! assert_eq!(stats.inserted, 1_000);
//! assert_eq!(stats.overwritten, 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod baseline;
pub mod shared;
pub mod workload;

pub use baseline::OptionVecMap;
pub use shared::{ShardedMap, SharedMap};
pub use workload::{Config, KeyPattern, Workload};

use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

use log::{debug, info};
use sentinel_map::{Max, SentinelMap, Stored};

/// A map the harness can drive. Values are `u32`; `u32::MAX` is never inserted.
pub trait InsertMap {
    /// Label used in reports.
    fn name(&self) -> &'static str;

    /// Insert, returning the previous value.
    fn insert(&mut self, key: usize, value: u32) -> Option<u32>;

    /// Look up a key.
    fn get(&self, key: usize) -> Option<u32>;

    /// Approximate heap bytes held by the map.
    fn memory_usage(&self) -> usize;
}

impl InsertMap for SentinelMap<u32, Max> {
    fn name(&self) -> &'static str {
        "sentinel-max"
    }

    #[inline]
    fn insert(&mut self, key: usize, value: u32) -> Option<u32> {
        SentinelMap::insert(self, key, value)
    }

    #[inline]
    fn get(&self, key: usize) -> Option<u32> {
        SentinelMap::get(self, key).copied()
    }

    fn memory_usage(&self) -> usize {
        SentinelMap::memory_usage(self)
    }
}

impl InsertMap for SentinelMap<u32, Stored<u32>> {
    fn name(&self) -> &'static str {
        "sentinel-stored"
    }

    #[inline]
    fn insert(&mut self, key: usize, value: u32) -> Option<u32> {
        SentinelMap::insert(self, key, value)
    }

    #[inline]
    fn get(&self, key: usize) -> Option<u32> {
        SentinelMap::get(self, key).copied()
    }

    fn memory_usage(&self) -> usize {
        SentinelMap::memory_usage(self)
    }
}

impl InsertMap for OptionVecMap<u32> {
    fn name(&self) -> &'static str {
        "option-vec"
    }

    #[inline]
    fn insert(&mut self, key: usize, value: u32) -> Option<u32> {
        OptionVecMap::insert(self, key, value)
    }

    #[inline]
    fn get(&self, key: usize) -> Option<u32> {
        OptionVecMap::get(self, key).copied()
    }

    fn memory_usage(&self) -> usize {
        OptionVecMap::memory_usage(self)
    }
}

impl InsertMap for HashMap<usize, u32> {
    fn name(&self) -> &'static str {
        "hashmap"
    }

    #[inline]
    fn insert(&mut self, key: usize, value: u32) -> Option<u32> {
        HashMap::insert(self, key, value)
    }

    #[inline]
    fn get(&self, key: usize) -> Option<u32> {
        HashMap::get(self, &key).copied()
    }

    fn memory_usage(&self) -> usize {
        // One control byte per bucket on top of the entry.
        self.capacity() * (std::mem::size_of::<(usize, u32)>() + 1)
    }
}

impl InsertMap for BTreeMap<usize, u32> {
    fn name(&self) -> &'static str {
        "btreemap"
    }

    #[inline]
    fn insert(&mut self, key: usize, value: u32) -> Option<u32> {
        BTreeMap::insert(self, key, value)
    }

    #[inline]
    fn get(&self, key: usize) -> Option<u32> {
        BTreeMap::get(self, &key).copied()
    }

    fn memory_usage(&self) -> usize {
        // Approximate node overhead per entry
        self.len() * (std::mem::size_of::<(usize, u32)>() + 16)
    }
}

/// Memory usage of a map after a run.
#[derive(Debug, Clone, Default)]
pub struct MemoryStats {
    /// Heap bytes held by the map
    pub heap_bytes: usize,
    /// Number of distinct keys present
    pub num_keys: usize,
    /// Bytes per present key (calculated)
    pub bytes_per_key: f64,
}

impl MemoryStats {
    fn new(heap_bytes: usize, num_keys: usize) -> Self {
        Self {
            heap_bytes,
            num_keys,
            bytes_per_key: if num_keys > 0 {
                heap_bytes as f64 / num_keys as f64
            } else {
                0.0
            },
        }
    }
}

/// Result of driving one workload through one map.
#[derive(Debug, Clone)]
pub struct RunStats {
    /// Map label
    pub name: &'static str,
    /// Inserts into a previously empty slot
    pub inserted: usize,
    /// Inserts that replaced a value
    pub overwritten: usize,
    /// Wall time of the insert loop
    pub elapsed: Duration,
    /// Memory after the loop
    pub memory: MemoryStats,
}

impl RunStats {
    /// Mean latency of a single insert.
    pub fn ns_per_insert(&self) -> f64 {
        let ops = self.inserted + self.overwritten;
        if ops == 0 {
            return 0.0;
        }
        self.elapsed.as_nanos() as f64 / ops as f64
    }
}

/// Insert every entry of `workload` into `map`, timing the loop.
pub fn run<M: InsertMap + ?Sized>(map: &mut M, workload: &Workload) -> RunStats {
    let mut inserted = 0;
    let mut overwritten = 0;

    let start = Instant::now();
    for &(key, value) in workload.entries() {
        match map.insert(key, value) {
            None => inserted += 1,
            Some(_) => overwritten += 1,
        }
    }
    let elapsed = start.elapsed();

    let stats = RunStats {
        name: map.name(),
        inserted,
        overwritten,
        elapsed,
        memory: MemoryStats::new(map.memory_usage(), inserted),
    };
    debug!(
        "{}: {} inserts, {} overwrites in {:?}",
        stats.name, stats.inserted, stats.overwritten, stats.elapsed
    );
    stats
}

/// Build one fresh instance of every contender for `config`.
pub fn contenders(config: &Config) -> Vec<Box<dyn InsertMap>> {
    let capacity = config.initial_capacity;
    let mut maps: Vec<Box<dyn InsertMap>> = Vec::with_capacity(5);
    maps.push(Box::new(SentinelMap::<u32, Max>::fixed_with_capacity(capacity)));
    maps.push(Box::new(SentinelMap::with_capacity(u32::MAX, capacity)));
    maps.push(Box::new(OptionVecMap::<u32>::with_capacity(capacity)));
    maps.push(Box::new(HashMap::<usize, u32>::with_capacity(capacity)));
    maps.push(Box::new(BTreeMap::<usize, u32>::new()));
    maps
}

/// Run the workload described by `config` through every contender.
pub fn compare(config: &Config) -> Vec<RunStats> {
    let workload = Workload::generate(config);
    info!(
        "workload: {} inserts, {:?} keys, max key {:?}",
        workload.len(),
        config.pattern,
        workload.max_key()
    );

    contenders(config)
        .iter_mut()
        .map(|map| run(map.as_mut(), &workload))
        .collect()
}
