//! Key/value workloads that drive the insert loop.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// How keys are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPattern {
    /// `0, 1, 2, ...`: append-like, the case the sentinel map is built for.
    Sequential,
    /// `0, step, 2 * step, ...`: monotonic with holes.
    Strided(usize),
    /// Uniform in `0..key_space`, repeats allowed.
    Random,
}

/// Configuration for a benchmark run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of inserts in the workload
    pub key_count: usize,
    /// Upper bound (exclusive) for random keys
    pub key_space: usize,
    /// Key generation pattern
    pub pattern: KeyPattern,
    /// RNG seed; identical configs produce identical workloads
    pub seed: u64,
    /// Slots preallocated by maps that support it
    pub initial_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_count: 100_000,
            key_space: 1 << 20,
            pattern: KeyPattern::Random,
            seed: 1,
            initial_capacity: 0,
        }
    }
}

/// A generated sequence of `(key, value)` inserts.
///
/// Values are drawn from `0..u32::MAX`, so `u32::MAX` never appears and the
/// workload is safe for maps using it as their sentinel.
#[derive(Debug, Clone)]
pub struct Workload {
    entries: Vec<(usize, u32)>,
}

impl Workload {
    /// Generate the workload described by `config`.
    ///
    /// # Panics
    ///
    /// If a `Strided` key overflows `usize`.
    pub fn generate(config: &Config) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let key_space = config.key_space.max(1);

        let entries = (0..config.key_count)
            .map(|i| {
                let key = match config.pattern {
                    KeyPattern::Sequential => i,
                    KeyPattern::Strided(step) => i.checked_mul(step).unwrap_or_else(|| {
                        panic!("strided key {i} * {step} overflows usize")
                    }),
                    KeyPattern::Random => rng.gen_range(0..key_space),
                };
                (key, rng.gen_range(0..u32::MAX))
            })
            .collect();

        Self { entries }
    }

    /// Wrap explicit entries.
    ///
    /// # Panics
    ///
    /// If any value is `u32::MAX`.
    pub fn from_entries(entries: Vec<(usize, u32)>) -> Self {
        assert!(
            entries.iter().all(|&(_, value)| value != u32::MAX),
            "workload values must not be u32::MAX"
        );
        Self { entries }
    }

    /// The inserts, in order.
    pub fn entries(&self) -> &[(usize, u32)] {
        &self.entries
    }

    /// Number of inserts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no inserts.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest key in the workload, which bounds dense map capacity.
    pub fn max_key(&self) -> Option<usize> {
        self.entries.iter().map(|&(key, _)| key).max()
    }
}
