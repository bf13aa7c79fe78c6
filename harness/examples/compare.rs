//! Insert latency and memory for every contender across key patterns.

use log::{info, LevelFilter};
use sentinel_harness::{compare, Config, KeyPattern};
use simple_logger::SimpleLogger;

fn main() {
    SimpleLogger::new().with_level(LevelFilter::Info).init().unwrap();

    let size = 1_000_000;
    let patterns = [
        KeyPattern::Sequential,
        KeyPattern::Strided(8),
        KeyPattern::Random,
    ];

    for pattern in patterns {
        for initial_capacity in [0, size] {
            let config = Config {
                key_count: size,
                key_space: size,
                pattern,
                initial_capacity,
                ..Config::default()
            };

            info!("=== {:?}, preallocated {} ===", pattern, initial_capacity);
            for stats in compare(&config) {
                info!(
                    "{:<16} {:>7.2} ns/insert  {:>10} bytes  {:>6.1} bytes/key  ({} new, {} overwritten)",
                    stats.name,
                    stats.ns_per_insert(),
                    stats.memory.heap_bytes,
                    stats.memory.bytes_per_key,
                    stats.inserted,
                    stats.overwritten,
                );
            }
        }
    }
}
