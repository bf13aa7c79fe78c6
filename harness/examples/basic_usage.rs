//! Basic usage of the sentinel map variants.

use log::{info, LevelFilter};
use sentinel_harness::SharedMap;
use sentinel_map::{SentinelMap, U32Map};
use simple_logger::SimpleLogger;

fn main() {
    SimpleLogger::new().with_level(LevelFilter::Trace).init().unwrap();

    example_fixed();
    example_stored();
    example_shared();
}

fn example_fixed() {
    info!("=== U32Map (u32::MAX sentinel) ===");

    let mut ids = U32Map::fixed();
    info!("insert(5, 10) -> {:?}", ids.insert(5, 10));
    info!("capacity: {}", ids.capacity());
    info!("insert(5, 20) -> {:?}", ids.insert(5, 20));
    info!("insert(0, 99) -> {:?}", ids.insert(0, 99));
    info!("insert(1000000, 1) -> {:?}", ids.insert(1_000_000, 1));
    info!("capacity: {}", ids.capacity());
    info!("get(3) = {:?}, get(5) = {:?}", ids.get(3), ids.get(5));

    match ids.try_insert(usize::MAX, 1) {
        Ok(_) => info!("unexpectedly grew to usize::MAX"),
        Err(err) => info!("try_insert(usize::MAX, 1) -> {err}"),
    }
}

fn example_stored() {
    info!("=== SentinelMap with a runtime sentinel ===");

    let mut names = SentinelMap::new(String::new());
    names.insert(2, "two".to_string());
    names.insert(7, "seven".to_string());
    info!("{:?}", names);
    info!("memory: {} bytes", names.memory_usage());
}

fn example_shared() {
    info!("=== SharedMap (locked across threads) ===");

    let shared = SharedMap::new(U32Map::fixed());
    std::thread::scope(|s| {
        for t in 0..4usize {
            let shared = &shared;
            s.spawn(move || {
                for i in 0..1_000usize {
                    shared.insert(i * 4 + t, t as u32);
                }
            });
        }
    });
    info!("get(3999) = {:?}, capacity: {}", shared.get(3_999), shared.capacity());
}
