use std::collections::TryReserveError;

/// Errors returned by [`SentinelMap::try_insert`](crate::SentinelMap::try_insert).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Growing storage to cover `key` overflows `usize`.
    #[error("key {key} is beyond the addressable capacity of the map")]
    CapacityOverflow {
        /// The key that could not be made addressable.
        key: usize,
    },

    /// The allocator refused the grown storage.
    #[error("failed to allocate storage: {0}")]
    Alloc(#[from] TryReserveError),
}

/// Result alias for map operations.
pub type Result<T> = std::result::Result<T, Error>;
