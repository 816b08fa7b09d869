//! Bounded Cache - an embeddable in-memory key/value cache
//!
//! Provides a capacity-bounded store with LRU eviction, per-entry TTL
//! expiration, an approximate memory budget and a background reaper that
//! sweeps expired entries.

pub mod cache;
pub mod config;
pub mod error;

mod tasks;

pub use cache::{BoundedCache, Cache, MemoryAccounting};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
