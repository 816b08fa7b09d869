//! Cache Module
//!
//! Provides in-memory caching with LRU eviction, TTL expiration and an
//! approximate memory budget.
//!
//! Only [`BoundedCache`] and its supporting types are exported; the store,
//! the recency list and the ledger stay inside the crate.
//!
//! ```compile_fail
//! use bounded_cache::cache::CacheStore;
//! ```
//!
//! ```compile_fail
//! use bounded_cache::cache::LruList;
//! ```

mod bounded;
mod entry;
mod lru;
mod memory;
mod store;
mod traits;


// Re-export public types
pub use bounded::BoundedCache;
pub use memory::MemoryAccounting;
pub use traits::Cache;

pub(crate) use entry::CacheEntry;
pub(crate) use lru::{Handle, LruList};
pub(crate) use memory::MemoryLedger;
pub(crate) use store::CacheStore;

// == Public Constants ==
/// Accounted size of an empty cache
pub const BASE_OVERHEAD: usize = 80;

/// Per-entry index cost: 4-byte key plus 8-byte list handle
pub const INDEX_ENTRY_OVERHEAD: usize = 12;

/// Per-entry list cost in fixed accounting: 4-byte key, 24-byte timestamp
/// and a 128-byte value slot
pub const STORED_ENTRY_OVERHEAD: usize = 156;

/// Per-entry list cost without the value in exact accounting
pub const ENTRY_HEADER_SIZE: usize = 28;
