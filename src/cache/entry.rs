//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
///
/// Timestamps come from tokio's monotonic clock, so a paused test runtime
/// controls expiry as well as the reaper.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The key the entry is indexed under
    pub key: u32,
    /// The stored value
    pub value: Vec<u8>,
    /// Creation or last overwrite time
    pub inserted_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    pub fn new(key: u32, value: Vec<u8>) -> Self {
        Self {
            key,
            value,
            inserted_at: Instant::now(),
        }
    }

    // == Overwrite ==
    /// Replaces the value and restarts the TTL clock.
    pub fn overwrite(&mut self, value: Vec<u8>) {
        self.inserted_at = Instant::now();
        self.value = value;
    }

    // == Age ==
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.inserted_at)
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl` as of `now`.
    ///
    /// Boundary condition: an entry whose age equals the TTL exactly is still
    /// live; it expires once the age is strictly greater.
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        self.age(now) > ttl
    }
}
