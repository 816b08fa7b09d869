//! Cache Store Module
//!
//! Main cache engine combining the recency list, the key index and the
//! memory ledger. Not synchronized; [`BoundedCache`](crate::cache::BoundedCache)
//! wraps it in a mutex.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheEntry, Handle, LruList, MemoryAccounting, MemoryLedger};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Cache state with LRU eviction, TTL expiry and a memory budget.
///
/// Every live key has exactly one list position and one index entry, and the
/// ledger always equals the base overhead plus the cost of every live entry.
#[derive(Debug)]
pub struct CacheStore {
    /// Entries ordered by recency
    entries: LruList<CacheEntry>,
    /// Key to list position
    index: HashMap<u32, Handle>,
    /// Accounted bytes
    memory: MemoryLedger,
    accounting: MemoryAccounting,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Maximum entry age
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a store with default accounting.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, must be positive
    /// * `memory_budget` - Ceiling on accounted bytes
    /// * `ttl` - Maximum entry age
    pub fn new(capacity: usize, memory_budget: usize, ttl: Duration) -> Result<Self> {
        Self::from_config(&CacheConfig::new(capacity, memory_budget, ttl))
    }

    /// Creates a store from a validated configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            entries: LruList::with_capacity(config.capacity),
            index: HashMap::with_capacity(config.capacity),
            memory: MemoryLedger::new(config.memory_budget),
            accounting: config.memory_accounting,
            capacity: config.capacity,
            ttl: config.ttl,
        })
    }

    // == Put ==
    /// Stores a value under `key`.
    ///
    /// An existing key is overwritten in place and its TTL restarts. A new key
    /// evicts the least recently used entry when the store is full, expired or
    /// not. Fails with [`CacheError::MemoryOverflow`] when the result would
    /// exceed the budget; the store is left untouched in that case.
    pub fn put(&mut self, key: u32, value: Vec<u8>) -> Result<()> {
        if let Some(&handle) = self.index.get(&key) {
            return self.overwrite(handle, value);
        }

        let cost = self.accounting.entry_cost(value.len());
        let victim = if self.entries.len() >= self.capacity {
            self.entries.back()
        } else {
            None
        };
        let freed = victim
            .and_then(|handle| self.entries.get(handle))
            .map_or(0, |entry| self.cost_of(entry));

        if self.memory.would_exceed(freed, cost) {
            return Err(self.overflow(freed, cost));
        }

        if let Some(victim) = victim {
            if let Some(evicted) = self.remove_entry(victim) {
                debug!(key = evicted.key, "Evicted least recently used entry");
            }
        }

        self.memory.charge(cost);
        let handle = self.entries.push_front(CacheEntry::new(key, value));
        self.index.insert(key, handle);
        Ok(())
    }

    fn overwrite(&mut self, handle: Handle, value: Vec<u8>) -> Result<()> {
        let old_cost = self
            .entries
            .get(handle)
            .map_or(0, |entry| self.cost_of(entry));
        let new_cost = self.accounting.entry_cost(value.len());

        if self.memory.would_exceed(old_cost, new_cost) {
            return Err(self.overflow(old_cost, new_cost));
        }

        if let Some(entry) = self.entries.get_mut(handle) {
            entry.overwrite(value);
        }
        self.entries.move_to_front(handle);
        self.memory.release(old_cost);
        self.memory.charge(new_cost);
        Ok(())
    }

    // == Get ==
    /// Retrieves a copy of the value stored under `key`.
    ///
    /// A hit marks the entry most recently used. An expired entry is removed
    /// on the spot and reported as a miss.
    pub fn get(&mut self, key: u32) -> Option<Vec<u8>> {
        let handle = *self.index.get(&key)?;

        if self.is_expired(handle, Instant::now()) {
            self.remove_entry(handle);
            debug!(key, "Expired entry removed on read");
            return None;
        }

        self.entries.move_to_front(handle);
        self.entries.get(handle).map(|entry| entry.value.clone())
    }

    // == Contains ==
    /// Returns true if `key` holds a live entry. Does not touch recency.
    pub fn contains(&self, key: u32) -> bool {
        self.index
            .get(&key)
            .is_some_and(|&handle| !self.is_expired(handle, Instant::now()))
    }

    // == Remove ==
    /// Removes `key` and returns its value if it was still live.
    pub fn remove(&mut self, key: u32) -> Option<Vec<u8>> {
        let handle = *self.index.get(&key)?;
        let expired = self.is_expired(handle, Instant::now());
        let entry = self.remove_entry(handle)?;
        (!expired).then_some(entry.value)
    }

    // == Purge Expired ==
    /// Removes every entry older than the TTL.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let ttl = self.ttl;
        let expired: Vec<Handle> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(ttl, now))
            .map(|(handle, _)| handle)
            .collect();

        let count = expired.len();
        for handle in expired {
            self.remove_entry(handle);
        }
        count
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.memory.reset();
    }

    // == Remove Entry ==
    /// Unlinks an entry, drops its index slot and releases its cost.
    ///
    /// Every removal path goes through here.
    fn remove_entry(&mut self, handle: Handle) -> Option<CacheEntry> {
        let entry = self.entries.remove(handle)?;
        self.index.remove(&entry.key);
        let cost = self.cost_of(&entry);
        self.memory.release(cost);
        Some(entry)
    }

    fn is_expired(&self, handle: Handle, now: Instant) -> bool {
        self.entries
            .get(handle)
            .map_or(true, |entry| entry.is_expired(self.ttl, now))
    }

    fn cost_of(&self, entry: &CacheEntry) -> usize {
        self.accounting.entry_cost(entry.value.len())
    }

    fn overflow(&self, freed: usize, added: usize) -> CacheError {
        CacheError::MemoryOverflow {
            required: self.memory.projected(freed, added),
            budget: self.memory.budget(),
        }
    }

    // == Accessors ==
    /// Returns the current number of entries, expired ones not yet reaped
    /// included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Accounted bytes, base overhead included.
    pub fn memory_usage(&self) -> usize {
        self.memory.used()
    }

    pub fn memory_budget(&self) -> usize {
        self.memory.budget()
    }

    /// Keys from most to least recently used.
    #[cfg(test)]
    pub(crate) fn keys(&self) -> Vec<u32> {
        self.entries.iter().map(|(_, entry)| entry.key).collect()
    }

    /// Asserts that list, index and ledger agree.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        use crate::cache::BASE_OVERHEAD;

        assert_eq!(self.index.len(), self.entries.len(), "index/list size mismatch");
        for (handle, entry) in self.entries.iter() {
            assert_eq!(self.index.get(&entry.key), Some(&handle), "stale index entry");
        }
        let expected: usize = BASE_OVERHEAD
            + self
                .entries
                .iter()
                .map(|(_, entry)| self.cost_of(entry))
                .sum::<usize>();
        assert_eq!(self.memory.used(), expected, "ledger drift");
    }
}
