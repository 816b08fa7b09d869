//! Bounded Cache Module
//!
//! Thread-safe handle pairing the cache store with its expiration reaper.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::cache::{Cache, CacheStore};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::tasks::spawn_reaper;

// == Bounded Cache ==
/// In-process key/value cache with LRU eviction, TTL expiry and a memory
/// budget.
///
/// All operations, reads included, take one exclusive lock for their whole
/// duration. Share the cache across threads with `Arc`.
///
/// A reaper task is spawned on the current tokio runtime at construction and
/// runs until [`close`](Self::close) is awaited or the cache is dropped.
///
/// # Example
/// ```no_run
/// # use std::time::Duration;
/// # use bounded_cache::BoundedCache;
/// # async fn demo() -> bounded_cache::Result<()> {
/// let cache = BoundedCache::new(3, 4096, Duration::from_secs(4))?;
/// cache.put(1, "str1")?;
/// assert_eq!(cache.get(1), Some(b"str1".to_vec()));
/// cache.close().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct BoundedCache {
    store: Arc<Mutex<CacheStore>>,
    cleanup_interval: Duration,
    shutdown: Option<oneshot::Sender<()>>,
    reaper: Option<JoinHandle<()>>,
}

impl BoundedCache {
    // == Constructor ==
    /// Creates a cache with the default cleanup interval and accounting mode.
    ///
    /// # Errors
    /// * [`CacheError::InvalidConfiguration`] if `capacity` is zero
    /// * [`CacheError::RuntimeUnavailable`] outside a tokio runtime
    pub fn new(capacity: usize, memory_budget: usize, ttl: Duration) -> Result<Self> {
        Self::with_config(CacheConfig::new(capacity, memory_budget, ttl))
    }

    /// Creates a cache from a full configuration.
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| CacheError::RuntimeUnavailable)?;

        let store = Arc::new(Mutex::new(CacheStore::from_config(&config)?));
        let (shutdown, signal) = oneshot::channel();
        let reaper = spawn_reaper(&runtime, store.clone(), config.cleanup_interval, signal);

        Ok(Self {
            store,
            cleanup_interval: config.cleanup_interval,
            shutdown: Some(shutdown),
            reaper: Some(reaper),
        })
    }

    // == Put ==
    /// Stores `value` under `key`, overwriting and refreshing an existing entry.
    ///
    /// # Errors
    /// [`CacheError::MemoryOverflow`] if the entry does not fit the budget.
    /// The cache is unchanged in that case.
    pub fn put(&self, key: u32, value: impl Into<Vec<u8>>) -> Result<()> {
        self.store.lock().put(key, value.into())
    }

    // == Get ==
    /// Returns a copy of the value under `key` and marks it most recently used.
    ///
    /// Expired entries are removed and reported as misses.
    pub fn get(&self, key: u32) -> Option<Vec<u8>> {
        self.store.lock().get(key)
    }

    /// Returns true if `key` holds a live entry, without touching recency.
    pub fn contains(&self, key: u32) -> bool {
        self.store.lock().contains(key)
    }

    /// Removes `key`, returning its value if it was still live.
    pub fn remove(&self, key: u32) -> Option<Vec<u8>> {
        self.store.lock().remove(key)
    }

    /// Runs one expiration sweep now. Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        self.store.lock().purge_expired()
    }

    pub fn clear(&self) {
        self.store.lock().clear();
    }

    // == Accessors ==
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.store.lock().capacity()
    }

    pub fn ttl(&self) -> Duration {
        self.store.lock().ttl()
    }

    pub fn cleanup_interval(&self) -> Duration {
        self.cleanup_interval
    }

    /// Accounted bytes, base overhead included.
    pub fn memory_usage(&self) -> usize {
        self.store.lock().memory_usage()
    }

    pub fn memory_budget(&self) -> usize {
        self.store.lock().memory_budget()
    }

    /// Returns true while the reaper task is alive.
    pub fn is_reaper_running(&self) -> bool {
        self.reaper
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    // == Close ==
    /// Stops the reaper and waits for it to finish.
    pub async fn close(mut self) {
        self.signal_shutdown();
        if let Some(reaper) = self.reaper.take() {
            if let Err(err) = reaper.await {
                warn!("Expiration reaper ended abnormally: {}", err);
            }
        }
    }

    fn signal_shutdown(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            // The reaper may already be gone
            let _ = shutdown.send(());
        }
    }
}

impl Cache for BoundedCache {
    fn put(&self, key: u32, value: Vec<u8>) -> Result<()> {
        BoundedCache::put(self, key, value)
    }

    fn get(&self, key: u32) -> Option<Vec<u8>> {
        BoundedCache::get(self, key)
    }
}

impl Drop for BoundedCache {
    fn drop(&mut self) {
        self.signal_shutdown();
    }
}
