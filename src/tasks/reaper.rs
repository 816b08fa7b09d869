//! Expiration Reaper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task sleeps for `interval`, takes the store lock, removes every expired
/// entry and releases the lock before sleeping again. An empty store is just
/// an empty sweep. The task ends when `shutdown` fires or its sender is
/// dropped.
///
/// # Arguments
/// * `runtime` - Runtime the task is spawned on
/// * `store` - Shared cache state
/// * `interval` - Time between sweeps
/// * `shutdown` - Stop signal
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::new(1000, 1 << 20, ttl)?));
/// let (stop, shutdown) = oneshot::channel();
/// let handle = spawn_reaper(&Handle::current(), store.clone(), Duration::from_secs(1), shutdown);
/// // Later:
/// let _ = stop.send(());
/// handle.await?;
/// ```
pub fn spawn_reaper(
    runtime: &Handle,
    store: Arc<Mutex<CacheStore>>,
    interval: Duration,
    mut shutdown: oneshot::Receiver<()>,
) -> JoinHandle<()> {
    runtime.spawn(async move {
        info!(
            "Starting expiration reaper with interval of {} ms",
            interval.as_millis()
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(interval) => {}
            }

            let removed = store.lock().purge_expired();

            if removed > 0 {
                debug!("Expiration sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiration sweep: no expired entries found");
            }
        }

        info!("Expiration reaper stopped");
    })
}
