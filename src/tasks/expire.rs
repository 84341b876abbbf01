//! Expiration Sweep Task
//!
//! Background task that periodically removes expired namespaces from a store.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::Store;
use crate::error::{CacheError, Result};

/// Spawns a background task that calls [`Store::expire_cache`] every `interval`.
///
/// The task holds only a weak reference, so it never keeps the store alive.
/// Once every other handle to the store has been dropped, the next tick finds
/// no store and the task ends on its own. Sweep errors are logged and the
/// task keeps running.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort it.
///
/// # Example
/// ```ignore
/// let store = Arc::new(Store::new("sessions"));
/// let handle = spawn_expire_task(&store, Duration::from_secs(1));
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_expire_task<V>(store: &Arc<Store<V>>, interval: Duration) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    let store_ref = Arc::downgrade(store);
    let store_id = store.id().to_string();

    tokio::spawn(async move {
        info!(store = %store_id, ?interval, "starting expiration sweep task");

        loop {
            tokio::time::sleep(interval).await;

            match sweep(&store_ref, &store_id) {
                Ok(0) => debug!(store = %store_id, "sweep: no expired caches found"),
                Ok(removed) => info!(store = %store_id, removed, "sweep: removed expired caches"),
                Err(CacheError::NilReceiver(_)) => {
                    info!(store = %store_id, "store dropped, stopping sweep task");
                    break;
                }
                Err(err) => warn!(store = %store_id, error = %err, "sweep aborted"),
            }
        }
    })
}

fn sweep<V: Clone>(store: &Weak<Store<V>>, store_id: &str) -> Result<usize> {
    let store = store
        .upgrade()
        .ok_or_else(|| CacheError::NilReceiver(store_id.to_string()))?;
    store.expire_cache()
}
