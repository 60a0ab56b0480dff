//! Periodic expiry sweep
//!
//! The only autonomous mutator of the cache: a background task that removes
//! expired entries on a fixed interval. Reads stay correct without it (an
//! expired entry is refused at get time), so the sweep is purely about
//! reclaiming memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::store::CacheStore;

/// Spawn the sweep task
///
/// Runs until aborted or the runtime shuts down. Holds only a weak-equivalent
/// shared handle to the store via `Arc`, so dropping the client elsewhere
/// does not stop the task; abort the returned handle to stop it.
pub fn spawn_sweeper(store: Arc<CacheStore>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval fires immediately; skip the zeroth tick
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let removed = store.sweep_expired();
            if removed > 0 {
                debug!(removed, "swept expired cache entries");
            }
        }
    })
}
