//! Cache Sweep Task
//!
//! Background task that periodically evicts expired cache entries from
//! both tiers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::TieredCache;

/// Spawns a background task that sweeps expired cache entries.
///
/// One sweep runs immediately, then the task loops on the given interval.
/// The returned handle must be kept by the composition root and aborted on
/// shutdown; dropping it without aborting would leak the timer across a
/// re-initialization.
///
/// # Arguments
/// * `cache` - Shared reference to the tiered cache
/// * `interval` - Time between sweeps
pub fn spawn_sweep_task(cache: Arc<RwLock<TieredCache>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting cache sweep task with interval of {:?}", interval);

        loop {
            let removed = {
                let mut cache = cache.write().await;
                cache.purge_expired()
            };

            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }

            tokio::time::sleep(interval).await;
        }
    })
}
