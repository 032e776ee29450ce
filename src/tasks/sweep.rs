//! Expiry Sweep Task
//!
//! Periodically removes expired entries so memory stays bounded even for
//! keys that are never read again. Without it, expiry is purely lazy.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::Clock;
use crate::service::ProfileCacheService;

/// Spawns a background task that purges expired entries every `interval`.
///
/// The task runs until aborted through the returned handle.
///
/// # Example
/// ```ignore
/// let service = Arc::new(ProfileCacheService::new(&config));
/// let sweep_handle = spawn_sweep_task(service.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<C>(
    service: Arc<ProfileCacheService<C>>,
    interval: Duration,
) -> JoinHandle<()>
where
    C: Clock + Clone,
{
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "Starting expiry sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = service.purge_expired();

            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}
