use std::sync::Arc;
use std::time::Duration;
use tinu_dns_application::ports::CacheMaintenancePort;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const DEFAULT_PURGE_INTERVAL_SECS: u64 = 300;

/// Periodically drops expired response-cache entries so the map does not
/// keep growing with dead names.
pub struct CacheMaintenanceJob {
    maintenance: Arc<dyn CacheMaintenancePort>,
    purge_interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheMaintenanceJob {
    pub fn new(maintenance: Arc<dyn CacheMaintenancePort>) -> Self {
        Self {
            maintenance,
            purge_interval_secs: DEFAULT_PURGE_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, purge_interval_secs: u64) -> Self {
        self.purge_interval_secs = purge_interval_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        info!(
            interval_secs = self.purge_interval_secs,
            "Starting cache purge job"
        );

        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(self.purge_interval_secs));
            // The first tick completes immediately; nothing can have expired yet.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("CacheMaintenanceJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let outcome = self.maintenance.run_purge_cycle().await;
                        if outcome.entries_removed > 0 {
                            info!(
                                entries_removed = outcome.entries_removed,
                                cache_size = outcome.cache_size,
                                "Cache purge cycle completed"
                            );
                        } else {
                            debug!(cache_size = outcome.cache_size, "Cache purge found nothing to remove");
                        }
                    }
                }
            }
        })
    }
}
