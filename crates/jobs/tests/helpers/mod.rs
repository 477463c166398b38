use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tinu_dns_application::ports::{CacheMaintenancePort, CachePurgeOutcome};

/// Reports a fixed number of removals per cycle and counts invocations.
pub struct MockCacheMaintenancePort {
    purge_calls: AtomicUsize,
    removed_per_cycle: usize,
}

impl MockCacheMaintenancePort {
    pub fn new() -> Self {
        Self::removing(0)
    }

    pub fn removing(removed_per_cycle: usize) -> Self {
        Self {
            purge_calls: AtomicUsize::new(0),
            removed_per_cycle,
        }
    }

    pub fn purge_call_count(&self) -> usize {
        self.purge_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheMaintenancePort for MockCacheMaintenancePort {
    async fn run_purge_cycle(&self) -> CachePurgeOutcome {
        self.purge_calls.fetch_add(1, Ordering::SeqCst);
        CachePurgeOutcome {
            entries_removed: self.removed_per_cycle,
            cache_size: 0,
        }
    }
}
