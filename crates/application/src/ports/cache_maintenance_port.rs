use async_trait::async_trait;

/// Outcome of a purge cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CachePurgeOutcome {
    pub entries_removed: usize,
    pub cache_size: usize,
}

/// Port for periodic cache housekeeping.
#[async_trait]
pub trait CacheMaintenancePort: Send + Sync {
    /// Remove entries whose expiry has passed.
    async fn run_purge_cycle(&self) -> CachePurgeOutcome;
}
