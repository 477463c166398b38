use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tinu_dns_application::ports::{
    CacheKey, CacheMaintenancePort, CachePurgeOutcome, ResponseCache,
};
use tinu_dns_domain::Message;
use tracing::{debug, warn};

struct CachedEntry {
    message: Message,
    expires_at: Instant,
}

impl CachedEntry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Process-local response cache behind a single read/write lock.
///
/// Expired entries are never served. They stay in the map until they are
/// overwritten by a fresh resolution or removed by [`purge_expired`].
///
/// [`purge_expired`]: InMemoryResponseCache::purge_expired
#[derive(Default)]
pub struct InMemoryResponseCache {
    entries: RwLock<HashMap<CacheKey, CachedEntry>>,
}

impl InMemoryResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        match self.entries.read() {
            Ok(entries) => entries.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry whose expiry has passed and returns how many
    /// were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = match self.entries.write() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, remaining = entries.len(), "Purged expired cache entries");
        }
        removed
    }
}

impl ResponseCache for InMemoryResponseCache {
    fn get(&self, key: &CacheKey) -> Option<Message> {
        let entries = match self.entries.read() {
            Ok(entries) => entries,
            Err(poisoned) => {
                warn!("Response cache lock poisoned, recovering");
                poisoned.into_inner()
            }
        };
        entries
            .get(key)
            .filter(|entry| entry.is_live(Instant::now()))
            .map(|entry| entry.message.clone())
    }

    fn put(&self, key: CacheKey, message: Message, ttl: Duration) {
        let Some(expires_at) = Instant::now().checked_add(ttl) else {
            warn!(key = %key, "TTL out of range, not caching");
            return;
        };
        let mut entries = match self.entries.write() {
            Ok(entries) => entries,
            Err(poisoned) => {
                warn!("Response cache lock poisoned, recovering");
                poisoned.into_inner()
            }
        };
        entries.insert(
            key,
            CachedEntry {
                message,
                expires_at,
            },
        );
    }
}

#[async_trait]
impl CacheMaintenancePort for InMemoryResponseCache {
    async fn run_purge_cycle(&self) -> CachePurgeOutcome {
        let entries_removed = self.purge_expired();
        CachePurgeOutcome {
            entries_removed,
            cache_size: self.len(),
        }
    }
}
