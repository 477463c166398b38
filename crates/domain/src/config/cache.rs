use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// TTL in seconds for answers that carry no records.
    #[serde(default = "default_ttl")]
    pub default_ttl: u32,

    #[serde(default = "default_max_ttl")]
    pub max_ttl: u32,

    #[serde(default = "default_purge_interval_secs")]
    pub purge_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_ttl: default_ttl(),
            max_ttl: default_max_ttl(),
            purge_interval_secs: default_purge_interval_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_ttl() -> u32 {
    300
}

fn default_max_ttl() -> u32 {
    86_400
}

fn default_purge_interval_secs() -> u64 {
    300
}
