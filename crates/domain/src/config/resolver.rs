use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Referral hops before giving up (root, TLD, authoritative).
    #[serde(default = "default_max_hops")]
    pub max_hops: usize,

    #[serde(default = "default_upstream_port")]
    pub upstream_port: u16,

    /// Read deadline for a single upstream reply.
    #[serde(default = "default_upstream_timeout_ms")]
    pub upstream_timeout_ms: u64,
}

impl ResolverConfig {
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_hops: default_max_hops(),
            upstream_port: default_upstream_port(),
            upstream_timeout_ms: default_upstream_timeout_ms(),
        }
    }
}

fn default_max_hops() -> usize {
    3
}

fn default_upstream_port() -> u16 {
    53
}

fn default_upstream_timeout_ms() -> u64 {
    3000
}
