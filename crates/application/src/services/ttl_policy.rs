use std::time::Duration;
use tinu_dns_domain::Message;

/// Lifetime given to a cached response: the smallest answer TTL, or
/// `default_ttl` when there are no answers, never more than `max_ttl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    pub default_ttl: u32,
    pub max_ttl: u32,
}

impl TtlPolicy {
    pub fn new(default_ttl: u32, max_ttl: u32) -> Self {
        Self {
            default_ttl,
            max_ttl,
        }
    }

    pub fn ttl_for(&self, message: &Message) -> Duration {
        let secs = message
            .min_answer_ttl()
            .unwrap_or(self.default_ttl)
            .min(self.max_ttl);
        Duration::from_secs(u64::from(secs))
    }
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self::new(300, 86_400)
    }
}
