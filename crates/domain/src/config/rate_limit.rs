use serde::{Deserialize, Serialize};

/// Token bucket applied to every inbound datagram before it is dispatched.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: f64,

    #[serde(default = "default_burst")]
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests_per_second: default_requests_per_second(),
            burst: default_burst(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_requests_per_second() -> f64 {
    1.0
}

fn default_burst() -> u32 {
    5
}
