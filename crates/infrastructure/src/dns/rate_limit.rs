//! Token bucket consulted once per inbound datagram.

use std::sync::Mutex;
use std::time::Instant;
use tinu_dns_application::ports::AdmissionGate;
use tinu_dns_domain::config::RateLimitConfig;

struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

/// Refills continuously at `rate` tokens per second up to `burst`; every
/// admitted datagram takes one token. Starts full.
pub struct TokenBucket {
    rate: f64,
    burst: f64,
    state: Mutex<BucketState>,
}

impl TokenBucket {
    pub fn new(rate: f64, burst: u32) -> Self {
        let burst = f64::from(burst.max(1));
        Self {
            rate: rate.max(0.0),
            burst,
            state: Mutex::new(BucketState {
                tokens: burst,
                last_refill: Instant::now(),
            }),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.requests_per_second, config.burst)
    }

    fn allow_at(&self, now: Instant) -> bool {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };

        let elapsed = now.saturating_duration_since(state.last_refill);
        state.tokens = (state.tokens + elapsed.as_secs_f64() * self.rate).min(self.burst);
        state.last_refill = now;

        if state.tokens >= 1.0 {
            state.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

impl AdmissionGate for TokenBucket {
    fn allow(&self) -> bool {
        self.allow_at(Instant::now())
    }
}
