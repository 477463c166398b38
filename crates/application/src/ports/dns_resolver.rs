use async_trait::async_trait;
use tinu_dns_domain::{Message, Question, ResponseCode};

/// Terminal state reached by one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    CacheHit,
    Authoritative,
    /// A non-authoritative reply carried no authority records at all.
    NoDelegation,
    Failure(String),
}

impl ResolutionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionOutcome::CacheHit => "cache_hit",
            ResolutionOutcome::Authoritative => "authoritative",
            ResolutionOutcome::NoDelegation => "no_delegation",
            ResolutionOutcome::Failure(_) => "failure",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Resolution {
    /// Response to hand back to the client. Its transaction ID is not
    /// meaningful until the dispatcher stamps the inbound one on it.
    pub message: Message,
    pub outcome: ResolutionOutcome,
    /// Upstream round-trips performed.
    pub hops: usize,
}

impl Resolution {
    pub fn new(message: Message, outcome: ResolutionOutcome, hops: usize) -> Self {
        Self {
            message,
            outcome,
            hops,
        }
    }

    pub fn rcode(&self) -> ResponseCode {
        self.message.rcode()
    }

    pub fn is_cache_hit(&self) -> bool {
        self.outcome == ResolutionOutcome::CacheHit
    }
}

#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Resolves `question` to a response message. Never fails: transport
    /// and protocol problems surface as a SERVFAIL or NXDOMAIN message.
    async fn resolve(&self, question: &Question) -> Resolution;
}
