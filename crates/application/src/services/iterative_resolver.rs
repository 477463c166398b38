use crate::ports::{
    CacheKey, DnsResolver, Resolution, ResolutionOutcome, ResponseCache, UpstreamReply,
    UpstreamTransport,
};
use crate::services::TtlPolicy;
use async_trait::async_trait;
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;
use tinu_dns_domain::{Message, Name, Question, RData, ResponseCode, ServerSet};
use tracing::{debug, info, warn};

/// Root, TLD and authoritative: the depth of a typical delegation chain.
pub const DEFAULT_MAX_HOPS: usize = 3;

/// Level of the hierarchy a hop is expected to reach. Only used for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HopTier {
    Root,
    Tld,
    Authoritative,
}

impl HopTier {
    pub fn for_hop(hop: usize) -> Self {
        match hop {
            0 => HopTier::Root,
            1 => HopTier::Tld,
            _ => HopTier::Authoritative,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HopTier::Root => "root",
            HopTier::Tld => "tld",
            HopTier::Authoritative => "authoritative",
        }
    }
}

impl fmt::Display for HopTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a single non-authoritative reply tells us to do next.
enum Referral {
    Next(ServerSet),
    NoDelegation,
    MissingGlue,
}

/// Walks the delegation chain from the root hints, one sequential
/// upstream round-trip per hop.
pub struct IterativeResolver {
    transport: Arc<dyn UpstreamTransport>,
    cache: Option<Arc<dyn ResponseCache>>,
    ttl_policy: TtlPolicy,
    root_hints: ServerSet,
    max_hops: usize,
}

impl IterativeResolver {
    pub fn new(transport: Arc<dyn UpstreamTransport>) -> Self {
        Self {
            transport,
            cache: None,
            ttl_policy: TtlPolicy::default(),
            root_hints: ServerSet::root_hints(),
            max_hops: DEFAULT_MAX_HOPS,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn ResponseCache>, ttl_policy: TtlPolicy) -> Self {
        self.cache = Some(cache);
        self.ttl_policy = ttl_policy;
        self
    }

    pub fn with_root_hints(mut self, root_hints: ServerSet) -> Self {
        self.root_hints = root_hints;
        self
    }

    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    fn cached(&self, key: &CacheKey) -> Option<Message> {
        self.cache.as_ref()?.get(key)
    }

    fn store(&self, key: CacheKey, message: &Message) {
        let Some(cache) = &self.cache else {
            return;
        };
        let ttl = self.ttl_policy.ttl_for(message);
        if ttl.is_zero() {
            return;
        }
        debug!(key = %key, ttl_secs = ttl.as_secs(), "Caching response");
        cache.put(key, message.clone(), ttl);
    }

    fn authoritative_response(question: &Question, reply: &UpstreamReply) -> Message {
        let mut message = Message::response_to(question);
        message.header.rcode = reply.message.rcode();
        message.answers = reply.message.answers.clone();
        message
    }

    /// Next-hop servers: A glue from the additional section whose owner
    /// matches an NS target in the authority section. Names compare exactly
    /// as decoded.
    fn follow_referral(reply: &Message) -> Referral {
        if reply.authorities.is_empty() {
            return Referral::NoDelegation;
        }

        let nameservers: Vec<&Name> = reply
            .authorities
            .iter()
            .filter_map(|rr| rr.nameserver())
            .collect();

        let next: ServerSet = reply
            .additionals
            .iter()
            .filter(|rr| nameservers.contains(&&rr.name))
            .filter_map(|rr| match rr.data {
                RData::A(addr) => Some(IpAddr::V4(addr)),
                _ => None,
            })
            .collect();

        if next.is_empty() {
            Referral::MissingGlue
        } else {
            Referral::Next(next)
        }
    }

    /// SERVFAIL for a delegation chain that cannot be followed. Unlike a
    /// transport error this is a property of the zone data, so it is cached
    /// like an answer.
    fn referral_failure(
        &self,
        key: CacheKey,
        question: &Question,
        hops: usize,
        reason: &str,
    ) -> Resolution {
        let resolution = Self::failure(question, hops, reason);
        self.store(key, &resolution.message);
        resolution
    }

    fn failure(question: &Question, hops: usize, reason: impl Into<String>) -> Resolution {
        Resolution::new(
            Message::error_response(question, ResponseCode::ServFail),
            ResolutionOutcome::Failure(reason.into()),
            hops,
        )
    }
}

#[async_trait]
impl DnsResolver for IterativeResolver {
    async fn resolve(&self, question: &Question) -> Resolution {
        let key = CacheKey::for_question(question);

        if let Some(message) = self.cached(&key) {
            debug!(
                domain = %question.name,
                record_type = %question.record_type,
                "Cache hit"
            );
            return Resolution::new(message, ResolutionOutcome::CacheHit, 0);
        }

        let mut servers = self.root_hints.clone();

        for hop in 0..self.max_hops {
            let tier = HopTier::for_hop(hop);
            debug!(
                domain = %question.name,
                record_type = %question.record_type,
                hop,
                tier = %tier,
                servers = %servers,
                "Querying nameservers"
            );

            let reply = match self.transport.query(&servers, question).await {
                Ok(reply) => reply,
                Err(e) => {
                    warn!(
                        domain = %question.name,
                        hop,
                        tier = %tier,
                        error = %e,
                        "Upstream query failed"
                    );
                    return Self::failure(question, hop + 1, e.to_string());
                }
            };

            if reply.authoritative {
                let message = Self::authoritative_response(question, &reply);
                info!(
                    domain = %question.name,
                    record_type = %question.record_type,
                    server = %reply.server,
                    tier = %tier,
                    answers = message.answers.len(),
                    rcode = %message.rcode(),
                    "Authoritative answer"
                );
                self.store(key, &message);
                return Resolution::new(message, ResolutionOutcome::Authoritative, hop + 1);
            }

            match Self::follow_referral(&reply.message) {
                Referral::Next(next) => {
                    debug!(
                        domain = %question.name,
                        server = %reply.server,
                        tier = %tier,
                        next = %next,
                        "Following referral"
                    );
                    servers = next;
                }
                Referral::NoDelegation => {
                    info!(
                        domain = %question.name,
                        server = %reply.server,
                        tier = %tier,
                        "No delegation in reply, answering NXDOMAIN"
                    );
                    return Resolution::new(
                        Message::error_response(question, ResponseCode::NxDomain),
                        ResolutionOutcome::NoDelegation,
                        hop + 1,
                    );
                }
                Referral::MissingGlue => {
                    warn!(
                        domain = %question.name,
                        server = %reply.server,
                        tier = %tier,
                        "No resolver found: referral carries no A glue"
                    );
                    return self.referral_failure(
                        key,
                        question,
                        hop + 1,
                        "referral without glue",
                    );
                }
            }
        }

        warn!(
            domain = %question.name,
            hops = self.max_hops,
            "Hop limit reached without an authoritative answer"
        );
        self.referral_failure(key, question, self.max_hops, "hop limit exhausted")
    }
}
