use std::sync::Arc;
use tinu_dns_application::services::{IterativeResolver, TtlPolicy};
use tinu_dns_application::use_cases::HandleDnsQueryUseCase;
use tinu_dns_domain::Config;
use tinu_dns_infrastructure::dns::{
    DnsServerHandler, InMemoryResponseCache, TokenBucket, UdpTransport,
};
use tracing::info;

pub struct DnsServices {
    pub cache: Option<Arc<InMemoryResponseCache>>,
    pub handler: Arc<DnsServerHandler>,
}

impl DnsServices {
    pub fn new(config: &Config) -> Self {
        info!(
            max_hops = config.resolver.max_hops,
            upstream_port = config.resolver.upstream_port,
            upstream_timeout_ms = config.resolver.upstream_timeout_ms,
            "Initializing iterative resolver"
        );

        let transport = Arc::new(UdpTransport::new(
            config.resolver.upstream_port,
            config.resolver.upstream_timeout(),
        ));
        let mut resolver =
            IterativeResolver::new(transport).with_max_hops(config.resolver.max_hops);

        let cache = if config.cache.enabled {
            let cache = Arc::new(InMemoryResponseCache::new());
            let policy = TtlPolicy::new(config.cache.default_ttl, config.cache.max_ttl);
            resolver = resolver.with_cache(cache.clone(), policy);
            info!(
                default_ttl = config.cache.default_ttl,
                max_ttl = config.cache.max_ttl,
                "Response cache enabled"
            );
            Some(cache)
        } else {
            info!("Response cache disabled");
            None
        };

        let use_case = Arc::new(HandleDnsQueryUseCase::new(Arc::new(resolver)));
        let mut handler = DnsServerHandler::new(use_case);

        if config.rate_limit.enabled {
            info!(
                requests_per_second = config.rate_limit.requests_per_second,
                burst = config.rate_limit.burst,
                "Rate limiting enabled"
            );
            handler =
                handler.with_admission_gate(Arc::new(TokenBucket::from_config(&config.rate_limit)));
        }

        Self {
            cache,
            handler: Arc::new(handler),
        }
    }
}
