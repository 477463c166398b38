mod admission_gate;
mod cache_maintenance_port;
mod dns_resolver;
mod response_cache;
mod upstream_transport;

pub use admission_gate::AdmissionGate;
pub use cache_maintenance_port::{CacheMaintenancePort, CachePurgeOutcome};
pub use dns_resolver::{DnsResolver, Resolution, ResolutionOutcome};
pub use response_cache::{CacheKey, ResponseCache};
pub use upstream_transport::{UpstreamReply, UpstreamTransport};

// Re-export for convenience
pub use tinu_dns_domain::{Message, Question};
