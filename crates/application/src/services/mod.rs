mod iterative_resolver;
mod ttl_policy;

pub use iterative_resolver::{HopTier, IterativeResolver, DEFAULT_MAX_HOPS};
pub use ttl_policy::TtlPolicy;
