mod cache;
mod errors;
mod logging;
mod rate_limit;
mod resolver;
mod root;
mod server;

pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use rate_limit::RateLimitConfig;
pub use resolver::ResolverConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
