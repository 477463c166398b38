pub mod cache;
pub mod listener;
pub mod rate_limit;
pub mod server;
pub mod transport;

pub use cache::InMemoryResponseCache;
pub use listener::UdpListener;
pub use rate_limit::TokenBucket;
pub use server::DnsServerHandler;
pub use transport::UdpTransport;
