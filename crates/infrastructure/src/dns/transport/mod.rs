mod query_id;
pub mod udp;

pub use query_id::QueryIdGenerator;
pub use udp::UdpTransport;
