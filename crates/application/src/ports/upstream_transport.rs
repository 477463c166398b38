use async_trait::async_trait;
use std::net::SocketAddr;
use tinu_dns_domain::{Message, Question, ServerSet, TransportError};

#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub message: Message,
    /// Server that produced the reply.
    pub server: SocketAddr,
    pub authoritative: bool,
}

impl UpstreamReply {
    pub fn new(message: Message, server: SocketAddr) -> Self {
        let authoritative = message.header.authoritative;
        Self {
            message,
            server,
            authoritative,
        }
    }
}

#[async_trait]
pub trait UpstreamTransport: Send + Sync {
    /// Sends `question` to the first server in `servers` that can be
    /// reached and returns its single reply.
    async fn query(
        &self,
        servers: &ServerSet,
        question: &Question,
    ) -> Result<UpstreamReply, TransportError>;
}
