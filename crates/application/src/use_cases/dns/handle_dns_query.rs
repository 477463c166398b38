use crate::ports::DnsResolver;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tinu_dns_domain::{
    decode_question, encode_message, Header, Message, Question, ResponseCode,
};
use tracing::{debug, error, info};

/// Turns one inbound datagram into at most one reply datagram.
pub struct HandleDnsQueryUseCase {
    resolver: Arc<dyn DnsResolver>,
}

impl HandleDnsQueryUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    /// Returns the encoded reply, or `None` when the datagram must be
    /// dropped without answering (malformed, not a query, or unencodable).
    pub async fn execute(&self, datagram: &[u8], source: SocketAddr) -> Option<Vec<u8>> {
        let start = Instant::now();

        let (inbound, question) = match decode_question(datagram) {
            Ok(decoded) => decoded,
            Err(e) => {
                debug!(client = %source, error = %e, "Dropping malformed datagram");
                return None;
            }
        };

        if inbound.response {
            debug!(client = %source, id = inbound.id, "Dropping datagram with QR set");
            return None;
        }

        let resolution = self.resolver.resolve(&question).await;
        let mut message = resolution.message;
        Self::stamp_header(&mut message, &inbound);

        info!(
            domain = %question.name,
            record_type = %question.record_type,
            client = %source,
            outcome = resolution.outcome.as_str(),
            rcode = %message.rcode(),
            hops = resolution.hops,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Query answered"
        );

        match encode_message(&message) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(
                    domain = %question.name,
                    client = %source,
                    error = %e,
                    "Failed to encode response, answering SERVFAIL"
                );
                Self::servfail(&question, &inbound)
            }
        }
    }

    fn stamp_header(message: &mut Message, inbound: &Header) {
        message.header.id = inbound.id;
        message.header.response = true;
        message.header.opcode = inbound.opcode;
        message.header.recursion_desired = inbound.recursion_desired;
        message.header.recursion_available = true;
    }

    fn servfail(question: &Question, inbound: &Header) -> Option<Vec<u8>> {
        let mut message = Message::error_response(question, ResponseCode::ServFail);
        Self::stamp_header(&mut message, inbound);
        match encode_message(&message) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(domain = %question.name, error = %e, "Failed to encode SERVFAIL, dropping");
                None
            }
        }
    }
}
