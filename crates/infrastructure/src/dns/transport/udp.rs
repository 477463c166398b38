//! UDP transport for iterative queries (RFC 1035 §4.2.1).
//!
//! One query datagram per hop, no EDNS(0), no TCP fallback. Replies are
//! read into a 512-byte buffer on a connected socket, so the kernel drops
//! datagrams from any other source.

use super::QueryIdGenerator;
use async_trait::async_trait;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tinu_dns_application::ports::{UpstreamReply, UpstreamTransport};
use tinu_dns_domain::{
    decode_message, encode_message, DecodeError, Message, Question, ServerSet, TransportError,
    MAX_UDP_PAYLOAD,
};
use tokio::net::UdpSocket;
use tokio::time::Instant;
use tracing::{debug, warn};

pub struct UdpTransport {
    port: u16,
    timeout: Duration,
    ids: QueryIdGenerator,
}

impl UdpTransport {
    pub fn new(port: u16, timeout: Duration) -> Self {
        Self {
            port,
            timeout,
            ids: QueryIdGenerator::new(),
        }
    }

    async fn connect_to(server: SocketAddr) -> io::Result<UdpSocket> {
        let bind_addr: SocketAddr = if server.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(bind_addr).await?;
        socket.connect(server).await?;
        Ok(socket)
    }

    /// First server, in order, that a socket can be connected to.
    async fn connect(&self, servers: &ServerSet) -> Result<(UdpSocket, SocketAddr), TransportError> {
        for ip in servers.iter() {
            let server = SocketAddr::new(*ip, self.port);
            match Self::connect_to(server).await {
                Ok(socket) => return Ok((socket, server)),
                Err(e) => {
                    debug!(server = %server, error = %e, "Server unreachable, trying next");
                }
            }
        }
        Err(TransportError::NoReachableServer)
    }

    /// Reads until a datagram carrying `id` arrives or the deadline passes.
    async fn receive(
        &self,
        socket: &UdpSocket,
        server: SocketAddr,
        id: u16,
    ) -> Result<Message, TransportError> {
        let deadline = Instant::now() + self.timeout;
        let mut buf = [0u8; MAX_UDP_PAYLOAD];

        loop {
            let len = match tokio::time::timeout_at(deadline, socket.recv(&mut buf)).await {
                Err(_) => return Err(TransportError::Timeout { server }),
                Ok(Err(e)) => return Err(io_error(server, e)),
                Ok(Ok(len)) => len,
            };

            match validate_response_id(id, &buf[..len]) {
                Ok(()) => {}
                Err(TransportError::TransactionIdMismatch { expected, received }) => {
                    warn!(
                        server = %server,
                        expected,
                        received,
                        "Discarding reply with unexpected transaction ID"
                    );
                    continue;
                }
                Err(e) => return Err(e),
            }

            debug!(server = %server, bytes_received = len, "UDP reply received");
            return Ok(decode_message(&buf[..len])?);
        }
    }
}

fn io_error(server: SocketAddr, e: io::Error) -> TransportError {
    TransportError::Io {
        server,
        message: e.to_string(),
    }
}

/// Checks the reply's transaction ID against the one that was sent.
pub(crate) fn validate_response_id(expected: u16, response: &[u8]) -> Result<(), TransportError> {
    let received = match response {
        [hi, lo, ..] => u16::from_be_bytes([*hi, *lo]),
        _ => {
            return Err(DecodeError::Truncated {
                offset: response.len(),
            }
            .into())
        }
    };
    if received != expected {
        return Err(TransportError::TransactionIdMismatch { expected, received });
    }
    Ok(())
}

#[async_trait]
impl UpstreamTransport for UdpTransport {
    async fn query(
        &self,
        servers: &ServerSet,
        question: &Question,
    ) -> Result<UpstreamReply, TransportError> {
        let id = self.ids.next_id()?;
        let query = Message::query(id, question.clone());
        let bytes = encode_message(&query)?;

        let (socket, server) = self.connect(servers).await?;
        let bytes_sent = socket.send(&bytes).await.map_err(|e| io_error(server, e))?;
        debug!(
            server = %server,
            domain = %question.name,
            record_type = %question.record_type,
            bytes_sent,
            "UDP query sent"
        );

        let message = self.receive(&socket, server, id).await?;

        if message.questions.len() != query.questions.len() {
            return Err(TransportError::QuestionMismatch {
                sent: query.questions.len(),
                received: message.questions.len(),
            });
        }

        Ok(UpstreamReply::new(message, server))
    }
}

#[cfg(test)]
#[path = "udp_test.rs"]
mod tests;
