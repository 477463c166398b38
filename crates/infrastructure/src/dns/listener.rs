use crate::dns::server::DnsServerHandler;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tinu_dns_domain::MAX_UDP_PAYLOAD;
use tokio::net::UdpSocket;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

/// Receive loop for the listening socket. Each admitted datagram is
/// resolved on its own task; at most `max_in_flight` run at once.
pub struct UdpListener {
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
    in_flight: Arc<Semaphore>,
    max_in_flight: usize,
}

impl UdpListener {
    pub fn new(socket: UdpSocket, handler: Arc<DnsServerHandler>, max_in_flight: usize) -> Self {
        Self {
            socket: Arc::new(socket),
            handler,
            in_flight: Arc::new(Semaphore::new(max_in_flight)),
            max_in_flight,
        }
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Runs until `shutdown` completes. Tasks already spawned are left to
    /// finish on their own.
    pub async fn run<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut recv_buf = [0u8; MAX_UDP_PAYLOAD];

        info!(
            bind_address = ?self.local_addr().ok(),
            max_in_flight = self.max_in_flight,
            "DNS listener ready"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("DNS listener shutting down");
                    return;
                }
                result = self.socket.recv_from(&mut recv_buf) => match result {
                    Ok((len, from)) => self.dispatch(&recv_buf[..len], from),
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => error!(error = %e, "UDP recv error"),
                },
            }
        }
    }

    fn dispatch(&self, datagram: &[u8], from: SocketAddr) {
        if !self.handler.admit(from) {
            return;
        }

        let permit = match self.in_flight.clone().try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!(
                    client = %from,
                    max_in_flight = self.max_in_flight,
                    "Too many queries in flight, dropping datagram"
                );
                return;
            }
        };

        let handler = self.handler.clone();
        let socket = self.socket.clone();
        let owned_buf: Arc<[u8]> = Arc::from(datagram);
        tokio::spawn(async move {
            let _permit = permit;
            if let Some(response) = handler.handle(&owned_buf, from).await {
                match socket.send_to(&response, from).await {
                    Ok(sent) => debug!(client = %from, bytes_sent = sent, "Reply sent"),
                    Err(e) => warn!(client = %from, error = %e, "Failed to send reply"),
                }
            }
        });
    }
}
