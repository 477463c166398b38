use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// Computes the datagrams sent back for one received query. `call` counts
/// queries seen so far, starting at zero.
pub type Responder = dyn Fn(&[u8], usize) -> Vec<Vec<u8>> + Send + Sync;

/// Loopback DNS server on an ephemeral port driven by a [`Responder`].
pub struct MockDnsServer {
    addr: SocketAddr,
    received: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start<F>(responder: F) -> Result<Self, std::io::Error>
    where
        F: Fn(&[u8], usize) -> Vec<Vec<u8>> + Send + Sync + 'static,
    {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let local_addr = socket.local_addr()?;
        let received = Arc::new(AtomicUsize::new(0));
        let counter = received.clone();
        let responder: Arc<Responder> = Arc::new(responder);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            let call = counter.fetch_add(1, Ordering::SeqCst);
                            for response in responder(&buf[..len], call) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr: local_addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// A server that reads queries and never answers.
    pub async fn silent() -> Result<Self, std::io::Error> {
        Self::start(|_, _| Vec::new()).await
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn queries_received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_server_echoes_through_responder() {
        let server = MockDnsServer::start(|query, _| vec![query.to_vec()])
            .await
            .unwrap();
        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();

        client.send_to(&[0x12, 0x34], server.addr()).await.unwrap();

        let mut buf = [0u8; 16];
        let (len, _) = client.recv_from(&mut buf).await.unwrap();
        assert_eq!(&buf[..len], &[0x12, 0x34]);
        assert_eq!(server.queries_received(), 1);
    }
}
