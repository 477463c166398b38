mod helpers;

use async_trait::async_trait;
use helpers::*;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tinu_dns_application::ports::{DnsResolver, Resolution, ResolutionOutcome};
use tinu_dns_application::use_cases::HandleDnsQueryUseCase;
use tinu_dns_domain::{decode_message, Message, Question, RData, RecordType, ResourceRecord};
use tinu_dns_infrastructure::dns::{DnsServerHandler, TokenBucket, UdpListener};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Answers every question with 192.0.2.1, optionally after a delay.
struct FixedResolver {
    delay: Duration,
    calls: AtomicUsize,
}

impl FixedResolver {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DnsResolver for FixedResolver {
    async fn resolve(&self, question: &Question) -> Resolution {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        let mut message = Message::response_to(question);
        message.answers.push(ResourceRecord::new(
            question.name.clone(),
            60,
            RData::A(Ipv4Addr::new(192, 0, 2, 1)),
        ));
        Resolution::new(message, ResolutionOutcome::Authoritative, 1)
    }
}

struct RunningListener {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl RunningListener {
    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        tokio::time::timeout(Duration::from_secs(2), self.task)
            .await
            .expect("listener stops")
            .unwrap();
    }
}

async fn start_listener(handler: DnsServerHandler, max_in_flight: usize) -> RunningListener {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let listener = UdpListener::new(socket, Arc::new(handler), max_in_flight);
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();
    let task = tokio::spawn(async move {
        listener
            .run(async {
                let _ = rx.await;
            })
            .await;
    });
    RunningListener {
        addr,
        shutdown: Some(tx),
        task,
    }
}

fn handler(resolver: Arc<FixedResolver>) -> DnsServerHandler {
    DnsServerHandler::new(Arc::new(HandleDnsQueryUseCase::new(resolver)))
}

async fn exchange(client: &UdpSocket, to: SocketAddr, datagram: &[u8]) -> Option<Vec<u8>> {
    client.send_to(datagram, to).await.unwrap();
    let mut buf = [0u8; 512];
    match tokio::time::timeout(Duration::from_millis(300), client.recv_from(&mut buf)).await {
        Ok(Ok((len, _))) => Some(buf[..len].to_vec()),
        _ => None,
    }
}

#[tokio::test]
async fn test_query_gets_reply_with_same_id() {
    let resolver = Arc::new(FixedResolver::new(Duration::ZERO));
    let listener = start_listener(handler(resolver), 8).await;
    let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let q = question("example.com", RecordType::A);

    let reply = exchange(&client, listener.addr, &encode_query(0x4242, &q))
        .await
        .expect("reply");
    let message = decode_message(&reply).unwrap();

    assert_eq!(message.header.id, 0x4242);
    assert!(message.header.response);
    assert!(message.header.recursion_available);
    assert_eq!(
        message.answers[0].data,
        RData::A(Ipv4Addr::new(192, 0, 2, 1))
    );

    listener.stop().await;
}

#[tokio::test]
async fn test_malformed_datagram_gets_no_reply() {
    let resolver = Arc::new(FixedResolver::new(Duration::ZERO));
    let listener = start_listener(handler(resolver.clone()), 8).await;
    let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let header_only = [0x12, 0x34, 0x01, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0];

    assert!(exchange(&client, listener.addr, &header_only).await.is_none());
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);

    // The listener is still serving.
    let q = question("example.com", RecordType::A);
    assert!(exchange(&client, listener.addr, &encode_query(1, &q))
        .await
        .is_some());

    listener.stop().await;
}

#[tokio::test]
async fn test_rate_limited_datagrams_are_dropped() {
    let resolver = Arc::new(FixedResolver::new(Duration::ZERO));
    let handler =
        handler(resolver.clone()).with_admission_gate(Arc::new(TokenBucket::new(0.0, 1)));
    let listener = start_listener(handler, 8).await;
    let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let q = question("example.com", RecordType::A);

    assert!(exchange(&client, listener.addr, &encode_query(1, &q))
        .await
        .is_some());
    assert!(exchange(&client, listener.addr, &encode_query(2, &q))
        .await
        .is_none());
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);

    listener.stop().await;
}

#[tokio::test]
async fn test_datagrams_beyond_in_flight_limit_are_dropped() {
    let resolver = Arc::new(FixedResolver::new(Duration::from_millis(500)));
    let listener = start_listener(handler(resolver.clone()), 1).await;
    let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let q = question("example.com", RecordType::A);

    client
        .send_to(&encode_query(1, &q), listener.addr)
        .await
        .unwrap();
    client
        .send_to(&encode_query(2, &q), listener.addr)
        .await
        .unwrap();

    let mut buf = [0u8; 512];
    let (len, _) = tokio::time::timeout(Duration::from_secs(2), client.recv_from(&mut buf))
        .await
        .expect("first reply")
        .unwrap();
    assert_eq!(decode_message(&buf[..len]).unwrap().header.id, 1);

    let second =
        tokio::time::timeout(Duration::from_millis(700), client.recv_from(&mut buf)).await;
    assert!(second.is_err());
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);

    listener.stop().await;
}
