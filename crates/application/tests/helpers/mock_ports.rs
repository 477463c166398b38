use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::{Duration, Instant};
use tinu_dns_application::ports::{
    CacheKey, DnsResolver, Resolution, ResolutionOutcome, ResponseCache, UpstreamReply,
    UpstreamTransport,
};
use tinu_dns_domain::{Message, Question, ServerSet, TransportError};

/// Replays a fixed script of replies, one per call, and records the server
/// set each call was given.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<UpstreamReply, TransportError>>>,
    calls: Mutex<Vec<ServerSet>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<UpstreamReply, TransportError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers every call with a clone of `reply`.
    pub fn repeating(reply: UpstreamReply, times: usize) -> Self {
        Self::new((0..times).map(|_| Ok(reply.clone())).collect())
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<ServerSet> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamTransport for ScriptedTransport {
    async fn query(
        &self,
        servers: &ServerSet,
        _question: &Question,
    ) -> Result<UpstreamReply, TransportError> {
        self.calls.lock().unwrap().push(servers.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(TransportError::NoReachableServer))
    }
}

#[derive(Default)]
pub struct MockResponseCache {
    entries: RwLock<HashMap<CacheKey, (Message, Instant)>>,
    puts: AtomicUsize,
    last_ttl: Mutex<Option<Duration>>,
}

impl MockResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn last_ttl(&self) -> Option<Duration> {
        *self.last_ttl.lock().unwrap()
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.read().unwrap().contains_key(key)
    }
}

impl ResponseCache for MockResponseCache {
    fn get(&self, key: &CacheKey) -> Option<Message> {
        self.entries
            .read()
            .unwrap()
            .get(key)
            .filter(|(_, expires_at)| Instant::now() < *expires_at)
            .map(|(message, _)| message.clone())
    }

    fn put(&self, key: CacheKey, message: Message, ttl: Duration) {
        self.puts.fetch_add(1, Ordering::SeqCst);
        *self.last_ttl.lock().unwrap() = Some(ttl);
        self.entries
            .write()
            .unwrap()
            .insert(key, (message, Instant::now() + ttl));
    }
}

/// Resolver returning a fixed resolution and counting invocations.
pub struct MockDnsResolver {
    resolution: Resolution,
    calls: AtomicUsize,
}

impl MockDnsResolver {
    pub fn answering(message: Message) -> Self {
        Self {
            resolution: Resolution::new(message, ResolutionOutcome::Authoritative, 2),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, _question: &Question) -> Resolution {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.resolution.clone()
    }
}
