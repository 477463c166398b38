use std::fmt;
use std::time::Duration;
use tinu_dns_domain::{Message, Name, Question, RecordType};

/// Exact owner name (case as received) plus query type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub name: Name,
    pub record_type: RecordType,
}

impl CacheKey {
    pub fn new(name: Name, record_type: RecordType) -> Self {
        Self { name, record_type }
    }

    pub fn for_question(question: &Question) -> Self {
        Self::new(question.name.clone(), question.record_type)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.record_type)
    }
}

/// Shared, lock-guarded store of resolved messages.
pub trait ResponseCache: Send + Sync {
    /// Returns a copy of the entry if it has not yet expired.
    fn get(&self, key: &CacheKey) -> Option<Message>;

    /// Stores `message` until `ttl` from now, replacing any previous entry.
    fn put(&self, key: CacheKey, message: Message, ttl: Duration);
}
