use ring::rand::{SecureRandom, SystemRandom};
use tinu_dns_domain::TransportError;

/// Uniform 16-bit transaction IDs from the operating system's CSPRNG.
pub struct QueryIdGenerator {
    rng: SystemRandom,
}

impl QueryIdGenerator {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }

    pub fn next_id(&self) -> Result<u16, TransportError> {
        let mut bytes = [0u8; 2];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| TransportError::RandomSource)?;
        Ok(u16::from_be_bytes(bytes))
    }
}

impl Default for QueryIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
