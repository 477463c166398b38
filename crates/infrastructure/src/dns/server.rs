use std::net::SocketAddr;
use std::sync::Arc;
use tinu_dns_application::ports::AdmissionGate;
use tinu_dns_application::use_cases::HandleDnsQueryUseCase;
use tracing::warn;

/// Glue between the listener and the dispatcher: admission control first,
/// then one dispatch per datagram.
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
    gate: Option<Arc<dyn AdmissionGate>>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self {
            use_case,
            gate: None,
        }
    }

    pub fn with_admission_gate(mut self, gate: Arc<dyn AdmissionGate>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Must be called once per datagram before any task is spawned for it.
    pub fn admit(&self, source: SocketAddr) -> bool {
        let allowed = self.gate.as_ref().map_or(true, |gate| gate.allow());
        if !allowed {
            warn!(client = %source, "Rate limit exceeded, dropping datagram");
        }
        allowed
    }

    pub async fn handle(&self, datagram: &[u8], source: SocketAddr) -> Option<Vec<u8>> {
        self.use_case.execute(datagram, source).await
    }
}
