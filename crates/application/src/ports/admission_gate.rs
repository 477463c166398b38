/// Pre-check consulted once per inbound datagram, before any work is
/// scheduled for it.
pub trait AdmissionGate: Send + Sync {
    fn allow(&self) -> bool;
}
