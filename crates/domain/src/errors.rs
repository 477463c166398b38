use std::net::SocketAddr;
use thiserror::Error;

/// Failure to parse DNS wire data. Always recoverable: the datagram that
/// produced it is dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("message truncated at offset {offset}")]
    Truncated { offset: usize },

    #[error("compression pointer at offset {offset} targets {target} (loop or forward reference)")]
    PointerLoop { offset: usize, target: usize },

    #[error("unsupported label type 0x{value:02x} at offset {offset}")]
    InvalidLabelType { offset: usize, value: u8 },

    #[error("name too long: {length} bytes exceeds maximum of 255")]
    NameTooLong { length: usize },

    #[error("RDATA length mismatch for {rtype}: expected {expected}, got {actual}")]
    RDataLength {
        rtype: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("message carries no question")]
    MissingQuestion,
}

/// Failure to serialize a message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("message too large: {size} bytes exceeds maximum of {max}")]
    MessageTooLarge { size: usize, max: usize },

    #[error("label too long: {length} bytes exceeds maximum of 63")]
    LabelTooLong { length: usize },

    #[error("name too long: {length} bytes exceeds maximum of 255")]
    NameTooLong { length: usize },

    #[error("RDATA too long: {length} bytes")]
    RDataTooLong { length: usize },

    #[error("too many records in one section: {count}")]
    TooManyRecords { count: usize },
}

/// Failure of one upstream round trip. Aborts the current resolution,
/// never the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("no server in the candidate set is reachable")]
    NoReachableServer,

    #[error("reply carries {received} question(s), query carried {sent}")]
    QuestionMismatch { sent: usize, received: usize },

    #[error("reply transaction ID {received} does not match query ID {expected}")]
    TransactionIdMismatch { expected: u16, received: u16 },

    #[error("timed out waiting for reply from {server}")]
    Timeout { server: SocketAddr },

    #[error("I/O error talking to {server}: {message}")]
    Io { server: SocketAddr, message: String },

    #[error("failed to decode reply: {0}")]
    Decode(#[from] DecodeError),

    #[error("failed to encode query: {0}")]
    Encode(#[from] EncodeError),

    #[error("secure random source unavailable")]
    RandomSource,
}

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DecodeError::Truncated { offset: 12 };
        assert_eq!(err.to_string(), "message truncated at offset 12");

        let err = EncodeError::MessageTooLarge { size: 600, max: 512 };
        assert_eq!(
            err.to_string(),
            "message too large: 600 bytes exceeds maximum of 512"
        );
    }

    #[test]
    fn test_transport_error_wraps_decode() {
        let err: TransportError = DecodeError::MissingQuestion.into();
        assert!(matches!(err, TransportError::Decode(DecodeError::MissingQuestion)));
    }
}
