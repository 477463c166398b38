//! Tinu DNS Domain Layer
pub mod config;
pub mod dns_message;
pub mod dns_record;
pub mod errors;
pub mod name;
pub mod question;
pub mod server_set;

pub use config::{CliOverrides, Config};
pub use dns_message::{
    decode_message, decode_question, encode_message, Header, Message, OpCode, ResponseCode,
    MAX_UDP_PAYLOAD,
};
pub use dns_record::{RData, RecordClass, RecordType, ResourceRecord};
pub use errors::{DecodeError, DomainError, EncodeError, TransportError};
pub use name::Name;
pub use question::Question;
pub use server_set::{ServerSet, ROOT_SERVERS};
