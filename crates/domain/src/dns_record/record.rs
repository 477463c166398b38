use super::{RecordClass, RecordType};
use crate::Name;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Type-specific record data. Types whose RDATA embeds domain names are
/// decoded structurally so they can be re-encoded outside the buffer they
/// were read from; everything else is kept as opaque bytes tagged with the
/// type code they arrived under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Ns(Name),
    Cname(Name),
    Ptr(Name),
    Mx {
        preference: u16,
        exchange: Name,
    },
    Soa {
        mname: Name,
        rname: Name,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    },
    Other {
        record_type: RecordType,
        data: Vec<u8>,
    },
}

impl RData {
    pub fn record_type(&self) -> RecordType {
        match self {
            RData::A(_) => RecordType::A,
            RData::Aaaa(_) => RecordType::AAAA,
            RData::Ns(_) => RecordType::NS,
            RData::Cname(_) => RecordType::CNAME,
            RData::Ptr(_) => RecordType::PTR,
            RData::Mx { .. } => RecordType::MX,
            RData::Soa { .. } => RecordType::SOA,
            RData::Other { record_type, .. } => *record_type,
        }
    }
}

/// A decoded resource record. Immutable once decoded; cloned, never shared,
/// when a message moves into the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: Name,
    pub record_type: RecordType,
    pub class: RecordClass,
    pub ttl: u32,
    pub data: RData,
}

impl ResourceRecord {
    /// The record type is taken from the data.
    pub fn new(name: Name, ttl: u32, data: RData) -> Self {
        Self {
            name,
            record_type: data.record_type(),
            class: RecordClass::IN,
            ttl,
            data,
        }
    }

    /// Builds a record carrying opaque data of the given type.
    pub fn opaque(name: Name, record_type: RecordType, ttl: u32, data: Vec<u8>) -> Self {
        Self {
            name,
            record_type,
            class: RecordClass::IN,
            ttl,
            data: RData::Other { record_type, data },
        }
    }

    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        match self.data {
            RData::A(addr) => Some(addr),
            _ => None,
        }
    }

    pub fn nameserver(&self) -> Option<&Name> {
        match &self.data {
            RData::Ns(name) => Some(name),
            _ => None,
        }
    }
}
