use std::fmt;

const QR_BIT: u16 = 0x8000;
const AA_BIT: u16 = 0x0400;
const TC_BIT: u16 = 0x0200;
const RD_BIT: u16 = 0x0100;
const RA_BIT: u16 = 0x0080;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpCode {
    #[default]
    Query,
    Status,
    Notify,
    Update,
    Unknown(u8),
}

impl OpCode {
    pub fn to_u8(self) -> u8 {
        match self {
            OpCode::Query => 0,
            OpCode::Status => 2,
            OpCode::Notify => 4,
            OpCode::Update => 5,
            OpCode::Unknown(v) => v & 0x0F,
        }
    }

    pub fn from_u8(value: u8) -> Self {
        match value & 0x0F {
            0 => OpCode::Query,
            2 => OpCode::Status,
            4 => OpCode::Notify,
            5 => OpCode::Update,
            other => OpCode::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseCode {
    #[default]
    NoError,
    FormErr,
    ServFail,
    NxDomain,
    NotImp,
    Refused,
    Unknown(u8),
}

impl ResponseCode {
    pub fn to_u8(self) -> u8 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::FormErr => 1,
            ResponseCode::ServFail => 2,
            ResponseCode::NxDomain => 3,
            ResponseCode::NotImp => 4,
            ResponseCode::Refused => 5,
            ResponseCode::Unknown(v) => v & 0x0F,
        }
    }

    pub fn from_u8(value: u8) -> Self {
        match value & 0x0F {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormErr,
            2 => ResponseCode::ServFail,
            3 => ResponseCode::NxDomain,
            4 => ResponseCode::NotImp,
            5 => ResponseCode::Refused,
            other => ResponseCode::Unknown(other),
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseCode::NoError => write!(f, "NOERROR"),
            ResponseCode::FormErr => write!(f, "FORMERR"),
            ResponseCode::ServFail => write!(f, "SERVFAIL"),
            ResponseCode::NxDomain => write!(f, "NXDOMAIN"),
            ResponseCode::NotImp => write!(f, "NOTIMP"),
            ResponseCode::Refused => write!(f, "REFUSED"),
            ResponseCode::Unknown(v) => write!(f, "RCODE{}", v),
        }
    }
}

/// Message header without section counts; those are derived from the
/// section lengths when encoding and checked against them when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,
    pub response: bool,
    pub opcode: OpCode,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub rcode: ResponseCode,
}

impl Header {
    pub fn flags(&self) -> u16 {
        let mut flags = ((self.opcode.to_u8() as u16) << 11) | self.rcode.to_u8() as u16;
        if self.response {
            flags |= QR_BIT;
        }
        if self.authoritative {
            flags |= AA_BIT;
        }
        if self.truncated {
            flags |= TC_BIT;
        }
        if self.recursion_desired {
            flags |= RD_BIT;
        }
        if self.recursion_available {
            flags |= RA_BIT;
        }
        flags
    }

    /// The reserved Z bits are dropped.
    pub fn from_parts(id: u16, flags: u16) -> Self {
        Self {
            id,
            response: flags & QR_BIT != 0,
            opcode: OpCode::from_u8((flags >> 11) as u8),
            authoritative: flags & AA_BIT != 0,
            truncated: flags & TC_BIT != 0,
            recursion_desired: flags & RD_BIT != 0,
            recursion_available: flags & RA_BIT != 0,
            rcode: ResponseCode::from_u8((flags & 0x000F) as u8),
        }
    }
}
