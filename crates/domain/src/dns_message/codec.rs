//! Conversion between [`Message`] and RFC 1035 wire format.
//!
//! Decoding follows compression pointers; encoding always writes names
//! uncompressed and refuses to produce more than [`MAX_UDP_PAYLOAD`] bytes.

use super::reader::WireReader;
use super::writer::WireWriter;
use super::{Header, Message, MAX_UDP_PAYLOAD};
use crate::errors::{DecodeError, EncodeError};
use crate::{Question, RData, RecordClass, RecordType, ResourceRecord};
use std::net::{Ipv4Addr, Ipv6Addr};

struct SectionCounts {
    questions: u16,
    answers: u16,
    authorities: u16,
    additionals: u16,
}

fn read_header(reader: &mut WireReader<'_>) -> Result<(Header, SectionCounts), DecodeError> {
    let id = reader.read_u16()?;
    let flags = reader.read_u16()?;
    let counts = SectionCounts {
        questions: reader.read_u16()?,
        answers: reader.read_u16()?,
        authorities: reader.read_u16()?,
        additionals: reader.read_u16()?,
    };
    Ok((Header::from_parts(id, flags), counts))
}

fn read_question(reader: &mut WireReader<'_>) -> Result<Question, DecodeError> {
    let name = reader.read_name()?;
    let record_type = RecordType::from_u16(reader.read_u16()?);
    let class = RecordClass::from_u16(reader.read_u16()?);
    Ok(Question {
        name,
        record_type,
        class,
    })
}

fn check_rdata_len(
    rtype: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), DecodeError> {
    if expected != actual {
        return Err(DecodeError::RDataLength {
            rtype,
            expected,
            actual,
        });
    }
    Ok(())
}

fn read_record(reader: &mut WireReader<'_>) -> Result<ResourceRecord, DecodeError> {
    let name = reader.read_name()?;
    let record_type = RecordType::from_u16(reader.read_u16()?);
    let class = RecordClass::from_u16(reader.read_u16()?);
    let ttl = reader.read_u32()?;
    let rdlength = reader.read_u16()? as usize;
    let start = reader.position();

    let data = match record_type {
        RecordType::A => {
            check_rdata_len("A", 4, rdlength)?;
            let b = reader.read_bytes(4)?;
            RData::A(Ipv4Addr::new(b[0], b[1], b[2], b[3]))
        }
        RecordType::AAAA => {
            check_rdata_len("AAAA", 16, rdlength)?;
            let mut octets = [0u8; 16];
            octets.copy_from_slice(reader.read_bytes(16)?);
            RData::Aaaa(Ipv6Addr::from(octets))
        }
        RecordType::NS => RData::Ns(reader.read_name()?),
        RecordType::CNAME => RData::Cname(reader.read_name()?),
        RecordType::PTR => RData::Ptr(reader.read_name()?),
        RecordType::MX => RData::Mx {
            preference: reader.read_u16()?,
            exchange: reader.read_name()?,
        },
        RecordType::SOA => RData::Soa {
            mname: reader.read_name()?,
            rname: reader.read_name()?,
            serial: reader.read_u32()?,
            refresh: reader.read_u32()?,
            retry: reader.read_u32()?,
            expire: reader.read_u32()?,
            minimum: reader.read_u32()?,
        },
        _ => RData::Other {
            record_type,
            data: reader.read_bytes(rdlength)?.to_vec(),
        },
    };

    check_rdata_len(record_type.as_str(), rdlength, reader.position() - start)?;

    Ok(ResourceRecord {
        name,
        record_type,
        class,
        ttl,
        data,
    })
}

fn read_records(
    reader: &mut WireReader<'_>,
    count: u16,
) -> Result<Vec<ResourceRecord>, DecodeError> {
    (0..count).map(|_| read_record(reader)).collect()
}

/// Decodes a complete message. Every section must contain exactly as many
/// entries as its header count claims.
pub fn decode_message(bytes: &[u8]) -> Result<Message, DecodeError> {
    let mut reader = WireReader::new(bytes);
    let (header, counts) = read_header(&mut reader)?;

    let questions = (0..counts.questions)
        .map(|_| read_question(&mut reader))
        .collect::<Result<Vec<_>, _>>()?;
    let answers = read_records(&mut reader, counts.answers)?;
    let authorities = read_records(&mut reader, counts.authorities)?;
    let additionals = read_records(&mut reader, counts.additionals)?;

    Ok(Message {
        header,
        questions,
        answers,
        authorities,
        additionals,
    })
}

/// Decodes only the header and the first question, ignoring the rest of
/// the datagram.
pub fn decode_question(bytes: &[u8]) -> Result<(Header, Question), DecodeError> {
    let mut reader = WireReader::new(bytes);
    let (header, counts) = read_header(&mut reader)?;
    if counts.questions == 0 {
        return Err(DecodeError::MissingQuestion);
    }
    let question = read_question(&mut reader)?;
    Ok((header, question))
}

fn section_count(len: usize) -> Result<u16, EncodeError> {
    u16::try_from(len).map_err(|_| EncodeError::TooManyRecords { count: len })
}

fn write_rdata(writer: &mut WireWriter, data: &RData) -> Result<(), EncodeError> {
    match data {
        RData::A(addr) => writer.put_slice(&addr.octets()),
        RData::Aaaa(addr) => writer.put_slice(&addr.octets()),
        RData::Ns(name) | RData::Cname(name) | RData::Ptr(name) => writer.put_name(name)?,
        RData::Mx {
            preference,
            exchange,
        } => {
            writer.put_u16(*preference);
            writer.put_name(exchange)?;
        }
        RData::Soa {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        } => {
            writer.put_name(mname)?;
            writer.put_name(rname)?;
            for value in [serial, refresh, retry, expire, minimum] {
                writer.put_u32(*value);
            }
        }
        RData::Other { data, .. } => writer.put_slice(data),
    }
    Ok(())
}

fn write_record(writer: &mut WireWriter, record: &ResourceRecord) -> Result<(), EncodeError> {
    writer.put_name(&record.name)?;
    writer.put_u16(record.record_type.to_u16());
    writer.put_u16(record.class.to_u16());
    writer.put_u32(record.ttl);

    let rdlength_at = writer.len();
    writer.put_u16(0);
    write_rdata(writer, &record.data)?;

    let length = writer.len() - rdlength_at - 2;
    let rdlength = u16::try_from(length).map_err(|_| EncodeError::RDataTooLong { length })?;
    writer.patch_u16(rdlength_at, rdlength);
    Ok(())
}

/// Serializes a message. Section counts come from the section lengths;
/// output larger than [`MAX_UDP_PAYLOAD`] is an error.
pub fn encode_message(message: &Message) -> Result<Vec<u8>, EncodeError> {
    let mut writer = WireWriter::with_capacity(MAX_UDP_PAYLOAD);

    writer.put_u16(message.header.id);
    writer.put_u16(message.header.flags());
    writer.put_u16(section_count(message.questions.len())?);
    writer.put_u16(section_count(message.answers.len())?);
    writer.put_u16(section_count(message.authorities.len())?);
    writer.put_u16(section_count(message.additionals.len())?);

    for question in &message.questions {
        writer.put_name(&question.name)?;
        writer.put_u16(question.record_type.to_u16());
        writer.put_u16(question.class.to_u16());
    }

    for record in message
        .answers
        .iter()
        .chain(&message.authorities)
        .chain(&message.additionals)
    {
        write_record(&mut writer, record)?;
    }

    if writer.len() > MAX_UDP_PAYLOAD {
        return Err(EncodeError::MessageTooLarge {
            size: writer.len(),
            max: MAX_UDP_PAYLOAD,
        });
    }
    Ok(writer.into_vec())
}
