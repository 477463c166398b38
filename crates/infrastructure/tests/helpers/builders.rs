use std::net::{IpAddr, Ipv4Addr};
use tinu_dns_domain::{
    decode_message, encode_message, Message, Name, Question, RData, RecordType, ResourceRecord,
    ServerSet,
};

pub fn name(s: &str) -> Name {
    s.parse().unwrap()
}

pub fn question(domain: &str, record_type: RecordType) -> Question {
    Question::new(name(domain), record_type)
}

pub fn loopback_set() -> ServerSet {
    [IpAddr::V4(Ipv4Addr::LOCALHOST)].into_iter().collect()
}

/// Reply to `query` with the same ID and question, shaped by `build`.
pub fn reply_to(query: &[u8], build: impl FnOnce(&mut Message)) -> Vec<u8> {
    let query = decode_message(query).unwrap();
    let mut reply = Message::response_to(query.question().unwrap());
    reply.header.id = query.header.id;
    build(&mut reply);
    encode_message(&reply).unwrap()
}

pub fn with_id(mut datagram: Vec<u8>, id: u16) -> Vec<u8> {
    datagram[..2].copy_from_slice(&id.to_be_bytes());
    datagram
}

pub fn authoritative_a(owner: &str, addr: Ipv4Addr, ttl: u32) -> impl FnOnce(&mut Message) {
    let owner = name(owner);
    move |reply| {
        reply.header.authoritative = true;
        reply
            .answers
            .push(ResourceRecord::new(owner, ttl, RData::A(addr)));
    }
}

/// Referral delegating `zone` to `nameserver`, glued to `glue`.
pub fn referral(zone: &str, nameserver: &str, glue: Ipv4Addr) -> impl FnOnce(&mut Message) {
    let zone = name(zone);
    let nameserver = name(nameserver);
    move |reply| {
        reply.authorities.push(ResourceRecord::new(
            zone,
            172_800,
            RData::Ns(nameserver.clone()),
        ));
        reply
            .additionals
            .push(ResourceRecord::new(nameserver, 172_800, RData::A(glue)));
    }
}

pub fn encode_query(id: u16, q: &Question) -> Vec<u8> {
    let mut message = Message::query(id, q.clone());
    message.header.recursion_desired = true;
    encode_message(&message).unwrap()
}
