use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use tinu_dns_application::ports::UpstreamReply;
use tinu_dns_domain::{Message, Name, Question, RData, RecordType, ResourceRecord};

pub fn name(s: &str) -> Name {
    s.parse().unwrap()
}

pub fn question(domain: &str, record_type: RecordType) -> Question {
    Question::new(name(domain), record_type)
}

pub fn server(ip: &str) -> SocketAddr {
    SocketAddr::new(ip.parse().unwrap(), 53)
}

/// Builds upstream replies the way real nameservers shape them.
pub struct ReplyBuilder {
    message: Message,
    server: SocketAddr,
}

impl ReplyBuilder {
    pub fn new(question: &Question) -> Self {
        Self {
            message: Message::response_to(question),
            server: server("198.41.0.4"),
        }
    }

    pub fn from_server(mut self, ip: &str) -> Self {
        self.server = server(ip);
        self
    }

    pub fn authoritative(mut self) -> Self {
        self.message.header.authoritative = true;
        self
    }

    pub fn answer_a(mut self, owner: &str, addr: Ipv4Addr, ttl: u32) -> Self {
        self.message
            .answers
            .push(ResourceRecord::new(name(owner), ttl, RData::A(addr)));
        self
    }

    pub fn delegate(mut self, zone: &str, nameserver: &str) -> Self {
        self.message.authorities.push(ResourceRecord::new(
            name(zone),
            172_800,
            RData::Ns(name(nameserver)),
        ));
        self
    }

    pub fn authority_soa(mut self, zone: &str) -> Self {
        self.message.authorities.push(ResourceRecord::new(
            name(zone),
            900,
            RData::Soa {
                mname: name(&format!("ns.{}", zone)),
                rname: name(&format!("hostmaster.{}", zone)),
                serial: 1,
                refresh: 7200,
                retry: 900,
                expire: 1_209_600,
                minimum: 300,
            },
        ));
        self
    }

    pub fn glue_a(mut self, owner: &str, addr: Ipv4Addr) -> Self {
        self.message
            .additionals
            .push(ResourceRecord::new(name(owner), 172_800, RData::A(addr)));
        self
    }

    pub fn glue_aaaa(mut self, owner: &str, addr: Ipv6Addr) -> Self {
        self.message
            .additionals
            .push(ResourceRecord::new(name(owner), 172_800, RData::Aaaa(addr)));
        self
    }

    pub fn build(self) -> UpstreamReply {
        UpstreamReply::new(self.message, self.server)
    }
}

/// Root referral for `.com` with one glued nameserver.
pub fn com_referral(q: &Question) -> UpstreamReply {
    ReplyBuilder::new(q)
        .delegate("com", "a.gtld-servers.net")
        .glue_a("a.gtld-servers.net", Ipv4Addr::new(192, 5, 6, 30))
        .build()
}

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}
