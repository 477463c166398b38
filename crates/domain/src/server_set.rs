use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

/// Well-known root server addresses (a.root-servers.net first), used as the
/// only seed for a resolution that misses the cache.
pub const ROOT_SERVERS: [Ipv4Addr; 8] = [
    Ipv4Addr::new(198, 41, 0, 4),
    Ipv4Addr::new(199, 9, 14, 201),
    Ipv4Addr::new(192, 33, 4, 12),
    Ipv4Addr::new(199, 7, 91, 13),
    Ipv4Addr::new(192, 203, 230, 10),
    Ipv4Addr::new(192, 5, 5, 241),
    Ipv4Addr::new(192, 112, 36, 4),
    Ipv4Addr::new(198, 97, 190, 53),
];

/// Ordered candidate nameservers for one hop of a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerSet {
    servers: Vec<IpAddr>,
}

impl ServerSet {
    pub fn new(servers: Vec<IpAddr>) -> Self {
        Self { servers }
    }

    pub fn root_hints() -> Self {
        Self::new(ROOT_SERVERS.iter().copied().map(IpAddr::V4).collect())
    }

    /// Appends `addr` unless it is already present, keeping first-seen order.
    pub fn push(&mut self, addr: IpAddr) {
        if !self.servers.contains(&addr) {
            self.servers.push(addr);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &IpAddr> {
        self.servers.iter()
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

impl FromIterator<IpAddr> for ServerSet {
    fn from_iter<T: IntoIterator<Item = IpAddr>>(iter: T) -> Self {
        let mut set = ServerSet::default();
        for addr in iter {
            set.push(addr);
        }
        set
    }
}

impl fmt::Display for ServerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, addr) in self.servers.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", addr)?;
        }
        write!(f, "]")
    }
}
