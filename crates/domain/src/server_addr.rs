use crate::DomainError;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// Address of a remote DNS server (zone upstream or pool resolver).
///
/// Accepts `ip:port`, `[v6]:port` and a bare `ip`, in which case port 53 is implied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServerAddr(SocketAddr);

impl ServerAddr {
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let s = s.trim();
        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(Self(addr));
        }
        let bare = s.trim_start_matches('[').trim_end_matches(']');
        bare.parse::<IpAddr>()
            .map(|ip| Self(SocketAddr::new(ip, DEFAULT_DNS_PORT)))
            .map_err(|_| DomainError::InvalidAddress(s.to_string()))
    }

    /// Parses a bind target. `:port` binds every IPv4 interface.
    pub fn parse_listen(s: &str) -> Result<Self, DomainError> {
        let s = s.trim();
        match s.strip_prefix(':') {
            Some(port) => port
                .parse::<u16>()
                .map(|port| Self(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port)))
                .map_err(|_| DomainError::InvalidAddress(s.to_string())),
            None => s
                .parse::<SocketAddr>()
                .map(Self)
                .map_err(|_| DomainError::InvalidAddress(s.to_string())),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        self.0
    }
}

impl FromStr for ServerAddr {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ServerAddr> for SocketAddr {
    fn from(addr: ServerAddr) -> Self {
        addr.0
    }
}
