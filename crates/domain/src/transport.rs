use std::fmt;
use std::net::IpAddr;

/// The two transports a query can arrive on and be forwarded over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transport {
    /// Connectionless (UDP).
    Datagram,
    /// Connection-oriented (TCP).
    Stream,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Datagram => "udp",
            Self::Stream => "tcp",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a query came from. Both fields are `None` when the connection kind
/// is not one of the supported transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOrigin {
    pub transport: Option<Transport>,
    pub ip: Option<IpAddr>,
}

impl QueryOrigin {
    pub fn new(transport: Transport, ip: IpAddr) -> Self {
        Self {
            transport: Some(transport),
            ip: Some(ip),
        }
    }

    pub fn unsupported() -> Self {
        Self {
            transport: None,
            ip: None,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.transport.is_some()
    }
}

impl fmt::Display for QueryOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.transport, self.ip) {
            (Some(t), Some(ip)) => write!(f, "{}://{}", t, ip),
            _ => f.write_str("unsupported"),
        }
    }
}
