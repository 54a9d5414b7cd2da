pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use queried_domain::{DomainError, Transport};
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

pub enum UpstreamTransport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
}

impl UpstreamTransport {
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tcp(t) => DnsTransport::send(t, message_bytes, timeout).await,
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(_) => "UDP",
            Self::Tcp(_) => "TCP",
        }
    }
}

/// Picks the client transport matching the one the query arrived on.
pub fn create_transport(transport: Transport, server: SocketAddr) -> UpstreamTransport {
    match transport {
        Transport::Datagram => UpstreamTransport::Udp(udp::UdpTransport::new(server)),
        Transport::Stream => UpstreamTransport::Tcp(tcp::TcpTransport::new(server)),
    }
}

pub(crate) fn timeout_error(server: SocketAddr) -> DomainError {
    DomainError::ExchangeTimeout {
        server: server.to_string(),
    }
}

pub(crate) fn io_error(server: SocketAddr, what: &str, e: std::io::Error) -> DomainError {
    DomainError::ExchangeFailed {
        server: server.to_string(),
        reason: format!("{}: {}", what, e),
    }
}
