use crate::dns::forwarding::MessageCodec;
use hickory_proto::op::MessageType;
use queried_application::use_cases::{QueryOutcome, QueryRouter};
use queried_domain::{QueryOrigin, Transport};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::{debug, error};

/// How a query reached the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    Datagram { peer: SocketAddr },
    Stream { peer: SocketAddr },
    /// Any other transport; its peer address is not understood.
    Other,
}

pub struct OriginExtractor;

impl OriginExtractor {
    /// IPv4-mapped IPv6 peers (dual-stack sockets) are reported as plain IPv4.
    pub fn extract(connection: &Connection) -> QueryOrigin {
        match connection {
            Connection::Datagram { peer } => {
                QueryOrigin::new(Transport::Datagram, canonical_ip(peer.ip()))
            }
            Connection::Stream { peer } => {
                QueryOrigin::new(Transport::Stream, canonical_ip(peer.ip()))
            }
            Connection::Other => QueryOrigin::unsupported(),
        }
    }
}

fn canonical_ip(ip: IpAddr) -> IpAddr {
    ip.to_canonical()
}

/// Turns raw request bytes into raw reply bytes, or nothing when the query is dropped.
pub struct DnsRequestHandler {
    router: Arc<QueryRouter>,
}

impl DnsRequestHandler {
    pub fn new(router: Arc<QueryRouter>) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &QueryRouter {
        &self.router
    }

    pub async fn handle(&self, request_bytes: &[u8], connection: &Connection) -> Option<Vec<u8>> {
        let request = match MessageCodec::decode(request_bytes) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, len = request_bytes.len(), "Ignoring unparsable request");
                return None;
            }
        };

        if request.message_type() != MessageType::Query {
            debug!(id = request.id(), "Ignoring message that is not a query");
            return None;
        }

        let origin = OriginExtractor::extract(connection);

        match self.router.route(&request, origin).await {
            QueryOutcome::Reply(reply) => match MessageCodec::encode(&reply) {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    error!(error = %e, id = request.id(), "Failed to encode reply");
                    None
                }
            },
            QueryOutcome::Drop(reason) => {
                debug!(id = request.id(), origin = %origin, reason = %reason, "Dropping query");
                None
            }
        }
    }
}
