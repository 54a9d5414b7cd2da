use super::codec::MessageCodec;
use crate::dns::transport::create_transport;
use async_trait::async_trait;
use hickory_proto::op::Message;
use queried_application::ports::Exchanger;
use queried_domain::{DomainError, Transport};
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::debug;

/// Sends a request to one server over the requester's transport and
/// returns the decoded reply.
pub struct HickoryExchanger {
    timeout: Duration,
}

impl HickoryExchanger {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Exchanger for HickoryExchanger {
    async fn exchange(
        &self,
        request: &Message,
        server: SocketAddr,
        transport: Transport,
    ) -> Result<Message, DomainError> {
        let start = Instant::now();
        let request_bytes = MessageCodec::encode(request)?;

        let upstream = create_transport(transport, server);
        let response = upstream.send(&request_bytes, self.timeout).await?;
        let reply = MessageCodec::decode(&response.bytes)?;

        if reply.id() != request.id() {
            return Err(DomainError::ExchangeFailed {
                server: server.to_string(),
                reason: format!(
                    "reply id {} does not match request id {}",
                    reply.id(),
                    request.id()
                ),
            });
        }

        debug!(
            server = %server,
            protocol = response.protocol_used,
            rcode = ?reply.response_code(),
            answers = reply.answers().len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Exchange complete"
        );

        Ok(reply)
    }
}
