use async_trait::async_trait;
use hickory_proto::op::Message;
use queried_domain::{DomainError, Transport};
use std::net::SocketAddr;

/// Sends a DNS message to a remote server and waits for its reply.
///
/// Implementations enforce their own timeout and never retry.
#[async_trait]
pub trait Exchanger: Send + Sync {
    async fn exchange(
        &self,
        request: &Message,
        server: SocketAddr,
        transport: Transport,
    ) -> Result<Message, DomainError>;
}
