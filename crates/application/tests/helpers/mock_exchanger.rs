use async_trait::async_trait;
use hickory_proto::op::Message;
use queried_application::ports::{Exchanger, PermutationSource};
use queried_domain::{DomainError, Transport};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeCall {
    pub server: SocketAddr,
    pub transport: Transport,
    pub request_id: u16,
}

/// Exchanger double: replies are configured per server, every call is recorded.
/// Servers without a configured reply time out.
#[derive(Clone, Default)]
pub struct MockExchanger {
    replies: Arc<Mutex<HashMap<SocketAddr, Result<Message, DomainError>>>>,
    calls: Arc<Mutex<Vec<ExchangeCall>>>,
}

impl MockExchanger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, server: SocketAddr, reply: Message) {
        self.replies.lock().unwrap().insert(server, Ok(reply));
    }

    pub fn fail(&self, server: SocketAddr) {
        self.replies.lock().unwrap().insert(
            server,
            Err(DomainError::ExchangeFailed {
                server: server.to_string(),
                reason: "connection refused".to_string(),
            }),
        );
    }

    pub fn calls(&self) -> Vec<ExchangeCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Exchanger for MockExchanger {
    async fn exchange(
        &self,
        request: &Message,
        server: SocketAddr,
        transport: Transport,
    ) -> Result<Message, DomainError> {
        self.calls.lock().unwrap().push(ExchangeCall {
            server,
            transport,
            request_id: request.id(),
        });

        self.replies
            .lock()
            .unwrap()
            .get(&server)
            .cloned()
            .unwrap_or_else(|| {
                Err(DomainError::ExchangeTimeout {
                    server: server.to_string(),
                })
            })
    }
}

/// Always yields the same visiting order.
pub struct FixedPermutation(pub Vec<usize>);

impl PermutationSource for FixedPermutation {
    fn permutation(&self, _len: usize) -> Vec<usize> {
        self.0.clone()
    }
}
