use super::outcome::{DropReason, QueryOutcome};
use crate::ports::{Exchanger, PermutationSource};
use hickory_proto::op::Message;
use queried_domain::{LocalNetworkSet, QueryOrigin};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Recursive forwarding for names outside every configured zone.
///
/// Only local requesters are served. Resolvers are tried once each, in a
/// fresh random order per query, until one replies.
pub struct DefaultForwarder {
    local_networks: Arc<LocalNetworkSet>,
    resolvers: Arc<[SocketAddr]>,
    exchanger: Arc<dyn Exchanger>,
    permutation: Arc<dyn PermutationSource>,
}

impl DefaultForwarder {
    pub fn new(
        local_networks: Arc<LocalNetworkSet>,
        resolvers: Vec<SocketAddr>,
        exchanger: Arc<dyn Exchanger>,
        permutation: Arc<dyn PermutationSource>,
    ) -> Self {
        Self {
            local_networks,
            resolvers: resolvers.into(),
            exchanger,
            permutation,
        }
    }

    pub fn resolvers(&self) -> &[SocketAddr] {
        &self.resolvers
    }

    pub async fn handle(&self, request: &Message, origin: QueryOrigin) -> QueryOutcome {
        if !self.local_networks.is_local(origin.ip) {
            debug!(origin = %origin, "Refusing recursion for non-local requester");
            return QueryOutcome::Drop(DropReason::NonLocalRecursion);
        }

        let Some(transport) = origin.transport else {
            return QueryOutcome::Drop(DropReason::UnsupportedTransport);
        };

        let order = self.permutation.permutation(self.resolvers.len());
        debug!(strategy = "failover", resolvers = self.resolvers.len(), order = ?order, "Trying resolvers");

        for (position, index) in order.into_iter().enumerate() {
            let Some(resolver) = self.resolvers.get(index) else {
                continue;
            };

            match self.exchanger.exchange(request, *resolver, transport).await {
                Ok(reply) => {
                    debug!(resolver = %resolver, position, "Resolver responded");
                    return QueryOutcome::Reply(reply);
                }
                Err(e) => {
                    warn!(resolver = %resolver, transport = %transport, error = %e, position, "Failing over");
                }
            }
        }

        warn!(resolvers = self.resolvers.len(), "All resolvers failed, dropping query");
        QueryOutcome::Drop(DropReason::ResolversExhausted)
    }
}
