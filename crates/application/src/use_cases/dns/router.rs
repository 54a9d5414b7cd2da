use super::default_forward::DefaultForwarder;
use super::outcome::QueryOutcome;
use super::reply::fqdn;
use super::zone_query::ZoneQueryEngine;
use crate::ports::{Exchanger, PermutationSource};
use hickory_proto::op::Message;
use queried_domain::{Config, ConfigError, ForwardedZone, QueryOrigin};
use std::sync::Arc;
use tracing::debug;

/// Dispatches each query to the zone engine or to the default forwarder.
///
/// Zones are matched on the first question's name, longest zone first, so a
/// query for `db.dc1.consul.` prefers zone `dc1.consul.` over `consul.`.
pub struct QueryRouter {
    zones: Vec<ForwardedZone>,
    zone_engine: ZoneQueryEngine,
    default_forwarder: DefaultForwarder,
}

impl QueryRouter {
    pub fn new(
        mut zones: Vec<ForwardedZone>,
        zone_engine: ZoneQueryEngine,
        default_forwarder: DefaultForwarder,
    ) -> Self {
        zones.sort_by(|a, b| b.name().len().cmp(&a.name().len()));
        Self {
            zones,
            zone_engine,
            default_forwarder,
        }
    }

    /// Builds the full routing table and both engines from a loaded configuration.
    pub fn from_config(
        config: &Config,
        exchanger: Arc<dyn Exchanger>,
        permutation: Arc<dyn PermutationSource>,
    ) -> Result<Self, ConfigError> {
        let local_networks = Arc::new(config.local_network_set()?);
        let resolvers = config
            .resolver_addrs()?
            .into_iter()
            .map(|addr| addr.socket_addr())
            .collect();

        let zone_engine = ZoneQueryEngine::new(Arc::clone(&local_networks), Arc::clone(&exchanger));
        let default_forwarder =
            DefaultForwarder::new(local_networks, resolvers, exchanger, permutation);

        Ok(Self::new(config.zones()?, zone_engine, default_forwarder))
    }

    pub fn find_zone(&self, name: &str) -> Option<&ForwardedZone> {
        self.zones.iter().find(|zone| zone.covers(name))
    }

    pub fn zones(&self) -> &[ForwardedZone] {
        &self.zones
    }

    pub async fn route(&self, request: &Message, origin: QueryOrigin) -> QueryOutcome {
        let zone = request
            .queries()
            .first()
            .and_then(|query| self.find_zone(&fqdn(query.name())));

        match zone {
            Some(zone) => {
                debug!(zone = %zone.name(), origin = %origin, id = request.id(), "Routing to zone");
                self.zone_engine.handle(zone, request, origin).await
            }
            None => {
                debug!(origin = %origin, id = request.id(), "Routing to default forwarder");
                self.default_forwarder.handle(request, origin).await
            }
        }
    }
}
