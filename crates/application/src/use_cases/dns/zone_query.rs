use super::outcome::{DropReason, QueryOutcome};
use super::reply::{a_record, fqdn, reply_to};
use crate::ports::Exchanger;
use hickory_proto::op::Message;
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record, RecordType};
use queried_domain::{ForwardedZone, LocalNetworkSet, QueryOrigin};
use std::sync::Arc;
use tracing::{debug, warn};

/// Answers queries that fall under a forwarded zone.
///
/// One engine serves every zone; the matching [`ForwardedZone`] is passed per
/// request. For each query the engine:
///
/// 1. drops non-local requests to private zones,
/// 2. answers A questions from the override tables (non-local table first for
///    non-local requesters),
/// 3. otherwise forwards the untouched request to the zone upstream, dropping
///    the query if the exchange fails,
/// 4. forces the AA bit on authoritative zones,
/// 5. rewrites A records of upstream replies through the override tables when
///    the zone asks for it.
pub struct ZoneQueryEngine {
    local_networks: Arc<LocalNetworkSet>,
    exchanger: Arc<dyn Exchanger>,
}

impl ZoneQueryEngine {
    pub fn new(local_networks: Arc<LocalNetworkSet>, exchanger: Arc<dyn Exchanger>) -> Self {
        Self {
            local_networks,
            exchanger,
        }
    }

    pub async fn handle(
        &self,
        zone: &ForwardedZone,
        request: &Message,
        origin: QueryOrigin,
    ) -> QueryOutcome {
        let local = self.local_networks.is_local(origin.ip);

        if zone.private && !local {
            debug!(zone = %zone.name(), origin = %origin, "Dropping non-local query for private zone");
            return QueryOutcome::Drop(DropReason::PrivateZone);
        }

        let mut reply = reply_to(request);
        let overridden = Self::answer_from_overrides(zone, request, local, &mut reply);

        if !overridden {
            let Some(transport) = origin.transport else {
                debug!(zone = %zone.name(), "Cannot forward query without a known transport");
                return QueryOutcome::Drop(DropReason::UnsupportedTransport);
            };

            reply = match self
                .exchanger
                .exchange(request, zone.upstream, transport)
                .await
            {
                Ok(upstream_reply) => upstream_reply,
                Err(e) => {
                    warn!(
                        zone = %zone.name(),
                        upstream = %zone.upstream,
                        transport = %transport,
                        error = %e,
                        "Zone upstream exchange failed, dropping query"
                    );
                    return QueryOutcome::Drop(DropReason::UpstreamUnavailable);
                }
            };

            if zone.override_responses {
                let answers = Self::rewrite_records(zone, local, reply.take_answers());
                reply.add_answers(answers);
                let additionals = Self::rewrite_records(zone, local, reply.take_additionals());
                reply.add_additionals(additionals);
            }
        }

        if zone.authoritative {
            reply.set_authoritative(true);
        }

        QueryOutcome::Reply(reply)
    }

    /// Appends one synthesized answer per A question with an override hit.
    /// Returns whether any answer was produced.
    fn answer_from_overrides(
        zone: &ForwardedZone,
        request: &Message,
        local: bool,
        reply: &mut Message,
    ) -> bool {
        let mut overridden = false;

        for query in request.queries() {
            if query.query_type() != RecordType::A {
                continue;
            }
            let name = fqdn(query.name());
            let Some(label) = zone.host_label(&name) else {
                continue;
            };

            let hit = if local {
                zone.overrides.resolve(label)
            } else {
                zone.non_local_overrides
                    .resolve(label)
                    .or_else(|| zone.overrides.resolve(label))
            };

            if let Some(ip) = hit {
                debug!(zone = %zone.name(), name = %name, ip = %ip, local, "Answering from override");
                reply.add_answer(a_record(query, ip));
                overridden = true;
            }
        }

        overridden
    }

    /// Replaces the address of every A record under the zone whose host label
    /// has an override. Other records are left as received.
    fn rewrite_records(zone: &ForwardedZone, local: bool, records: Vec<Record>) -> Vec<Record> {
        records
            .into_iter()
            .map(|record| Self::rewrite_record(zone, local, record))
            .collect()
    }

    fn rewrite_record(zone: &ForwardedZone, local: bool, record: Record) -> Record {
        if !matches!(record.data(), RData::A(_)) {
            return record;
        }
        let owner = fqdn(record.name());
        let Some(label) = zone.host_label(&owner) else {
            return record;
        };

        let hit = zone.overrides.resolve(label).or_else(|| {
            if local {
                None
            } else {
                zone.non_local_overrides.resolve(label)
            }
        });

        match hit {
            Some(ip) => {
                debug!(zone = %zone.name(), name = %owner, ip = %ip, "Rewriting upstream answer");
                let mut rewritten =
                    Record::from_rdata(record.name().clone(), record.ttl(), RData::A(A(ip)));
                rewritten.set_dns_class(record.dns_class());
                rewritten
            }
            None => record,
        }
    }
}
