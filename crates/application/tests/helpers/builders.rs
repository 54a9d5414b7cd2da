use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::{A, CNAME};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use queried_domain::{ForwardedZone, LocalNetworkSet, QueryOrigin, Transport, ZoneConfig};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

pub const LOCAL_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 5));
pub const REMOTE_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8));

pub fn local_origin() -> QueryOrigin {
    QueryOrigin::new(Transport::Datagram, LOCAL_IP)
}

pub fn remote_origin() -> QueryOrigin {
    QueryOrigin::new(Transport::Datagram, REMOTE_IP)
}

pub fn local_networks() -> Arc<LocalNetworkSet> {
    Arc::new(LocalNetworkSet::from_cidrs(&["127.0.0.0/8", "10.0.0.0/8", "192.168.0.0/16"]).unwrap())
}

pub fn addr(s: &str) -> SocketAddr {
    s.parse().unwrap()
}

/// Keeps the case of `s`; `Name::from_str` would lowercase it.
pub fn name(s: &str) -> Name {
    Name::from_ascii(s).unwrap()
}

pub fn query(domain: &str, record_type: RecordType) -> Message {
    let mut message = Message::new(0x4242, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(Query::query(name(domain), record_type));
    message
}

pub fn a_query(domain: &str) -> Message {
    query(domain, RecordType::A)
}

/// A query decoded from raw wire bytes, the way the server receives it.
pub fn wire_a_query(labels: &[&str]) -> Message {
    let mut bytes = vec![0x42, 0x42, 0x01, 0x00, 0, 1, 0, 0, 0, 0, 0, 0];
    for label in labels {
        bytes.push(label.len() as u8);
        bytes.extend_from_slice(label.as_bytes());
    }
    bytes.extend_from_slice(&[0, 0, 1, 0, 1]);
    Message::from_vec(&bytes).unwrap()
}

pub fn a_record(owner: &str, ip: Ipv4Addr, ttl: u32) -> Record {
    Record::from_rdata(name(owner), ttl, RData::A(A(ip)))
}

pub fn cname_record(owner: &str, target: &str, ttl: u32) -> Record {
    Record::from_rdata(name(owner), ttl, RData::CNAME(CNAME(name(target))))
}

/// Upstream-style response to `request` carrying the given records.
pub fn upstream_reply(request: &Message, answers: Vec<Record>, additionals: Vec<Record>) -> Message {
    let mut reply = Message::new(request.id(), MessageType::Response, request.op_code());
    reply.set_recursion_desired(true);
    reply.set_recursion_available(true);
    reply.add_queries(request.queries().iter().cloned());
    reply.add_answers(answers);
    reply.add_additionals(additionals);
    reply
}

pub fn answer_ips(message: &Message) -> Vec<Ipv4Addr> {
    message
        .answers()
        .iter()
        .filter_map(|r| match r.data() {
            RData::A(a) => Some(a.0),
            _ => None,
        })
        .collect()
}

pub fn zone(config: ZoneConfig) -> ForwardedZone {
    ForwardedZone::from_config(&config).unwrap()
}

pub fn zone_config(name: &str, upstream: &str, overrides: &[(&str, &str)]) -> ZoneConfig {
    let mut config = ZoneConfig::new(name, upstream);
    for (label, ip) in overrides {
        config.overrides.insert(label.to_string(), ip.to_string());
    }
    config
}
