#![allow(dead_code)]

pub mod mock_upstream;

pub use mock_upstream::MockUpstream;

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RData, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

pub const LOCAL_PEER: &str = "192.168.1.5:40000";
pub const REMOTE_PEER: &str = "8.8.8.8:40000";

pub fn local_peer() -> SocketAddr {
    LOCAL_PEER.parse().unwrap()
}

pub fn remote_peer() -> SocketAddr {
    REMOTE_PEER.parse().unwrap()
}

pub fn query(name: &str, record_type: RecordType) -> Message {
    let mut message = Message::new(0x4242, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(Query::query(Name::from_str(name).unwrap(), record_type));
    message
}

/// A response-typed message, as an upstream would send it.
pub fn response(name: &str) -> Message {
    let mut message = Message::new(0x4242, MessageType::Response, OpCode::Query);
    message.add_query(Query::query(Name::from_str(name).unwrap(), RecordType::A));
    message
}

pub fn encode(message: &Message) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut encoder = BinEncoder::new(&mut buf);
    message.emit(&mut encoder).unwrap();
    buf
}

pub fn query_bytes(name: &str) -> Vec<u8> {
    encode(&query(name, RecordType::A))
}

pub fn decode(bytes: &[u8]) -> Message {
    Message::from_vec(bytes).unwrap()
}

pub fn answer_ips(message: &Message) -> Vec<Ipv4Addr> {
    message
        .answers()
        .iter()
        .filter_map(|record| match record.data() {
            RData::A(a) => Some(a.0),
            _ => None,
        })
        .collect()
}

pub fn ip(addr: &str) -> IpAddr {
    addr.parse().unwrap()
}
