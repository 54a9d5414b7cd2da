use hickory_proto::op::{Message, MessageType, Query};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record};
use std::net::Ipv4Addr;

/// TTL of every synthesized override answer.
pub const OVERRIDE_TTL: u32 = 60;

/// Fully qualified ASCII form of `name`, always with the trailing dot.
pub fn fqdn(name: &Name) -> String {
    let mut s = name.to_ascii();
    if !s.ends_with('.') {
        s.push('.');
    }
    s
}

/// Empty response that mirrors the request's ID, opcode, RD bit and questions.
pub(crate) fn reply_to(request: &Message) -> Message {
    let mut reply = Message::new(request.id(), MessageType::Response, request.op_code());
    reply.set_recursion_desired(request.recursion_desired());
    reply.add_queries(request.queries().iter().cloned());
    reply
}

/// A record answering `query` with `ip`, owner and class taken from the question.
pub(crate) fn a_record(query: &Query, ip: Ipv4Addr) -> Record {
    let mut record = Record::from_rdata(query.name().clone(), OVERRIDE_TTL, RData::A(A(ip)));
    record.set_dns_class(query.query_class());
    record
}
