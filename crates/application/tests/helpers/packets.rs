#![allow(dead_code)]

use dnsfwd_domain::dns_message::ResponseCode;
use dnsfwd_domain::{
    DnsMessage, DnsName, DnsQuery, DnsQuestion, RecordClass, RecordType, ResourceRecord,
};
use std::net::Ipv4Addr;

pub fn question(name: &str, qtype: RecordType) -> DnsQuestion {
    let name: DnsName = name.parse().unwrap();
    DnsQuestion::new(name, qtype, RecordClass::IN)
}

pub fn key(name: &str, qtype: RecordType) -> DnsQuery {
    DnsQuery::new(name, qtype, RecordClass::IN)
}

pub fn query_packet(id: u16, name: &str, qtype: RecordType) -> Vec<u8> {
    DnsMessage::query(id, question(name, qtype)).encode()
}

pub fn a_reply(id: u16, name: &str, answers: &[(u32, Ipv4Addr)]) -> Vec<u8> {
    let query = DnsMessage::query(id, question(name, RecordType::A));
    let mut reply = DnsMessage::response_to(&query);
    for (ttl, addr) in answers {
        reply.add_answer(ResourceRecord::a(name.parse().unwrap(), *ttl, *addr));
    }
    reply.encode()
}

pub fn reply_with_rcode(id: u16, name: &str, rcode: ResponseCode) -> Vec<u8> {
    let query = DnsMessage::query(id, question(name, RecordType::A));
    let mut reply = DnsMessage::response_to(&query);
    reply.header.set_response_code(rcode);
    reply.encode()
}

pub fn opaque_reply(id: u16, name: &str, rtype: RecordType, ttl: u32, rdata: &[u8]) -> Vec<u8> {
    let query = DnsMessage::query(id, question(name, rtype));
    let mut reply = DnsMessage::response_to(&query);
    reply.add_answer(ResourceRecord::opaque(
        name.parse().unwrap(),
        rtype,
        RecordClass::IN,
        ttl,
        rdata.to_vec(),
    ));
    reply.encode()
}

pub fn id_of(packet: &[u8]) -> u16 {
    u16::from_be_bytes([packet[0], packet[1]])
}

pub fn answer_ttls(packet: &[u8]) -> Vec<u32> {
    DnsMessage::decode(packet)
        .unwrap()
        .answers
        .iter()
        .map(|rr| rr.ttl)
        .collect()
}

/// Byte offsets of the TTL field of each answer record. Assumes the
/// pointer-free layout `DnsMessage::encode` produces.
pub fn answer_ttl_offsets(packet: &[u8]) -> Vec<usize> {
    let message = DnsMessage::decode(packet).unwrap();
    let mut offset = 12;
    for q in &message.questions {
        offset += q.name.wire_len() + 4;
    }
    let mut offsets = Vec::new();
    for rr in &message.answers {
        offset += rr.name.wire_len() + 4;
        offsets.push(offset);
        let rdlength = u16::from_be_bytes([packet[offset + 4], packet[offset + 5]]) as usize;
        offset += 6 + rdlength;
    }
    offsets
}
