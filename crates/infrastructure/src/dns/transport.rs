//! Upstream UDP transport (RFC 1035 §4.2.1).

pub mod udp;

pub use udp::UdpUpstream;
