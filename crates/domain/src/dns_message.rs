//! DNS message codec (RFC 1035 §4).
//!
//! Decodes client queries and upstream replies into [`DnsMessage`] and encodes
//! messages back to wire format. Names are always written uncompressed. The
//! [`raw`] helpers patch an encoded buffer in place without a full re-encode,
//! so record types the codec does not interpret survive untouched.

pub mod header;
pub mod message;
pub mod name;
pub mod question;
pub mod raw;
pub mod record;
pub mod wire;

pub use header::{DnsHeader, ResponseCode};
pub use message::DnsMessage;
pub use name::DnsName;
pub use question::DnsQuestion;
pub use raw::{copy_question_name, recompute_ttl, rewrite_transaction_id, transaction_id};
pub use record::{DnsAnswer, RData, ResourceRecord};
pub use wire::{WireReader, WireWriter};

use crate::DomainError;

pub const HEADER_LEN: usize = 12;
pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;

/// Largest datagram the forwarder reads from either socket.
pub const MAX_UDP_MESSAGE_SIZE: usize = 4096;

pub fn decode(bytes: &[u8]) -> Result<DnsMessage, DomainError> {
    DnsMessage::decode(bytes)
}

pub fn encode(message: &DnsMessage) -> Vec<u8> {
    message.encode()
}
