use super::DnsQuery;
use std::net::SocketAddr;

/// A forwarded query waiting for its upstream reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransaction {
    /// ID written into the copy sent upstream; the tracker's key.
    pub upstream_id: u16,
    pub client_addr: SocketAddr,
    /// ID the client chose; restored on the reply.
    pub client_id: u16,
    pub query: DnsQuery,
    pub sent_at_ms: u64,
}

impl PendingTransaction {
    pub fn new(
        upstream_id: u16,
        client_addr: SocketAddr,
        client_id: u16,
        query: DnsQuery,
        sent_at_ms: u64,
    ) -> Self {
        Self {
            upstream_id,
            client_addr,
            client_id,
            query,
            sent_at_ms,
        }
    }

    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.sent_at_ms)
    }

    pub fn is_expired(&self, now_ms: u64, timeout_ms: u64) -> bool {
        self.age_ms(now_ms) >= timeout_ms
    }
}
