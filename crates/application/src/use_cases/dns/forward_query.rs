use crate::ports::{Clock, ResponseCachePort, TransactionTrackerPort, UpstreamTransportPort};
use bytes::Bytes;
use dnsfwd_domain::dns_message::{
    copy_question_name, recompute_ttl, rewrite_transaction_id, ResponseCode,
};
use dnsfwd_domain::{DnsMessage, DnsQuery, DomainError, PendingTransaction};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, warn};

/// What happened to a datagram received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Served from cache; send these bytes back to the client.
    Answered(Vec<u8>),
    /// Sent upstream; the reply will come through `handle_upstream_reply`.
    Forwarded { upstream_id: u16 },
    /// Nothing goes back to the client.
    Dropped(DomainError),
}

/// What happened to a datagram received from the upstream resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    Deliver { client: SocketAddr, response: Vec<u8> },
    Dropped(DomainError),
}

/// The forwarding engine: cache lookup, upstream forwarding with ID
/// translation, reply matching and cache population.
pub struct ForwardQueryUseCase {
    cache: Option<Arc<dyn ResponseCachePort>>,
    tracker: Arc<dyn TransactionTrackerPort>,
    transport: Arc<dyn UpstreamTransportPort>,
    clock: Arc<dyn Clock>,
    timeout_ms: u64,
}

impl ForwardQueryUseCase {
    pub fn new(
        tracker: Arc<dyn TransactionTrackerPort>,
        transport: Arc<dyn UpstreamTransportPort>,
        clock: Arc<dyn Clock>,
        timeout_ms: u64,
    ) -> Self {
        Self {
            cache: None,
            tracker,
            transport,
            clock,
            timeout_ms,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn ResponseCachePort>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub async fn handle_query(&self, datagram: &[u8], client: SocketAddr) -> QueryOutcome {
        let message = match DnsMessage::decode(datagram) {
            Ok(message) => message,
            Err(e) => {
                debug!(
                    client = %client,
                    len = datagram.len(),
                    kind = e.kind(),
                    error = %e,
                    "Dropping undecodable query"
                );
                return QueryOutcome::Dropped(e);
            }
        };

        if message.header.is_response() {
            debug!(client = %client, "Dropping datagram with QR bit set");
            return QueryOutcome::Dropped(DomainError::malformed("query has QR bit set"));
        }

        let Some(question) = message.first_question() else {
            debug!(client = %client, "Dropping query without a question");
            return QueryOutcome::Dropped(DomainError::malformed("query has no question"));
        };

        let key = question.to_query();
        let client_id = message.id();
        let now = self.clock.now_ms();

        debug!(client = %client, id = client_id, query = %key, "Query received");

        if let Some(answer) = self.answer_from_cache(&key, datagram, client_id, now) {
            return QueryOutcome::Answered(answer);
        }

        let upstream_id = self.tracker.allocate_id();
        self.tracker.record(PendingTransaction::new(
            upstream_id,
            client,
            client_id,
            key.clone(),
            now,
        ));

        let mut outbound = datagram.to_vec();
        rewrite_transaction_id(&mut outbound, upstream_id);

        match self.transport.send(&outbound).await {
            Ok(()) => {
                debug!(
                    query = %key,
                    client_id,
                    upstream_id,
                    upstream = %self.transport.upstream(),
                    "Forwarded query upstream"
                );
                QueryOutcome::Forwarded { upstream_id }
            }
            Err(e) => {
                self.tracker.resolve(upstream_id);
                warn!(query = %key, upstream_id, kind = e.kind(), error = %e, "Upstream send failed");
                QueryOutcome::Dropped(e)
            }
        }
    }

    /// Builds a reply from the cached bytes: remaining TTL on every answer,
    /// the client's own question casing and its transaction ID.
    fn answer_from_cache(
        &self,
        key: &DnsQuery,
        query: &[u8],
        client_id: u16,
        now: u64,
    ) -> Option<Vec<u8>> {
        let cache = self.cache.as_ref()?;
        let Some(hit) = cache.lookup(key, now) else {
            debug!(query = %key, "Cache miss");
            return None;
        };

        let mut response = hit.response.to_vec();
        let patched = recompute_ttl(&mut response, hit.remaining_ttl)
            .and_then(|_| copy_question_name(&mut response, query));
        if let Err(e) = patched {
            warn!(query = %key, error = %e, "Cached response could not be patched, forwarding instead");
            return None;
        }
        rewrite_transaction_id(&mut response, client_id);

        debug!(query = %key, remaining_ttl = hit.remaining_ttl, "Cache hit");
        Some(response)
    }

    pub fn handle_upstream_reply(&self, datagram: &[u8]) -> ReplyOutcome {
        let message = match DnsMessage::decode(datagram) {
            Ok(message) => message,
            Err(e) => {
                debug!(
                    len = datagram.len(),
                    kind = e.kind(),
                    error = %e,
                    "Dropping undecodable upstream reply"
                );
                return ReplyOutcome::Dropped(e);
            }
        };

        let upstream_id = message.id();
        let Some(pending) = self.tracker.peek(upstream_id) else {
            let error = DomainError::UnmatchedReply(upstream_id);
            debug!(upstream_id, kind = error.kind(), "Dropping reply with no pending transaction");
            return ReplyOutcome::Dropped(error);
        };

        // A mismatched question leaves the entry for the genuine reply.
        let reply_key = message.first_question().map(|q| q.to_query());
        if reply_key.as_ref() != Some(&pending.query) {
            let error = DomainError::UnmatchedReply(upstream_id);
            warn!(
                upstream_id,
                expected = %pending.query,
                kind = error.kind(),
                "Dropping reply whose question does not match the pending query"
            );
            return ReplyOutcome::Dropped(error);
        }

        let Some(pending) = self.tracker.resolve(upstream_id) else {
            debug!(upstream_id, "Pending transaction resolved by a concurrent reply");
            return ReplyOutcome::Dropped(DomainError::UnmatchedReply(upstream_id));
        };

        let now = self.clock.now_ms();
        debug!(
            query = %pending.query,
            upstream_id,
            rcode = %message.header.response_code(),
            answers = message.answers.len(),
            elapsed_ms = pending.age_ms(now),
            "Upstream reply received"
        );

        if let Some(cache) = &self.cache {
            if message.header.response_code() == ResponseCode::NoError {
                if let Some(ttl) = message.min_answer_ttl() {
                    if cache.store(&pending.query, Bytes::copy_from_slice(datagram), ttl, now) {
                        debug!(query = %pending.query, ttl, "Cached upstream reply");
                    }
                }
            }
        }

        let mut response = datagram.to_vec();
        rewrite_transaction_id(&mut response, pending.client_id);

        ReplyOutcome::Deliver {
            client: pending.client_addr,
            response,
        }
    }

    /// Discards transactions that have waited at least the upstream timeout.
    /// Their clients get no reply. Returns how many were discarded.
    pub fn expire_pending(&self) -> usize {
        let now = self.clock.now_ms();
        let expired = self.tracker.expire_older_than(now, self.timeout_ms);

        for pending in &expired {
            let error = DomainError::UpstreamTimeout {
                upstream_id: pending.upstream_id,
                elapsed_ms: pending.age_ms(now),
            };
            warn!(
                query = %pending.query,
                client = %pending.client_addr,
                kind = error.kind(),
                error = %error,
                "Upstream query timed out"
            );
        }

        expired.len()
    }

    pub fn pending_count(&self) -> usize {
        self.tracker.len()
    }
}
