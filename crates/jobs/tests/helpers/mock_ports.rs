#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use dnsfwd_application::ports::{
    CacheHit, CacheStats, Clock, ResponseCachePort, TransactionTrackerPort, UpstreamTransportPort,
};
use dnsfwd_domain::{DnsQuery, DomainError, PendingTransaction, UpstreamServer};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU16, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now_ms: AtomicU64::new(0),
        }
    }

    pub fn advance_ms(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

/// Cache that only counts sweeps; each sweep reports `removed_per_sweep`.
pub struct MockSweepableCache {
    sweep_calls: Arc<AtomicUsize>,
    removed_per_sweep: usize,
}

impl MockSweepableCache {
    pub fn new(removed_per_sweep: usize) -> Self {
        Self {
            sweep_calls: Arc::new(AtomicUsize::new(0)),
            removed_per_sweep,
        }
    }

    pub fn sweep_call_count(&self) -> usize {
        self.sweep_calls.load(Ordering::SeqCst)
    }
}

impl ResponseCachePort for MockSweepableCache {
    fn lookup(&self, _key: &DnsQuery, _now_ms: u64) -> Option<CacheHit> {
        None
    }

    fn store(&self, _key: &DnsQuery, _response: Bytes, _ttl: u32, _now_ms: u64) -> bool {
        false
    }

    fn sweep(&self, _now_ms: u64) -> usize {
        self.sweep_calls.fetch_add(1, Ordering::SeqCst);
        self.removed_per_sweep
    }

    fn len(&self) -> usize {
        0
    }

    fn clear(&self) {}

    fn stats(&self) -> CacheStats {
        CacheStats::default()
    }
}

pub struct MockTransactionTracker {
    pending: Mutex<HashMap<u16, PendingTransaction>>,
    next_id: AtomicU16,
}

impl MockTransactionTracker {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            next_id: AtomicU16::new(1),
        }
    }
}

impl TransactionTrackerPort for MockTransactionTracker {
    fn allocate_id(&self) -> u16 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn record(&self, pending: PendingTransaction) {
        self.pending
            .lock()
            .unwrap()
            .insert(pending.upstream_id, pending);
    }

    fn peek(&self, upstream_id: u16) -> Option<PendingTransaction> {
        self.pending.lock().unwrap().get(&upstream_id).cloned()
    }

    fn resolve(&self, upstream_id: u16) -> Option<PendingTransaction> {
        self.pending.lock().unwrap().remove(&upstream_id)
    }

    fn expire_older_than(&self, now_ms: u64, timeout_ms: u64) -> Vec<PendingTransaction> {
        let mut pending = self.pending.lock().unwrap();
        let ids: Vec<u16> = pending
            .values()
            .filter(|p| p.is_expired(now_ms, timeout_ms))
            .map(|p| p.upstream_id)
            .collect();
        ids.into_iter().filter_map(|id| pending.remove(&id)).collect()
    }

    fn len(&self) -> usize {
        self.pending.lock().unwrap().len()
    }
}

pub struct NoopTransport;

#[async_trait]
impl UpstreamTransportPort for NoopTransport {
    async fn send(&self, _datagram: &[u8]) -> Result<(), DomainError> {
        Ok(())
    }

    fn upstream(&self) -> UpstreamServer {
        "127.0.0.1:53".parse().unwrap()
    }
}

/// `www.example.com A IN` with the given ID.
pub fn query_packet(id: u16) -> Vec<u8> {
    let mut packet = Vec::new();
    packet.extend_from_slice(&id.to_be_bytes());
    packet.extend_from_slice(&[0x01, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0]);
    packet.extend_from_slice(b"\x03www\x07example\x03com\x00");
    packet.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
    packet
}
