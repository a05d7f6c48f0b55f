#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use dnsfwd_application::ports::{
    CacheHit, CacheStats, Clock, ResponseCachePort, TransactionTrackerPort, UpstreamTransportPort,
};
use dnsfwd_domain::{DnsQuery, DomainError, PendingTransaction, UpstreamServer};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU16, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

pub struct MockClock {
    now_ms: AtomicU64,
}

impl MockClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now_ms: AtomicU64::new(start_ms),
        }
    }

    pub fn advance_secs(&self, secs: u64) {
        self.now_ms.fetch_add(secs * 1000, Ordering::SeqCst);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
struct StoredResponse {
    response: Bytes,
    ttl: u32,
    stored_at_ms: u64,
}

#[derive(Clone, Default)]
pub struct MockResponseCache {
    entries: Arc<RwLock<HashMap<DnsQuery, StoredResponse>>>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    stores: Arc<AtomicU64>,
}

impl MockResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store_count(&self) -> u64 {
        self.stores.load(Ordering::SeqCst)
    }

    pub fn contains(&self, key: &DnsQuery) -> bool {
        self.entries.read().unwrap().contains_key(key)
    }

    pub fn ttl_of(&self, key: &DnsQuery) -> Option<u32> {
        self.entries.read().unwrap().get(key).map(|e| e.ttl)
    }

    fn remaining(entry: &StoredResponse, now_ms: u64) -> u32 {
        let elapsed = now_ms.saturating_sub(entry.stored_at_ms) / 1000;
        (entry.ttl as u64).saturating_sub(elapsed) as u32
    }
}

impl ResponseCachePort for MockResponseCache {
    fn lookup(&self, key: &DnsQuery, now_ms: u64) -> Option<CacheHit> {
        let entries = self.entries.read().unwrap();
        match entries.get(key) {
            Some(entry) if Self::remaining(entry, now_ms) > 0 => {
                self.hits.fetch_add(1, Ordering::SeqCst);
                Some(CacheHit {
                    response: entry.response.clone(),
                    remaining_ttl: Self::remaining(entry, now_ms),
                })
            }
            _ => {
                self.misses.fetch_add(1, Ordering::SeqCst);
                None
            }
        }
    }

    fn store(&self, key: &DnsQuery, response: Bytes, ttl: u32, now_ms: u64) -> bool {
        if ttl == 0 {
            return false;
        }
        self.stores.fetch_add(1, Ordering::SeqCst);
        self.entries.write().unwrap().insert(
            key.clone(),
            StoredResponse {
                response,
                ttl,
                stored_at_ms: now_ms,
            },
        );
        true
    }

    fn sweep(&self, now_ms: u64) -> usize {
        let mut entries = self.entries.write().unwrap();
        let before = entries.len();
        entries.retain(|_, e| Self::remaining(e, now_ms) > 0);
        before - entries.len()
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    fn clear(&self) {
        self.entries.write().unwrap().clear();
    }

    fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::SeqCst);
        let misses = self.misses.load(Ordering::SeqCst);
        let total = hits + misses;
        CacheStats {
            entries: self.len(),
            hits,
            misses,
            insertions: self.store_count(),
            evictions: 0,
            hit_rate: if total == 0 {
                0.0
            } else {
                hits as f64 / total as f64
            },
        }
    }
}

/// Hands out sequential IDs so tests can predict them.
#[derive(Clone)]
pub struct MockTransactionTracker {
    pending: Arc<RwLock<HashMap<u16, PendingTransaction>>>,
    next_id: Arc<AtomicU16>,
}

impl MockTransactionTracker {
    pub fn new() -> Self {
        Self::starting_at(0x1000)
    }

    pub fn starting_at(first_id: u16) -> Self {
        Self {
            pending: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicU16::new(first_id)),
        }
    }

    pub fn get(&self, upstream_id: u16) -> Option<PendingTransaction> {
        self.pending.read().unwrap().get(&upstream_id).cloned()
    }
}

impl Default for MockTransactionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionTrackerPort for MockTransactionTracker {
    fn allocate_id(&self) -> u16 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn record(&self, pending: PendingTransaction) {
        self.pending
            .write()
            .unwrap()
            .insert(pending.upstream_id, pending);
    }

    fn peek(&self, upstream_id: u16) -> Option<PendingTransaction> {
        self.get(upstream_id)
    }

    fn resolve(&self, upstream_id: u16) -> Option<PendingTransaction> {
        self.pending.write().unwrap().remove(&upstream_id)
    }

    fn expire_older_than(&self, now_ms: u64, timeout_ms: u64) -> Vec<PendingTransaction> {
        let mut pending = self.pending.write().unwrap();
        let expired: Vec<u16> = pending
            .values()
            .filter(|p| p.is_expired(now_ms, timeout_ms))
            .map(|p| p.upstream_id)
            .collect();
        expired
            .into_iter()
            .filter_map(|id| pending.remove(&id))
            .collect()
    }

    fn len(&self) -> usize {
        self.pending.read().unwrap().len()
    }
}

#[derive(Clone)]
pub struct MockUpstreamTransport {
    sent: Arc<RwLock<Vec<Vec<u8>>>>,
    should_fail: Arc<AtomicBool>,
    upstream: UpstreamServer,
}

impl MockUpstreamTransport {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            should_fail: Arc::new(AtomicBool::new(false)),
            upstream: "8.8.8.8:53".parse().unwrap(),
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.read().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.read().unwrap().len()
    }
}

impl Default for MockUpstreamTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamTransportPort for MockUpstreamTransport {
    async fn send(&self, datagram: &[u8]) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::IoError("network unreachable".to_string()));
        }
        self.sent.write().unwrap().push(datagram.to_vec());
        Ok(())
    }

    fn upstream(&self) -> UpstreamServer {
        self.upstream
    }
}
