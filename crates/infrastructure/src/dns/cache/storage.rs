use super::{CacheEntry, CacheKey, CacheMetrics};
use bytes::Bytes;
use dashmap::DashMap;
use dnsfwd_application::ports::{CacheHit, CacheStats, ResponseCachePort};
use dnsfwd_domain::DnsQuery;
use rustc_hash::FxBuildHasher;
use std::sync::atomic::Ordering as AtomicOrdering;
use tracing::{debug, info};

pub struct ResponseCacheConfig {
    /// Upper bound applied to every stored TTL, in seconds.
    pub max_ttl: u32,
    /// DashMap shard count; must be a power of two.
    pub shard_amount: usize,
}

impl Default for ResponseCacheConfig {
    fn default() -> Self {
        Self {
            max_ttl: 86_400,
            shard_amount: 16,
        }
    }
}

pub struct ResponseCache {
    entries: DashMap<CacheKey, CacheEntry, FxBuildHasher>,
    max_ttl: u32,
    metrics: CacheMetrics,
}

impl ResponseCache {
    pub fn new(config: ResponseCacheConfig) -> Self {
        info!(
            max_ttl = config.max_ttl,
            shards = config.shard_amount,
            "Initializing response cache"
        );

        Self {
            entries: DashMap::with_hasher_and_shard_amount(FxBuildHasher, config.shard_amount),
            max_ttl: config.max_ttl,
            metrics: CacheMetrics::default(),
        }
    }

    fn evict_if_expired(&self, key: &CacheKey, now_ms: u64) {
        // Another writer may have replaced the entry since it was read.
        if self
            .entries
            .remove_if(key, |_, entry| entry.is_expired(now_ms))
            .is_some()
        {
            self.metrics
                .lazy_evictions
                .fetch_add(1, AtomicOrdering::Relaxed);
            debug!(key = %key, "Evicted expired cache entry");
        }
    }
}

impl ResponseCachePort for ResponseCache {
    fn lookup(&self, key: &DnsQuery, now_ms: u64) -> Option<CacheHit> {
        let key = CacheKey::from(key);

        let hit = self.entries.get(&key).and_then(|entry| {
            let remaining_ttl = entry.remaining_ttl(now_ms);
            (remaining_ttl > 0).then(|| CacheHit {
                response: entry.response.clone(),
                remaining_ttl,
            })
        });

        match hit {
            Some(hit) => {
                self.metrics.hits.fetch_add(1, AtomicOrdering::Relaxed);
                Some(hit)
            }
            None => {
                self.metrics.misses.fetch_add(1, AtomicOrdering::Relaxed);
                self.evict_if_expired(&key, now_ms);
                None
            }
        }
    }

    fn store(&self, key: &DnsQuery, response: Bytes, ttl: u32, now_ms: u64) -> bool {
        let ttl = ttl.min(self.max_ttl);
        if ttl == 0 {
            return false;
        }

        self.entries
            .insert(CacheKey::from(key), CacheEntry::new(response, ttl, now_ms));
        self.metrics.insertions.fetch_add(1, AtomicOrdering::Relaxed);
        true
    }

    fn sweep(&self, now_ms: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now_ms));
        let removed = before.saturating_sub(self.entries.len());

        if removed > 0 {
            self.metrics
                .swept
                .fetch_add(removed as u64, AtomicOrdering::Relaxed);
        }
        removed
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&self) {
        self.entries.clear();
    }

    fn stats(&self) -> CacheStats {
        self.metrics.snapshot(self.entries.len())
    }
}
