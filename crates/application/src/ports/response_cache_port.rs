use bytes::Bytes;
use dnsfwd_domain::DnsQuery;

/// A cached response together with the TTL it should be served with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheHit {
    /// Raw upstream reply exactly as stored; ID and TTLs are patched by the caller.
    pub response: Bytes,
    pub remaining_ttl: u32,
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub evictions: u64,
    pub hit_rate: f64,
}

/// Port for the TTL-aware response cache.
///
/// Times are milliseconds from [`crate::ports::Clock`]; TTLs are seconds.
pub trait ResponseCachePort: Send + Sync {
    /// Returns the entry if at least one whole second of TTL remains.
    /// An expired entry is evicted as a side effect.
    fn lookup(&self, key: &DnsQuery, now_ms: u64) -> Option<CacheHit>;

    /// Inserts or replaces the entry for `key`. Returns `false` when nothing
    /// was stored (TTL 0).
    fn store(&self, key: &DnsQuery, response: Bytes, ttl: u32, now_ms: u64) -> bool;

    /// Removes every expired entry and returns how many were dropped.
    fn sweep(&self, now_ms: u64) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&self);

    fn stats(&self) -> CacheStats;
}
