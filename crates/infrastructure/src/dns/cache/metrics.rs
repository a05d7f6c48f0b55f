use dnsfwd_application::ports::CacheStats;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

// hits and misses sit on their own cache line; the rest are updated rarely.
#[derive(Default)]
#[repr(align(64))]
pub struct CacheMetrics {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    _hot_pad: [u64; 6],

    pub insertions: AtomicU64,
    pub lazy_evictions: AtomicU64,
    pub swept: AtomicU64,
}

impl CacheMetrics {
    /// Fraction of lookups that hit, in `[0, 1]`.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(AtomicOrdering::Relaxed) as f64;
        let total = hits + self.misses.load(AtomicOrdering::Relaxed) as f64;

        if total > 0.0 {
            hits / total
        } else {
            0.0
        }
    }

    pub fn evictions(&self) -> u64 {
        self.lazy_evictions.load(AtomicOrdering::Relaxed) + self.swept.load(AtomicOrdering::Relaxed)
    }

    pub fn snapshot(&self, entries: usize) -> CacheStats {
        CacheStats {
            entries,
            hits: self.hits.load(AtomicOrdering::Relaxed),
            misses: self.misses.load(AtomicOrdering::Relaxed),
            insertions: self.insertions.load(AtomicOrdering::Relaxed),
            evictions: self.evictions(),
            hit_rate: self.hit_rate(),
        }
    }
}
