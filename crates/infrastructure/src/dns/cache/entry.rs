use bytes::Bytes;

const MS_PER_SEC: u64 = 1000;

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub response: Bytes,
    pub inserted_at_ms: u64,
    pub ttl: u32,
}

impl CacheEntry {
    pub fn new(response: Bytes, ttl: u32, inserted_at_ms: u64) -> Self {
        Self {
            response,
            inserted_at_ms,
            ttl,
        }
    }

    /// Whole seconds of TTL left at `now_ms`, floored at zero. A clock reading
    /// earlier than the insertion time counts as no time elapsed.
    #[inline]
    pub fn remaining_ttl(&self, now_ms: u64) -> u32 {
        let elapsed_secs = now_ms.saturating_sub(self.inserted_at_ms) / MS_PER_SEC;
        u64::from(self.ttl).saturating_sub(elapsed_secs) as u32
    }

    #[inline]
    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.remaining_ttl(now_ms) == 0
    }
}
