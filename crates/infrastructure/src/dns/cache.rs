//! TTL-aware cache of raw upstream replies.
//!
//! Entries hold the reply bytes exactly as received. Remaining TTL is derived
//! from the insertion time on every read; nothing is decremented in place.

pub mod entry;
pub mod key;
pub mod metrics;
pub mod storage;

pub use entry::CacheEntry;
pub use key::CacheKey;
pub use metrics::CacheMetrics;
pub use storage::{ResponseCache, ResponseCacheConfig};
