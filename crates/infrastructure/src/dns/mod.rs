pub mod cache;
pub mod clock;
pub mod transaction;
pub mod transport;

pub use cache::{CacheEntry, CacheKey, CacheMetrics, ResponseCache, ResponseCacheConfig};
pub use clock::SystemClock;
pub use transaction::TransactionTracker;
pub use transport::UdpUpstream;
