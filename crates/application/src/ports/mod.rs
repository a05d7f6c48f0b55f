mod clock;
mod response_cache_port;
mod transaction_tracker_port;
mod upstream_transport_port;

pub use clock::Clock;
pub use response_cache_port::{CacheHit, CacheStats, ResponseCachePort};
pub use transaction_tracker_port::TransactionTrackerPort;
pub use upstream_transport_port::UpstreamTransportPort;

// Re-export for convenience
pub use dnsfwd_domain::{DnsQuery, PendingTransaction};
