pub mod cache_sweep;
pub mod runner;
pub mod transaction_expiry;

pub use cache_sweep::CacheSweepJob;
pub use runner::JobRunner;
pub use transaction_expiry::TransactionExpiryJob;
