pub mod tracker;

pub use tracker::TransactionTracker;
