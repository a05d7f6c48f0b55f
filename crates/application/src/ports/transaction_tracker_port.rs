use dnsfwd_domain::PendingTransaction;

/// Port for the table of queries awaiting an upstream reply, keyed by the
/// transaction ID used on the upstream leg.
pub trait TransactionTrackerPort: Send + Sync {
    /// Picks an upstream ID not currently in flight.
    fn allocate_id(&self) -> u16;

    fn record(&self, pending: PendingTransaction);

    /// Returns a copy of the pending entry without removing it.
    fn peek(&self, upstream_id: u16) -> Option<PendingTransaction>;

    /// Removes and returns the pending entry. A second call for the same ID
    /// returns `None`.
    fn resolve(&self, upstream_id: u16) -> Option<PendingTransaction>;

    /// Removes and returns every entry whose age is at least `timeout_ms`.
    fn expire_older_than(&self, now_ms: u64, timeout_ms: u64) -> Vec<PendingTransaction>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
