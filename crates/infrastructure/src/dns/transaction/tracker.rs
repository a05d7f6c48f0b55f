use dashmap::DashMap;
use dnsfwd_application::ports::TransactionTrackerPort;
use dnsfwd_domain::PendingTransaction;
use rustc_hash::FxBuildHasher;
use tracing::warn;

/// Random draws before falling back to a linear scan for a free ID.
const RANDOM_ID_ATTEMPTS: usize = 64;

/// In-flight upstream exchanges keyed by the upstream transaction ID.
pub struct TransactionTracker {
    pending: DashMap<u16, PendingTransaction, FxBuildHasher>,
}

impl TransactionTracker {
    pub fn new() -> Self {
        Self {
            pending: DashMap::with_hasher(FxBuildHasher),
        }
    }

    pub fn contains(&self, upstream_id: u16) -> bool {
        self.pending.contains_key(&upstream_id)
    }
}

impl Default for TransactionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionTrackerPort for TransactionTracker {
    fn allocate_id(&self) -> u16 {
        for _ in 0..RANDOM_ID_ATTEMPTS {
            let id = fastrand::u16(..);
            if !self.pending.contains_key(&id) {
                return id;
            }
        }

        let start = fastrand::u16(..);
        if let Some(id) = (0..=u16::MAX)
            .map(|offset| start.wrapping_add(offset))
            .find(|id| !self.pending.contains_key(id))
        {
            return id;
        }

        // Every ID is in flight; the oldest exchange loses its slot.
        warn!("Upstream transaction ID space exhausted");
        start
    }

    fn record(&self, pending: PendingTransaction) {
        self.pending.insert(pending.upstream_id, pending);
    }

    fn peek(&self, upstream_id: u16) -> Option<PendingTransaction> {
        self.pending.get(&upstream_id).map(|entry| entry.value().clone())
    }

    fn resolve(&self, upstream_id: u16) -> Option<PendingTransaction> {
        self.pending.remove(&upstream_id).map(|(_, pending)| pending)
    }

    fn expire_older_than(&self, now_ms: u64, timeout_ms: u64) -> Vec<PendingTransaction> {
        let expired_ids: Vec<u16> = self
            .pending
            .iter()
            .filter(|entry| entry.value().is_expired(now_ms, timeout_ms))
            .map(|entry| *entry.key())
            .collect();

        expired_ids
            .into_iter()
            .filter_map(|id| {
                self.pending
                    .remove_if(&id, |_, pending| pending.is_expired(now_ms, timeout_ms))
                    .map(|(_, pending)| pending)
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.pending.len()
    }
}
