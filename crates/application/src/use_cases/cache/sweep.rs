use crate::ports::{Clock, ResponseCachePort};
use std::sync::Arc;
use tracing::debug;

/// Outcome of one sweep over the response cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    pub entries_removed: usize,
    pub cache_size: usize,
}

pub struct SweepCacheUseCase {
    cache: Arc<dyn ResponseCachePort>,
    clock: Arc<dyn Clock>,
}

impl SweepCacheUseCase {
    pub fn new(cache: Arc<dyn ResponseCachePort>, clock: Arc<dyn Clock>) -> Self {
        Self { cache, clock }
    }

    pub fn execute(&self) -> SweepOutcome {
        let entries_removed = self.cache.sweep(self.clock.now_ms());
        let stats = self.cache.stats();

        debug!(
            entries_removed,
            entries = stats.entries,
            hit_rate = stats.hit_rate,
            "Cache sweep finished"
        );

        SweepOutcome {
            entries_removed,
            cache_size: stats.entries,
        }
    }
}
