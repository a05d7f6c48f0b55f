use crate::ports::{CacheStats, ResponseCachePort};
use std::sync::Arc;

pub struct GetCacheStatsUseCase {
    cache: Arc<dyn ResponseCachePort>,
}

impl GetCacheStatsUseCase {
    pub fn new(cache: Arc<dyn ResponseCachePort>) -> Self {
        Self { cache }
    }

    pub fn execute(&self) -> CacheStats {
        self.cache.stats()
    }
}
