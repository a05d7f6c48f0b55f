use dnsfwd_application::ports::{Clock, ResponseCachePort};
use dnsfwd_application::use_cases::{
    ForwardQueryUseCase, GetCacheStatsUseCase, SweepCacheUseCase,
};
use dnsfwd_domain::Config;
use dnsfwd_infrastructure::dns::{
    ResponseCache, ResponseCacheConfig, SystemClock, TransactionTracker, UdpUpstream,
};
use std::sync::Arc;
use tracing::info;

/// Everything the listener, the upstream receive loop and the background
/// jobs share.
pub struct ForwarderServices {
    pub engine: Arc<ForwardQueryUseCase>,
    pub upstream: Arc<UdpUpstream>,
    pub cache_sweep: Option<Arc<SweepCacheUseCase>>,
    pub cache_stats: Option<Arc<GetCacheStatsUseCase>>,
}

impl ForwarderServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let upstream_server = config.upstream_server()?;
        info!(
            upstream = %upstream_server,
            timeout_ms = config.upstream.timeout_ms,
            cache_enabled = config.cache.enabled,
            "Initializing forwarder services"
        );

        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
        let upstream = Arc::new(UdpUpstream::bind(upstream_server).await?);

        let mut engine = ForwardQueryUseCase::new(
            Arc::new(TransactionTracker::new()),
            upstream.clone(),
            clock.clone(),
            config.upstream.timeout_ms,
        );

        let (cache_sweep, cache_stats) = if config.cache.enabled {
            let cache: Arc<dyn ResponseCachePort> =
                Arc::new(ResponseCache::new(ResponseCacheConfig {
                    max_ttl: config.cache.max_ttl,
                    shard_amount: config.cache.shard_amount,
                }));
            engine = engine.with_cache(cache.clone());
            (
                Some(Arc::new(SweepCacheUseCase::new(cache.clone(), clock))),
                Some(Arc::new(GetCacheStatsUseCase::new(cache))),
            )
        } else {
            (None, None)
        };

        Ok(Self {
            engine: Arc::new(engine),
            upstream,
            cache_sweep,
            cache_stats,
        })
    }
}
