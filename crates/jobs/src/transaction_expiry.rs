use dnsfwd_application::use_cases::ForwardQueryUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const DEFAULT_INTERVAL_MS: u64 = 1_000;

/// Discards pending upstream exchanges whose reply never arrived.
pub struct TransactionExpiryJob {
    engine: Arc<ForwardQueryUseCase>,
    interval_ms: u64,
    shutdown: CancellationToken,
}

impl TransactionExpiryJob {
    pub fn new(engine: Arc<ForwardQueryUseCase>) -> Self {
        Self {
            engine,
            interval_ms: DEFAULT_INTERVAL_MS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_ms = self.interval_ms,
            timeout_ms = self.engine.timeout_ms(),
            "Starting transaction expiry job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(self.interval_ms));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("TransactionExpiryJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let expired = self.engine.expire_pending();
                        if expired > 0 {
                            debug!(
                                expired,
                                pending = self.engine.pending_count(),
                                "Expired timed-out transactions"
                            );
                        }
                    }
                }
            }
        });
    }
}
