pub mod cache;
pub mod dns;

pub use cache::{GetCacheStatsUseCase, SweepCacheUseCase, SweepOutcome};
pub use dns::{ForwardQueryUseCase, QueryOutcome, ReplyOutcome};
