pub mod get_stats;
pub mod sweep;

pub use get_stats::GetCacheStatsUseCase;
pub use sweep::{SweepCacheUseCase, SweepOutcome};
