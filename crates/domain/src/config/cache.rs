use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Upper bound applied to upstream TTLs before storing.
    #[serde(default = "default_max_ttl")]
    pub max_ttl: u32,

    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    #[serde(default = "default_shard_amount")]
    pub shard_amount: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_ttl: default_max_ttl(),
            sweep_interval_secs: default_sweep_interval_secs(),
            shard_amount: default_shard_amount(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_ttl() -> u32 {
    86_400
}

fn default_sweep_interval_secs() -> u64 {
    30
}

fn default_shard_amount() -> usize {
    16
}
