/// Monotonic millisecond clock. Cache ages and transaction timeouts are both
/// measured against it, so tests can drive time explicitly.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}
