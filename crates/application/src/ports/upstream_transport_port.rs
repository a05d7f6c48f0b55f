use async_trait::async_trait;
use dnsfwd_domain::{DomainError, UpstreamServer};

/// Outbound half of the upstream leg. Replies arrive separately through the
/// upstream receive loop and are fed to
/// [`crate::use_cases::ForwardQueryUseCase::handle_upstream_reply`].
#[async_trait]
pub trait UpstreamTransportPort: Send + Sync {
    async fn send(&self, datagram: &[u8]) -> Result<(), DomainError>;

    fn upstream(&self) -> UpstreamServer;
}
