use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed DNS packet: {0}")]
    MalformedPacket(String),

    #[error("Upstream timeout for transaction {upstream_id} after {elapsed_ms}ms")]
    UpstreamTimeout { upstream_id: u16, elapsed_ms: u64 },

    #[error("Unmatched upstream reply with transaction ID {0}")]
    UnmatchedReply(u16),

    #[error("Unsupported record type: {0}")]
    UnsupportedRecordType(u16),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid upstream address: {0}")]
    InvalidUpstream(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    pub fn malformed(message: impl Into<String>) -> Self {
        DomainError::MalformedPacket(message.into())
    }

    /// Stable label for the `kind` field of drop and timeout log events.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::MalformedPacket(_) => "malformed_packet",
            DomainError::UpstreamTimeout { .. } => "upstream_timeout",
            DomainError::UnmatchedReply(_) => "unmatched_reply",
            DomainError::UnsupportedRecordType(_) => "unsupported_record_type",
            DomainError::InvalidDomainName(_) => "invalid_domain_name",
            DomainError::InvalidUpstream(_) => "invalid_upstream",
            DomainError::IoError(_) => "io_error",
            DomainError::ConfigError(_) => "config_error",
        }
    }
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::IoError(e.to_string())
    }
}
