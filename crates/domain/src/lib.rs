//! dnsfwd domain layer: message codec, query and transaction types, config.
pub mod config;
pub mod dns_message;
pub mod dns_protocol;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod transaction;

pub use config::{CliOverrides, Config};
pub use dns_message::{DnsHeader, DnsMessage, DnsName, DnsQuestion, RData, ResourceRecord};
pub use dns_protocol::UpstreamServer;
pub use dns_query::DnsQuery;
pub use dns_record::{RecordClass, RecordType};
pub use errors::DomainError;
pub use transaction::PendingTransaction;
