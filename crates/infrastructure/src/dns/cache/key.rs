use compact_str::CompactString;
use dnsfwd_domain::{DnsQuery, RecordClass, RecordType};
use std::fmt;

/// Owned cache key. Names are stored already folded to lowercase so lookups
/// are case-insensitive without per-comparison work.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub name: CompactString,
    pub record_type: RecordType,
    pub record_class: RecordClass,
}

impl CacheKey {
    #[inline]
    pub fn new(name: &str, record_type: RecordType, record_class: RecordClass) -> Self {
        let trimmed = name.strip_suffix('.').unwrap_or(name);
        let name = if trimmed.is_empty() {
            CompactString::from(".")
        } else if trimmed.bytes().any(|b| b.is_ascii_uppercase()) {
            CompactString::from(trimmed.to_ascii_lowercase())
        } else {
            CompactString::from(trimmed)
        };
        Self {
            name,
            record_type,
            record_class,
        }
    }
}

impl From<&DnsQuery> for CacheKey {
    #[inline]
    fn from(query: &DnsQuery) -> Self {
        Self::new(&query.name, query.record_type, query.record_class)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.record_type, self.record_class)
    }
}
