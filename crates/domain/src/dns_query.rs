use super::{RecordClass, RecordType};
use std::fmt;
use std::sync::Arc;

/// What a question asks for, normalised for cache lookups: the name is
/// ASCII-lowercased and stripped of its trailing dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DnsQuery {
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub record_class: RecordClass,
}

impl DnsQuery {
    pub fn new(name: &str, record_type: RecordType, record_class: RecordClass) -> Self {
        Self {
            name: normalize_name(name).into(),
            record_type,
            record_class,
        }
    }
}

fn normalize_name(name: &str) -> String {
    let trimmed = name.strip_suffix('.').unwrap_or(name);
    if trimmed.is_empty() {
        ".".to_string()
    } else {
        trimmed.to_ascii_lowercase()
    }
}

impl fmt::Display for DnsQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.record_type, self.record_class)
    }
}
