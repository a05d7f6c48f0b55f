use super::name::DnsName;
use super::wire::{WireReader, WireWriter};
use crate::{DnsQuery, DomainError, RecordClass, RecordType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuestion {
    pub name: DnsName,
    pub qtype: RecordType,
    pub qclass: RecordClass,
}

impl DnsQuestion {
    pub fn new(name: DnsName, qtype: RecordType, qclass: RecordClass) -> Self {
        Self {
            name,
            qtype,
            qclass,
        }
    }

    pub fn decode(reader: &mut WireReader<'_>) -> Result<Self, DomainError> {
        let name = reader.read_name()?;
        let qtype = RecordType::from_u16(reader.read_u16()?);
        let qclass = RecordClass::from_u16(reader.read_u16()?);
        Ok(Self {
            name,
            qtype,
            qclass,
        })
    }

    pub fn encode(&self, writer: &mut WireWriter) {
        writer.write_name(&self.name);
        writer.write_u16(self.qtype.to_u16());
        writer.write_u16(self.qclass.to_u16());
    }

    /// The case-folded lookup key for this question.
    pub fn to_query(&self) -> DnsQuery {
        DnsQuery::new(&self.name.to_string(), self.qtype, self.qclass)
    }
}
