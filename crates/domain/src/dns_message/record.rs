use super::name::DnsName;
use super::wire::{WireReader, WireWriter};
use crate::{DomainError, RecordClass, RecordType};
use std::net::Ipv4Addr;

/// Resource data. Only IN/A is interpreted; everything else is carried as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RData {
    A(Ipv4Addr),
    Opaque(Vec<u8>),
}

impl RData {
    pub fn len(&self) -> usize {
        match self {
            RData::A(_) => 4,
            RData::Opaque(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_ipv4(&self) -> Option<Ipv4Addr> {
        match self {
            RData::A(addr) => Some(*addr),
            RData::Opaque(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: DnsName,
    pub rtype: RecordType,
    pub rclass: RecordClass,
    pub ttl: u32,
    pub rdata: RData,
}

/// Answer-section entries are ordinary resource records.
pub type DnsAnswer = ResourceRecord;

impl ResourceRecord {
    pub fn a(name: DnsName, ttl: u32, addr: Ipv4Addr) -> Self {
        Self {
            name,
            rtype: RecordType::A,
            rclass: RecordClass::IN,
            ttl,
            rdata: RData::A(addr),
        }
    }

    pub fn opaque(
        name: DnsName,
        rtype: RecordType,
        rclass: RecordClass,
        ttl: u32,
        data: Vec<u8>,
    ) -> Self {
        Self {
            name,
            rtype,
            rclass,
            ttl,
            rdata: RData::Opaque(data),
        }
    }

    /// The IPv4 address of an A record; any other type cannot be interpreted.
    pub fn ipv4_address(&self) -> Result<Ipv4Addr, DomainError> {
        self.rdata
            .as_ipv4()
            .ok_or(DomainError::UnsupportedRecordType(self.rtype.to_u16()))
    }

    pub fn decode(reader: &mut WireReader<'_>) -> Result<Self, DomainError> {
        let name = reader.read_name()?;
        let rtype = RecordType::from_u16(reader.read_u16()?);
        let rclass = RecordClass::from_u16(reader.read_u16()?);
        let ttl = reader.read_u32()?;
        let rdlength = reader.read_u16()? as usize;
        let start = reader.position();
        let data = reader.read_bytes(rdlength).map_err(|_| {
            DomainError::malformed(format!(
                "rdlength {} at offset {} exceeds remaining buffer",
                rdlength, start
            ))
        })?;

        let rdata = match (rtype, rclass) {
            (RecordType::A, RecordClass::IN) => {
                let octets: [u8; 4] = data.try_into().map_err(|_| {
                    DomainError::malformed(format!("A record with rdlength {}", rdlength))
                })?;
                RData::A(Ipv4Addr::from(octets))
            }
            _ => RData::Opaque(data.to_vec()),
        };

        Ok(Self {
            name,
            rtype,
            rclass,
            ttl,
            rdata,
        })
    }

    pub fn encode(&self, writer: &mut WireWriter) {
        writer.write_name(&self.name);
        writer.write_u16(self.rtype.to_u16());
        writer.write_u16(self.rclass.to_u16());
        writer.write_u32(self.ttl);
        writer.write_u16(self.rdata.len() as u16);
        match &self.rdata {
            RData::A(addr) => writer.write_bytes(&addr.octets()),
            RData::Opaque(bytes) => writer.write_bytes(bytes),
        }
    }
}
