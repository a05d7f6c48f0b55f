//! Bounds-checked cursor and writer for DNS wire format.

use super::name::DnsName;
use super::{MAX_LABEL_LEN, MAX_NAME_LEN};
use crate::DomainError;

/// Upper bound on compression pointers followed while reading one name.
const MAX_POINTER_JUMPS: usize = 32;

#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    #[inline]
    pub const fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    #[inline]
    pub fn skip(&mut self, n: usize) -> Result<(), DomainError> {
        if n > self.remaining() {
            return Err(eof(self.pos, n));
        }
        self.pos += n;
        Ok(())
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, DomainError> {
        let value = *self.data.get(self.pos).ok_or_else(|| eof(self.pos, 1))?;
        self.pos += 1;
        Ok(value)
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16, DomainError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32, DomainError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    #[inline]
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DomainError> {
        if len > self.remaining() {
            return Err(eof(self.pos, len));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Reads a possibly compressed name. Pointers must point strictly backwards
    /// and at most `MAX_POINTER_JUMPS` are followed.
    pub fn read_name(&mut self) -> Result<DnsName, DomainError> {
        let mut labels: Vec<Vec<u8>> = Vec::new();
        let mut pos = self.pos;
        let mut wire_len = 1usize;
        let mut jumps = 0usize;
        let mut resume_at: Option<usize> = None;

        loop {
            let len_byte = *self
                .data
                .get(pos)
                .ok_or_else(|| DomainError::malformed(format!("name runs past end at offset {}", pos)))?;

            match len_byte & 0xC0 {
                0x00 => {
                    let len = len_byte as usize;
                    if len == 0 {
                        pos += 1;
                        break;
                    }
                    let start = pos + 1;
                    let end = start + len;
                    if end > self.data.len() {
                        return Err(DomainError::malformed(format!(
                            "label length {} at offset {} exceeds remaining buffer",
                            len, pos
                        )));
                    }
                    wire_len += len + 1;
                    if wire_len > MAX_NAME_LEN {
                        return Err(DomainError::malformed(format!(
                            "name exceeds {} bytes",
                            MAX_NAME_LEN
                        )));
                    }
                    labels.push(self.data[start..end].to_vec());
                    pos = end;
                }
                0xC0 => {
                    let low = *self.data.get(pos + 1).ok_or_else(|| {
                        DomainError::malformed(format!("truncated pointer at offset {}", pos))
                    })?;
                    let target = (u16::from_be_bytes([len_byte & 0x3F, low])) as usize;
                    if target >= pos {
                        return Err(DomainError::malformed(format!(
                            "compression pointer at offset {} does not point backwards",
                            pos
                        )));
                    }
                    jumps += 1;
                    if jumps > MAX_POINTER_JUMPS {
                        return Err(DomainError::malformed("too many compression pointers"));
                    }
                    if resume_at.is_none() {
                        resume_at = Some(pos + 2);
                    }
                    pos = target;
                }
                _ => {
                    return Err(DomainError::malformed(format!(
                        "label length {} at offset {} exceeds {}",
                        len_byte, pos, MAX_LABEL_LEN
                    )));
                }
            }
        }

        self.pos = resume_at.unwrap_or(pos);
        Ok(DnsName::from_wire_labels(labels))
    }

    /// Advances past a name without materialising it. A pointer ends the name.
    pub fn skip_name(&mut self) -> Result<(), DomainError> {
        loop {
            let len_byte = self.read_u8()?;
            match len_byte & 0xC0 {
                0x00 if len_byte == 0 => return Ok(()),
                0x00 => self.skip(len_byte as usize).map_err(|_| {
                    DomainError::malformed(format!(
                        "label length {} exceeds remaining buffer",
                        len_byte
                    ))
                })?,
                0xC0 => return self.skip(1),
                _ => {
                    return Err(DomainError::malformed(format!(
                        "label length {} exceeds {}",
                        len_byte, MAX_LABEL_LEN
                    )))
                }
            }
        }
    }
}

fn eof(offset: usize, wanted: usize) -> DomainError {
    DomainError::malformed(format!(
        "unexpected end of data: needed {} bytes at offset {}",
        wanted, offset
    ))
}

/// Appends wire-format data to a growable buffer.
#[derive(Debug, Default)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    #[inline]
    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes `name` as a plain label sequence, never as a pointer.
    pub fn write_name(&mut self, name: &DnsName) {
        for label in name.labels() {
            self.buf.push(label.len() as u8);
            self.buf.extend_from_slice(label);
        }
        self.buf.push(0);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}
