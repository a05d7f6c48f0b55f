//! In-place edits on an encoded message.

use super::header::DnsHeader;
use super::wire::WireReader;
use crate::DomainError;
use std::ops::Range;

pub fn transaction_id(bytes: &[u8]) -> Option<u16> {
    match bytes {
        [hi, lo, ..] => Some(u16::from_be_bytes([*hi, *lo])),
        _ => None,
    }
}

/// Overwrites the first two bytes. Buffers shorter than that are left alone.
pub fn rewrite_transaction_id(bytes: &mut [u8], id: u16) {
    if let Some(slot) = bytes.get_mut(..2) {
        slot.copy_from_slice(&id.to_be_bytes());
    }
}

/// Sets the TTL of every answer record to `ttl` and returns how many were
/// rewritten. RDATA is skipped by length, so uninterpreted types are safe.
/// Authority and additional records keep their TTLs. On error the buffer is
/// unchanged.
pub fn recompute_ttl(bytes: &mut [u8], ttl: u32) -> Result<usize, DomainError> {
    let offsets = answer_ttl_offsets(bytes)?;
    let encoded = ttl.to_be_bytes();
    for &offset in &offsets {
        bytes[offset..offset + 4].copy_from_slice(&encoded);
    }
    Ok(offsets.len())
}

/// Copies the first question name of `query` over the first question name of
/// `response`, so a cached reply echoes the casing the client used. Both names
/// must occupy the same number of bytes; on error `response` is unchanged.
pub fn copy_question_name(response: &mut [u8], query: &[u8]) -> Result<(), DomainError> {
    let target = first_question_name(response)?;
    let source = first_question_name(query)?;
    if target.len() != source.len() {
        return Err(DomainError::malformed(format!(
            "question name spans {} bytes in the reply but {} in the query",
            target.len(),
            source.len()
        )));
    }
    response[target].copy_from_slice(&query[source]);
    Ok(())
}

fn first_question_name(bytes: &[u8]) -> Result<Range<usize>, DomainError> {
    let mut reader = WireReader::new(bytes);
    let header = DnsHeader::decode(&mut reader)?;
    if header.qdcount == 0 {
        return Err(DomainError::malformed("message has no question"));
    }
    let start = reader.position();
    reader.skip_name()?;
    Ok(start..reader.position())
}

fn answer_ttl_offsets(bytes: &[u8]) -> Result<Vec<usize>, DomainError> {
    let mut reader = WireReader::new(bytes);
    let header = DnsHeader::decode(&mut reader)?;

    for _ in 0..header.qdcount {
        reader.skip_name()?;
        reader.skip(4)?;
    }

    let mut offsets = Vec::with_capacity(header.ancount as usize);
    for _ in 0..header.ancount {
        reader.skip_name()?;
        reader.skip(4)?;
        offsets.push(reader.position());
        reader.skip(4)?;
        let rdlength = reader.read_u16()? as usize;
        reader.skip(rdlength)?;
    }
    Ok(offsets)
}
