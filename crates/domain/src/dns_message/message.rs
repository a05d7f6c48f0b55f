use super::header::DnsHeader;
use super::question::DnsQuestion;
use super::record::ResourceRecord;
use super::wire::{WireReader, WireWriter};
use crate::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DnsMessage {
    pub header: DnsHeader,
    pub questions: Vec<DnsQuestion>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl DnsMessage {
    /// A standard recursive query with a single question.
    pub fn query(id: u16, question: DnsQuestion) -> Self {
        let mut header = DnsHeader {
            id,
            qdcount: 1,
            ..Default::default()
        };
        header.set_recursion_desired(true);
        Self {
            header,
            questions: vec![question],
            ..Default::default()
        }
    }

    /// An empty response echoing the query's ID, flags and questions.
    pub fn response_to(query: &DnsMessage) -> Self {
        let mut header = query.header;
        header.set_response(true);
        header.set_recursion_available(true);
        header.ancount = 0;
        header.nscount = 0;
        header.arcount = 0;
        Self {
            header,
            questions: query.questions.clone(),
            ..Default::default()
        }
    }

    pub fn add_answer(&mut self, record: ResourceRecord) {
        self.answers.push(record);
        self.header.ancount = self.answers.len() as u16;
    }

    pub fn id(&self) -> u16 {
        self.header.id
    }

    pub fn first_question(&self) -> Option<&DnsQuestion> {
        self.questions.first()
    }

    /// Smallest TTL across the answer section, `None` when it is empty.
    pub fn min_answer_ttl(&self) -> Option<u32> {
        self.answers.iter().map(|rr| rr.ttl).min()
    }

    /// Parses a complete message. Section counts in the header are trusted
    /// only as far as the buffer backs them; anything short is malformed.
    pub fn decode(bytes: &[u8]) -> Result<Self, DomainError> {
        let mut reader = WireReader::new(bytes);
        let header = DnsHeader::decode(&mut reader)?;

        let questions = (0..header.qdcount)
            .map(|_| DnsQuestion::decode(&mut reader))
            .collect::<Result<Vec<_>, _>>()?;
        let answers = decode_records(&mut reader, header.ancount)?;
        let authorities = decode_records(&mut reader, header.nscount)?;
        let additionals = decode_records(&mut reader, header.arcount)?;

        Ok(Self {
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }

    /// Serialises the header as stored, followed by every section in order.
    pub fn encode(&self) -> Vec<u8> {
        let mut writer = WireWriter::with_capacity(512);
        self.header.encode(&mut writer);
        for question in &self.questions {
            question.encode(&mut writer);
        }
        for record in self
            .answers
            .iter()
            .chain(&self.authorities)
            .chain(&self.additionals)
        {
            record.encode(&mut writer);
        }
        writer.into_inner()
    }
}

fn decode_records(
    reader: &mut WireReader<'_>,
    count: u16,
) -> Result<Vec<ResourceRecord>, DomainError> {
    (0..count)
        .map(|_| ResourceRecord::decode(reader))
        .collect()
}
