#![allow(dead_code)]

/// Hand-assembled wire packets, independent of the codec under test.
pub struct PacketBuilder {
    id: u16,
    flags: u16,
    questions: Vec<Vec<u8>>,
    answers: Vec<Vec<u8>>,
    authorities: Vec<Vec<u8>>,
    additionals: Vec<Vec<u8>>,
}

impl PacketBuilder {
    pub fn query(id: u16) -> Self {
        Self {
            id,
            flags: 0x0100,
            questions: Vec::new(),
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: Vec::new(),
        }
    }

    pub fn response(id: u16) -> Self {
        Self {
            flags: 0x8180,
            ..Self::query(id)
        }
    }

    pub fn flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    pub fn question(mut self, name: &str, qtype: u16, qclass: u16) -> Self {
        let mut q = encode_name(name);
        q.extend_from_slice(&qtype.to_be_bytes());
        q.extend_from_slice(&qclass.to_be_bytes());
        self.questions.push(q);
        self
    }

    /// Answer whose owner name is a pointer to the first question (offset 12).
    pub fn a_answer_ptr(mut self, ttl: u32, ip: [u8; 4]) -> Self {
        let mut rr = vec![0xC0, 0x0C];
        rr.extend_from_slice(&rr_fixed(1, 1, ttl, 4));
        rr.extend_from_slice(&ip);
        self.answers.push(rr);
        self
    }

    pub fn a_answer(mut self, name: &str, ttl: u32, ip: [u8; 4]) -> Self {
        let mut rr = encode_name(name);
        rr.extend_from_slice(&rr_fixed(1, 1, ttl, 4));
        rr.extend_from_slice(&ip);
        self.answers.push(rr);
        self
    }

    pub fn raw_answer(mut self, name: &str, rtype: u16, ttl: u32, rdata: &[u8]) -> Self {
        let mut rr = encode_name(name);
        rr.extend_from_slice(&rr_fixed(rtype, 1, ttl, rdata.len() as u16));
        rr.extend_from_slice(rdata);
        self.answers.push(rr);
        self
    }

    pub fn authority(mut self, name: &str, rtype: u16, ttl: u32, rdata: &[u8]) -> Self {
        let mut rr = encode_name(name);
        rr.extend_from_slice(&rr_fixed(rtype, 1, ttl, rdata.len() as u16));
        rr.extend_from_slice(rdata);
        self.authorities.push(rr);
        self
    }

    /// EDNS0 OPT pseudo-record advertising a 1232-byte payload.
    pub fn opt_record(mut self) -> Self {
        self.additionals
            .push(vec![0x00, 0x00, 0x29, 0x04, 0xD0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut p = Vec::new();
        p.extend_from_slice(&self.id.to_be_bytes());
        p.extend_from_slice(&self.flags.to_be_bytes());
        p.extend_from_slice(&(self.questions.len() as u16).to_be_bytes());
        p.extend_from_slice(&(self.answers.len() as u16).to_be_bytes());
        p.extend_from_slice(&(self.authorities.len() as u16).to_be_bytes());
        p.extend_from_slice(&(self.additionals.len() as u16).to_be_bytes());
        for section in [
            &self.questions,
            &self.answers,
            &self.authorities,
            &self.additionals,
        ] {
            for entry in section {
                p.extend_from_slice(entry);
            }
        }
        p
    }
}

pub fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

fn rr_fixed(rtype: u16, class: u16, ttl: u32, rdlength: u16) -> Vec<u8> {
    let mut out = Vec::with_capacity(10);
    out.extend_from_slice(&rtype.to_be_bytes());
    out.extend_from_slice(&class.to_be_bytes());
    out.extend_from_slice(&ttl.to_be_bytes());
    out.extend_from_slice(&rdlength.to_be_bytes());
    out
}

/// Reads the TTL of answer `index` when every owner name is a 2-byte pointer
/// and there is exactly one question of `qname_len` wire bytes.
pub fn ttl_of_pointer_answer(packet: &[u8], qname_len: usize, index: usize) -> u32 {
    let first = 12 + qname_len + 4;
    let offset = first + index * 16 + 6;
    u32::from_be_bytes(packet[offset..offset + 4].try_into().unwrap())
}
