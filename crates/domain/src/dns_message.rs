mod codec;
mod header;
mod reader;
mod writer;

pub use codec::{decode_message, decode_question, encode_message};
pub use header::{Header, OpCode, ResponseCode};

use crate::{Question, ResourceRecord};

/// Largest datagram consumed or produced (no EDNS0 negotiation).
pub const MAX_UDP_PAYLOAD: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl Message {
    /// An iterative (non-recursive) query for `question`.
    pub fn query(id: u16, question: Question) -> Self {
        Self {
            header: Header {
                id,
                ..Header::default()
            },
            questions: vec![question],
            ..Self::default()
        }
    }

    /// An empty response echoing `question`.
    pub fn response_to(question: &Question) -> Self {
        Self {
            header: Header {
                response: true,
                ..Header::default()
            },
            questions: vec![question.clone()],
            ..Self::default()
        }
    }

    /// An empty response carrying `rcode`.
    pub fn error_response(question: &Question, rcode: ResponseCode) -> Self {
        let mut message = Self::response_to(question);
        message.header.rcode = rcode;
        message
    }

    pub fn question(&self) -> Option<&Question> {
        self.questions.first()
    }

    pub fn rcode(&self) -> ResponseCode {
        self.header.rcode
    }

    pub fn min_answer_ttl(&self) -> Option<u32> {
        self.answers.iter().map(|rr| rr.ttl).min()
    }
}
