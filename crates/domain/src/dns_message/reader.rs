//! Bounds-checked cursor over a received DNS message.

use crate::errors::DecodeError;
use crate::name::{Name, MAX_NAME_LEN};

pub(crate) struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let value = *self
            .data
            .get(self.pos)
            .ok_or(DecodeError::Truncated { offset: self.pos })?;
        self.pos += 1;
        Ok(value)
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub(crate) fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(DecodeError::Truncated { offset: self.pos })?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    /// Reads a possibly compressed name.
    ///
    /// Every compression pointer must target an offset strictly before the
    /// start of the label run it interrupts, so each jump moves backwards
    /// and the walk always terminates. Anything else is a `PointerLoop`.
    pub(crate) fn read_name(&mut self) -> Result<Name, DecodeError> {
        let mut labels: Vec<Box<[u8]>> = Vec::new();
        let mut wire_len = 1;
        let mut pos = self.pos;
        let mut run_start = self.pos;
        let mut resume_at: Option<usize> = None;

        loop {
            let len = *self
                .data
                .get(pos)
                .ok_or(DecodeError::Truncated { offset: pos })?;

            match len & 0xC0 {
                0x00 if len == 0 => {
                    pos += 1;
                    break;
                }
                0x00 => {
                    let start = pos + 1;
                    let end = start + len as usize;
                    if end > self.data.len() {
                        return Err(DecodeError::Truncated { offset: start });
                    }
                    wire_len += len as usize + 1;
                    if wire_len > MAX_NAME_LEN {
                        return Err(DecodeError::NameTooLong { length: wire_len });
                    }
                    labels.push(self.data[start..end].into());
                    pos = end;
                }
                0xC0 => {
                    let low = *self
                        .data
                        .get(pos + 1)
                        .ok_or(DecodeError::Truncated { offset: pos + 1 })?;
                    let target = (((len & 0x3F) as usize) << 8) | low as usize;
                    if target >= run_start || target >= self.data.len() {
                        return Err(DecodeError::PointerLoop {
                            offset: pos,
                            target,
                        });
                    }
                    resume_at.get_or_insert(pos + 2);
                    pos = target;
                    run_start = target;
                }
                _ => {
                    return Err(DecodeError::InvalidLabelType {
                        offset: pos,
                        value: len,
                    })
                }
            }
        }

        self.pos = resume_at.unwrap_or(pos);
        Ok(Name::from_labels(labels))
    }
}
