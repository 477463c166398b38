use crate::errors::EncodeError;
use crate::name::{Name, MAX_LABEL_LEN, MAX_NAME_LEN};
use bytes::{BufMut, BytesMut};

/// Append-only writer for uncompressed wire output.
pub(crate) struct WireWriter {
    buf: BytesMut,
}

impl WireWriter {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn put_u16(&mut self, value: u16) {
        self.buf.put_u16(value);
    }

    pub(crate) fn put_u32(&mut self, value: u32) {
        self.buf.put_u32(value);
    }

    pub(crate) fn put_slice(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    pub(crate) fn put_name(&mut self, name: &Name) -> Result<(), EncodeError> {
        let length = name.wire_len();
        if length > MAX_NAME_LEN {
            return Err(EncodeError::NameTooLong { length });
        }
        for label in name.labels() {
            if label.len() > MAX_LABEL_LEN {
                return Err(EncodeError::LabelTooLong {
                    length: label.len(),
                });
            }
            self.buf.put_u8(label.len() as u8);
            self.buf.put_slice(label);
        }
        self.buf.put_u8(0);
        Ok(())
    }

    /// Overwrites a previously reserved big-endian u16 at `offset`.
    pub(crate) fn patch_u16(&mut self, offset: usize, value: u16) {
        self.buf[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
    }

    pub(crate) fn into_vec(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}
