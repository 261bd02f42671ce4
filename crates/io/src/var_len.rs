//! Length-prefixed text and byte spans.
//!
//! Every variable-length value starts with an `i32` length. Text lengths
//! count UTF-8 bytes, not characters.

use tracing::warn;

use crate::{IoError, IoResult, StreamBuffer};

impl StreamBuffer {
    /// Writes a length or count prefix.
    pub(crate) fn write_length(&mut self, len: usize) -> IoResult<()> {
        let prefix = i32::try_from(len).map_err(|_| IoError::LengthOverflow(len))?;
        self.write_i32(prefix);
        Ok(())
    }

    /// Reads a length or count prefix and checks it against `max`.
    pub(crate) fn read_length(&mut self, kind: &'static str, max: usize) -> IoResult<usize> {
        let prefix = self.read_i32()?;
        let len = usize::try_from(prefix).map_err(|_| IoError::NegativeLength(prefix))?;
        if len > max {
            warn!(kind, len, max, "length prefix exceeds configured limit");
            return Err(IoError::out_of_range(kind, len, max));
        }
        Ok(len)
    }

    pub fn write_str(&mut self, value: &str) -> IoResult<()> {
        self.write_bytes(value.as_bytes())
    }

    /// An absent string is written as the empty string.
    pub fn write_string(&mut self, value: Option<&str>) -> IoResult<()> {
        self.write_str(value.unwrap_or_default())
    }

    pub fn read_string(&mut self) -> IoResult<String> {
        let len = self.read_length("text", self.limits().max_text_len)?;
        let raw = self.take(len)?;
        Ok(std::str::from_utf8(raw)?.to_owned())
    }

    pub fn write_bytes(&mut self, value: &[u8]) -> IoResult<()> {
        self.write_length(value.len())?;
        self.append_raw(value);
        Ok(())
    }

    pub fn read_bytes(&mut self) -> IoResult<Vec<u8>> {
        let len = self.read_length("bytes", self.limits().max_bytes_len)?;
        if len == 0 {
            return Ok(Vec::new());
        }
        Ok(self.take(len)?.to_vec())
    }
}
