//! Serialization capability and recursive object framing.
//!
//! A framed object is written as a length-prefixed byte span holding the
//! object's own encoding. Each frame is decoded from its own child
//! [`StreamBuffer`], so nested reads never disturb the parent's cursors.

use tracing::warn;

use crate::{IoError, IoResult, StreamBuffer};

/// Objects that can write themselves into, and read themselves back from,
/// a stream buffer.
///
/// `deserialize` runs on a freshly constructed default instance and must
/// consume exactly what `serialize` wrote.
pub trait Serializable {
    /// Writes the object's fields into `writer`.
    fn serialize(&self, writer: &mut StreamBuffer) -> IoResult<()>;

    /// Populates `self` from `reader`. On error the object is left partially
    /// populated and must be discarded.
    fn deserialize(&mut self, reader: &mut StreamBuffer) -> IoResult<()>;
}

/// Extension methods for serializable objects.
pub trait SerializableExt: Serializable {
    /// Encodes the object as a root stream, without an outer frame.
    fn to_array(&self) -> IoResult<Vec<u8>> {
        let mut writer = StreamBuffer::new();
        self.serialize(&mut writer)?;
        Ok(writer.finalize())
    }

    /// Decodes an object previously produced by [`to_array`](Self::to_array).
    fn from_array(data: &[u8]) -> IoResult<Self>
    where
        Self: Sized + Default,
    {
        let mut value = Self::default();
        value.deserialize(&mut StreamBuffer::from(data))?;
        Ok(value)
    }
}

impl<T: Serializable + ?Sized> SerializableExt for T {}

impl StreamBuffer {
    fn nested_depth(&self) -> IoResult<usize> {
        let depth = self.depth() + 1;
        let max = self.limits().max_depth;
        if depth > max {
            warn!(depth, max, "object nesting exceeds configured limit");
            return Err(IoError::NestingTooDeep { depth, max });
        }
        Ok(depth)
    }

    /// Frames `value` as a length-prefixed nested stream.
    pub fn write_object<T: Serializable + ?Sized>(&mut self, value: &T) -> IoResult<()> {
        let mut child = self.child(self.nested_depth()?);
        value.serialize(&mut child)?;
        self.write_bytes(child.as_written())
    }

    /// Writes `None` as a bare zero length.
    ///
    /// On the wire this is identical to an object whose own encoding is
    /// empty; see [`read_optional_object`](Self::read_optional_object).
    pub fn write_optional_object<T: Serializable + ?Sized>(
        &mut self,
        value: Option<&T>,
    ) -> IoResult<()> {
        match value {
            Some(value) => self.write_object(value),
            None => {
                self.write_i32(0);
                Ok(())
            }
        }
    }

    /// Decodes the next frame into a fresh `T::default()`.
    ///
    /// A zero-length frame still yields an instance: `deserialize` runs
    /// against an empty stream.
    pub fn read_object<T: Serializable + Default>(&mut self) -> IoResult<T> {
        let mut child = self.read_stream()?;
        let mut value = T::default();
        value.deserialize(&mut child)?;
        Ok(value)
    }

    /// Decodes the next frame, mapping a zero-length frame to `None`.
    ///
    /// An object that encodes to zero bytes therefore reads back as `None`.
    pub fn read_optional_object<T: Serializable + Default>(&mut self) -> IoResult<Option<T>> {
        let mut child = self.read_stream()?;
        if child.is_empty() {
            return Ok(None);
        }
        let mut value = T::default();
        value.deserialize(&mut child)?;
        Ok(Some(value))
    }

    pub fn write_object_list<T: Serializable>(&mut self, values: &[T]) -> IoResult<()> {
        self.write_length(values.len())?;
        for value in values {
            self.write_object(value)?;
        }
        Ok(())
    }

    pub fn read_object_list<T: Serializable + Default>(&mut self) -> IoResult<Vec<T>> {
        let count = self.read_count()?;
        let mut values = Vec::with_capacity(count.min(self.remaining() / 4));
        for _ in 0..count {
            values.push(self.read_object()?);
        }
        Ok(values)
    }

    /// Embeds the written bytes of another stream as a frame. `None` writes a
    /// zero length.
    pub fn write_stream(&mut self, stream: Option<&StreamBuffer>) -> IoResult<()> {
        match stream {
            Some(stream) => self.write_bytes(stream.as_written()),
            None => {
                self.write_i32(0);
                Ok(())
            }
        }
    }

    /// Reads the next frame as a read-only child stream positioned at its start.
    pub fn read_stream(&mut self) -> IoResult<StreamBuffer> {
        let depth = self.nested_depth()?;
        let frame = self.read_bytes()?;
        Ok(self.child_from_bytes(frame, depth))
    }
}
