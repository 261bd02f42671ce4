//! Growable byte store with independent read and write cursors.

use bridge_config::{ReadLimits, StreamConfig, DEFAULT_CAPACITY};
use bytes::Bytes;
use tracing::{debug, trace};

use crate::{IoError, IoResult};

/// A growable binary buffer that is written at `write_index` and read at
/// `read_index`.
///
/// The backing store is always exactly `capacity` bytes long. Growth doubles
/// the capacity until the pending write fits and copies only the written
/// prefix into the new allocation.
///
/// # Examples
///
/// ```rust
/// use bridge_io::StreamBuffer;
///
/// let mut stream = StreamBuffer::new();
/// stream.write_i32(-42);
/// stream.write_str("hi").unwrap();
///
/// let mut reader = StreamBuffer::from_bytes(stream.finalize());
/// assert_eq!(reader.read_i32().unwrap(), -42);
/// assert_eq!(reader.read_string().unwrap(), "hi");
/// assert!(!reader.has_more());
/// ```
#[derive(Debug, Clone)]
pub struct StreamBuffer {
    buffer: Vec<u8>,
    read_index: usize,
    write_index: usize,
    default_capacity: usize,
    limits: ReadLimits,
    depth: usize,
}

impl StreamBuffer {
    /// Creates an empty buffer with [`DEFAULT_CAPACITY`] bytes allocated.
    pub fn new() -> Self {
        Self::with_config(&StreamConfig::default())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: vec![0; capacity],
            read_index: 0,
            write_index: 0,
            default_capacity: capacity,
            limits: ReadLimits::default(),
            depth: 0,
        }
    }

    pub fn with_config(config: &StreamConfig) -> Self {
        Self::with_capacity(config.default_capacity).with_limits(config.limits)
    }

    /// Wraps existing bytes for reading. Every byte counts as written.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let write_index = data.len();
        Self {
            buffer: data,
            read_index: 0,
            write_index,
            default_capacity: DEFAULT_CAPACITY,
            limits: ReadLimits::default(),
            depth: 0,
        }
    }

    /// Replaces the decode limits. Nested streams inherit them.
    pub fn with_limits(mut self, limits: ReadLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Empty stream one level below `self`.
    pub(crate) fn child(&self, depth: usize) -> Self {
        let mut child = Self::with_capacity(self.default_capacity).with_limits(self.limits);
        child.depth = depth;
        child
    }

    /// Read-only view over a frame, one level below `self`.
    pub(crate) fn child_from_bytes(&self, data: Vec<u8>, depth: usize) -> Self {
        let mut child = Self::from_bytes(data).with_limits(self.limits);
        child.default_capacity = self.default_capacity;
        child.depth = depth;
        child
    }

    #[inline]
    pub fn read_index(&self) -> usize {
        self.read_index
    }

    #[inline]
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn limits(&self) -> &ReadLimits {
        &self.limits
    }

    /// Nesting level; zero for a root stream.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// True when nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.write_index == 0
    }

    /// True while unread bytes remain.
    #[inline]
    pub fn has_more(&self) -> bool {
        self.write_index > self.read_index
    }

    /// True when at least `count` more bytes can be read.
    #[inline]
    pub fn check_more(&self, count: usize) -> bool {
        self.remaining() >= count
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.write_index.saturating_sub(self.read_index)
    }

    /// The written bytes, from offset zero to `write_index`.
    #[inline]
    pub fn as_written(&self) -> &[u8] {
        &self.buffer[..self.write_index]
    }

    /// The bytes between the read and write cursors.
    #[inline]
    pub fn unread(&self) -> &[u8] {
        &self.buffer[self.read_index.min(self.write_index)..self.write_index]
    }

    /// Grows the store so that `additional` bytes fit after `write_index`.
    pub fn reserve(&mut self, additional: usize) {
        let required = self.write_index.saturating_add(additional);
        if required <= self.buffer.len() {
            return;
        }

        let mut capacity = self.buffer.len().max(1);
        while required > capacity {
            capacity = capacity.checked_mul(2).unwrap_or(required);
        }

        debug!(
            from = self.buffer.len(),
            to = capacity,
            written = self.write_index,
            "growing stream buffer"
        );
        let mut grown = vec![0; capacity];
        grown[..self.write_index].copy_from_slice(&self.buffer[..self.write_index]);
        self.buffer = grown;
    }

    /// Appends bytes verbatim, without a length prefix.
    pub fn append_raw(&mut self, data: &[u8]) {
        self.reserve(data.len());
        let end = self.write_index + data.len();
        self.buffer[self.write_index..end].copy_from_slice(data);
        self.write_index = end;
    }

    /// The allocated but unwritten tail of the store, for callers that fill
    /// the buffer directly (for example from a socket read). Follow with
    /// [`advance_write`](Self::advance_write).
    pub fn unwritten_mut(&mut self) -> &mut [u8] {
        &mut self.buffer[self.write_index..]
    }

    /// Marks `count` bytes of the unwritten tail as written.
    pub fn advance_write(&mut self, count: usize) -> IoResult<()> {
        let available = self.buffer.len() - self.write_index;
        if count > available {
            return Err(IoError::end_of_stream(count, available));
        }
        self.write_index += count;
        Ok(())
    }

    /// Consumes `count` bytes at the read cursor.
    pub(crate) fn take(&mut self, count: usize) -> IoResult<&[u8]> {
        let remaining = self.remaining();
        if count > remaining {
            return Err(IoError::end_of_stream(count, remaining));
        }
        let start = self.read_index;
        self.read_index += count;
        Ok(&self.buffer[start..start + count])
    }

    pub(crate) fn take_array<const N: usize>(&mut self) -> IoResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Copies exactly the written bytes, dropping any grown slack.
    pub fn finalize(&self) -> Vec<u8> {
        self.as_written().to_vec()
    }

    /// Truncates the store to the written bytes and hands it over without copying.
    pub fn into_bytes(mut self) -> Bytes {
        self.buffer.truncate(self.write_index);
        Bytes::from(self.buffer)
    }

    /// Reallocates the default capacity and rewinds both cursors.
    pub fn clear(&mut self) {
        trace!(capacity = self.default_capacity, "resetting stream buffer");
        self.buffer = vec![0; self.default_capacity];
        self.write_index = 0;
        self.read_index = 0;
    }

    /// Rewinds both cursors and keeps the allocation for reuse.
    pub fn clear_keep_buffer(&mut self) {
        self.write_index = 0;
        self.read_index = 0;
    }
}

impl Default for StreamBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<u8>> for StreamBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self::from_bytes(data)
    }
}

impl From<&[u8]> for StreamBuffer {
    fn from(data: &[u8]) -> Self {
        Self::from_bytes(data.to_vec())
    }
}
