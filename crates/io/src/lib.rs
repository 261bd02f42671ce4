//! Bridge IO - growable binary stream buffer
//!
//! This crate provides [`StreamBuffer`], a single growable byte store with
//! independent read and write cursors, and the codecs layered on it:
//! fixed-width primitives, length-prefixed text and byte spans,
//! count-prefixed sequences and recursively framed objects.
//!
//! All multi-byte values are little-endian.

mod adapters;
mod collections;
mod error;
mod primitives;
mod registry;
mod serializable;
mod stream_buffer;
mod var_len;

pub use adapters::{Quaternion, Vector3};
pub use collections::WireValue;
pub use error::{IoError, IoResult};
pub use registry::{AnySerializable, Constructor, SerializerRegistry};
pub use serializable::{Serializable, SerializableExt};
pub use stream_buffer::StreamBuffer;

// Re-export configuration types used to build streams
pub use bridge_config::{ReadLimits, StreamConfig, DEFAULT_CAPACITY};
