//! Count-prefixed homogeneous sequences.
//!
//! Arrays and lists share one layout: an `i32` element count followed by
//! each element in order. Slices go in, `Vec`s come out.

use crate::{IoResult, StreamBuffer};

/// Values with a fixed, unframed wire encoding that can appear as
/// sequence elements.
pub trait WireValue: Sized {
    fn write_to(&self, stream: &mut StreamBuffer) -> IoResult<()>;

    fn read_from(stream: &mut StreamBuffer) -> IoResult<Self>;
}

macro_rules! impl_wire_value {
    ($ty:ty, $write:ident, $read:ident) => {
        impl WireValue for $ty {
            #[inline]
            fn write_to(&self, stream: &mut StreamBuffer) -> IoResult<()> {
                stream.$write(*self);
                Ok(())
            }

            #[inline]
            fn read_from(stream: &mut StreamBuffer) -> IoResult<Self> {
                stream.$read()
            }
        }
    };
}

impl_wire_value!(u8, write_u8, read_u8);
impl_wire_value!(bool, write_bool, read_bool);
impl_wire_value!(i32, write_i32, read_i32);
impl_wire_value!(f32, write_f32, read_f32);
impl_wire_value!(i64, write_i64, read_i64);

impl WireValue for String {
    fn write_to(&self, stream: &mut StreamBuffer) -> IoResult<()> {
        stream.write_str(self)
    }

    fn read_from(stream: &mut StreamBuffer) -> IoResult<Self> {
        stream.read_string()
    }
}

impl WireValue for Vec<u8> {
    fn write_to(&self, stream: &mut StreamBuffer) -> IoResult<()> {
        stream.write_bytes(self)
    }

    fn read_from(stream: &mut StreamBuffer) -> IoResult<Self> {
        stream.read_bytes()
    }
}

impl StreamBuffer {
    pub fn write_list<T: WireValue>(&mut self, values: &[T]) -> IoResult<()> {
        self.write_length(values.len())?;
        for value in values {
            value.write_to(self)?;
        }
        Ok(())
    }

    pub fn read_list<T: WireValue>(&mut self) -> IoResult<Vec<T>> {
        let count = self.read_count()?;
        // Every element occupies at least one byte.
        let mut values = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            values.push(T::read_from(self)?);
        }
        Ok(values)
    }

    /// Reads a sequence count against the collection limit.
    pub(crate) fn read_count(&mut self) -> IoResult<usize> {
        self.read_length("collection", self.limits().max_collection_len)
    }

    pub fn write_i32_list(&mut self, values: &[i32]) -> IoResult<()> {
        self.write_list(values)
    }

    pub fn read_i32_list(&mut self) -> IoResult<Vec<i32>> {
        self.read_list()
    }

    pub fn write_f32_list(&mut self, values: &[f32]) -> IoResult<()> {
        self.write_list(values)
    }

    pub fn read_f32_list(&mut self) -> IoResult<Vec<f32>> {
        self.read_list()
    }

    pub fn write_i64_list(&mut self, values: &[i64]) -> IoResult<()> {
        self.write_list(values)
    }

    pub fn read_i64_list(&mut self) -> IoResult<Vec<i64>> {
        self.read_list()
    }

    pub fn write_string_list<S: AsRef<str>>(&mut self, values: &[S]) -> IoResult<()> {
        self.write_length(values.len())?;
        for value in values {
            self.write_str(value.as_ref())?;
        }
        Ok(())
    }

    pub fn read_string_list(&mut self) -> IoResult<Vec<String>> {
        self.read_list()
    }
}
