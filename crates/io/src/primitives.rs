//! Fixed-width little-endian encoding of primitive values.

use crate::{IoError, IoResult, StreamBuffer};

impl StreamBuffer {
    pub fn write_u8(&mut self, value: u8) {
        self.append_raw(&[value]);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(value as u8);
    }

    pub fn write_i32(&mut self, value: i32) {
        self.append_raw(&value.to_le_bytes());
    }

    /// Floats share the byte layout of `i32`: the raw IEEE-754 bits.
    pub fn write_f32(&mut self, value: f32) {
        self.write_i32(value.to_bits() as i32);
    }

    pub fn write_i64(&mut self, value: i64) {
        self.append_raw(&value.to_le_bytes());
    }

    #[inline]
    pub fn read_u8(&mut self) -> IoResult<u8> {
        let [value] = self.take_array::<1>()?;
        Ok(value)
    }

    pub fn read_bool(&mut self) -> IoResult<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(IoError::InvalidValue {
                kind: "bool",
                value,
            }),
        }
    }

    #[inline]
    pub fn read_i32(&mut self) -> IoResult<i32> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    /// Rebuilds the exact bit pattern, NaN payloads and signed zero included.
    #[inline]
    pub fn read_f32(&mut self) -> IoResult<f32> {
        Ok(f32::from_bits(self.read_i32()? as u32))
    }

    #[inline]
    pub fn read_i64(&mut self) -> IoResult<i64> {
        Ok(i64::from_le_bytes(self.take_array()?))
    }
}
