//! Fixed-size float tuples used for positions and orientations.
//!
//! Both are written as the plain concatenation of their `f32` fields, with
//! no length prefix or framing.

use serde::{Deserialize, Serialize};

use crate::{IoResult, StreamBuffer, WireValue};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl StreamBuffer {
    pub fn write_vector3(&mut self, value: Vector3) {
        self.write_f32(value.x);
        self.write_f32(value.y);
        self.write_f32(value.z);
    }

    pub fn read_vector3(&mut self) -> IoResult<Vector3> {
        Ok(Vector3 {
            x: self.read_f32()?,
            y: self.read_f32()?,
            z: self.read_f32()?,
        })
    }

    pub fn write_quaternion(&mut self, value: Quaternion) {
        self.write_f32(value.x);
        self.write_f32(value.y);
        self.write_f32(value.z);
        self.write_f32(value.w);
    }

    pub fn read_quaternion(&mut self) -> IoResult<Quaternion> {
        Ok(Quaternion {
            x: self.read_f32()?,
            y: self.read_f32()?,
            z: self.read_f32()?,
            w: self.read_f32()?,
        })
    }
}

impl WireValue for Vector3 {
    fn write_to(&self, stream: &mut StreamBuffer) -> IoResult<()> {
        stream.write_vector3(*self);
        Ok(())
    }

    fn read_from(stream: &mut StreamBuffer) -> IoResult<Self> {
        stream.read_vector3()
    }
}

impl WireValue for Quaternion {
    fn write_to(&self, stream: &mut StreamBuffer) -> IoResult<()> {
        stream.write_quaternion(*self);
        Ok(())
    }

    fn read_from(stream: &mut StreamBuffer) -> IoResult<Self> {
        stream.read_quaternion()
    }
}
