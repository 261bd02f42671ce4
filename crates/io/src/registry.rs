//! Runtime construction of serializable objects by type tag.
//!
//! Callers that only learn the concrete kind of a frame at runtime register
//! a zero-argument constructor per tag and pass the registry to
//! [`StreamBuffer::read_dynamic`].

use std::any::Any;
use std::fmt;

use hashbrown::HashMap;
use tracing::warn;

use crate::{IoError, IoResult, Serializable, StreamBuffer};

/// A [`Serializable`] object that can be recovered as its concrete type.
pub trait AnySerializable: Serializable + Any {
    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Serializable + Any> AnySerializable for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Builds a default instance of one registered kind.
pub type Constructor = fn() -> Box<dyn AnySerializable>;

fn construct_default<T: AnySerializable + Default>() -> Box<dyn AnySerializable> {
    Box::new(T::default())
}

/// Maps type tags to constructors.
#[derive(Clone, Default)]
pub struct SerializerRegistry {
    constructors: HashMap<&'static str, Constructor>,
}

impl SerializerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T::default` under `tag`, replacing any previous entry.
    pub fn register<T: AnySerializable + Default>(&mut self, tag: &'static str) -> &mut Self {
        self.register_with(tag, construct_default::<T>)
    }

    pub fn register_with(&mut self, tag: &'static str, constructor: Constructor) -> &mut Self {
        self.constructors.insert(tag, constructor);
        self
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.constructors.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Creates a default instance of the kind registered under `tag`.
    pub fn construct(&self, tag: &str) -> IoResult<Box<dyn AnySerializable>> {
        match self.constructors.get(tag) {
            Some(constructor) => Ok(constructor()),
            None => {
                warn!(tag, "no constructor registered for type tag");
                Err(IoError::UnknownType(tag.to_string()))
            }
        }
    }
}

impl fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.constructors.keys()).finish()
    }
}

impl StreamBuffer {
    /// Decodes the next frame as the kind registered under `tag`.
    ///
    /// An unknown tag fails before any input is consumed.
    pub fn read_dynamic(
        &mut self,
        registry: &SerializerRegistry,
        tag: &str,
    ) -> IoResult<Box<dyn AnySerializable>> {
        let mut value = registry.construct(tag)?;
        let mut child = self.read_stream()?;
        value.deserialize(&mut child)?;
        Ok(value)
    }

    /// Decodes a count-prefixed sequence of frames of the kind registered
    /// under `tag`.
    pub fn read_dynamic_list(
        &mut self,
        registry: &SerializerRegistry,
        tag: &str,
    ) -> IoResult<Vec<Box<dyn AnySerializable>>> {
        if !registry.contains(tag) {
            return Err(IoError::UnknownType(tag.to_string()));
        }
        let count = self.read_count()?;
        let mut values = Vec::with_capacity(count.min(self.remaining() / 4));
        for _ in 0..count {
            values.push(self.read_dynamic(registry, tag)?);
        }
        Ok(values)
    }
}
