mod deserializer;

pub use deserializer::*;

use std::{
    io::Read,
    num::NonZeroU32,
};

use super::{Error, ErrorKind, ResultContextExt};

/// Implemented by everything deserializable from bytes.
pub trait Deserialize: Sized {
    /// Deserializes the value from bytes.
    fn deserialize(deserializer: &mut Deserializer<impl Read>) -> Result<Self, Error>;
}

impl Deserialize for () {
    fn deserialize(_: &mut Deserializer<impl Read>) -> Result<Self, Error> {
        Ok(())
    }
}

macro_rules! deserialize_primitive_le {
    ($T:ty) => {
        impl Deserialize for $T {
            fn deserialize(deserializer: &mut Deserializer<impl Read>) -> Result<Self, Error> {
                let mut buf = [0; std::mem::size_of::<$T>()];
                deserializer.read_bytes(&mut buf)?;
                Ok(<$T>::from_le_bytes(buf))
            }
        }
    };
}

deserialize_primitive_le!(u8);
deserialize_primitive_le!(u16);
deserialize_primitive_le!(u32);
deserialize_primitive_le!(u64);

macro_rules! deserialize_nonzero_primitive_le {
    ($Underlying:ty, $NonZero:ty) => {
        impl Deserialize for $NonZero {
            fn deserialize(deserializer: &mut Deserializer<impl Read>) -> Result<Self, Error> {
                let num = deserializer.deserialize::<$Underlying>()?;
                <$NonZero>::new(num).ok_or_else(|| {
                    ErrorKind::Deserialize.make("non-zero value expected but got zero")
                })
            }
        }
    };
}

deserialize_nonzero_primitive_le!(u32, NonZeroU32);

/// `Vec<T>` is serialized as a `u32` size followed by the vector's elements.
impl<T> Deserialize for Vec<T>
where
    T: Deserialize,
{
    fn deserialize(deserializer: &mut Deserializer<impl Read>) -> Result<Self, Error> {
        let len = deserializer
            .deserialize::<u32>()
            .context("cannot read array length")? as usize;
        // The length prefix is untrusted; don't let it drive a huge allocation up front.
        let mut vec = Vec::with_capacity(len.min(deserializer.remaining_hint()));
        for i in 0..len {
            vec.push(deserializer.deserialize().with_context(|| {
                format!("cannot deserialize array field {i} (array of length {len})")
            })?);
        }
        Ok(vec)
    }
}

impl<R> Deserializer<R> {
    /// Convenience function that deserializes a type implementing [`Deserialize`] from the current
    /// stream position.
    pub fn deserialize<T>(&mut self) -> Result<T, Error>
    where
        R: Read,
        T: Deserialize,
    {
        T::deserialize(self)
    }
}

/// Convenience function that deserializes a type implementing [`Deserialize`] from a buffer.
///
/// Fails if any bytes are left over after the value.
pub fn deserialize<T>(buffer: &[u8]) -> Result<T, Error>
where
    T: Deserialize,
{
    let mut deserializer = Deserializer::from_buffer(buffer);
    let value = T::deserialize(&mut deserializer)?;
    let trailing = deserializer.stream_len() - deserializer.stream_position();
    if trailing != 0 {
        return Err(ErrorKind::Deserialize.make(format!(
            "{trailing} trailing bytes after end of value (at stream position {:08x})",
            deserializer.stream_position()
        )));
    }
    Ok(value)
}
