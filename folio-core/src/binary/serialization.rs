mod serializer;

pub use serializer::*;

use std::{
    io::{Cursor, Write},
    num::NonZeroU32,
};

use super::{Error, ErrorKind, ResultContextExt};

/// Implemented by everything serializable to bytes.
pub trait Serialize {
    /// Serializes the value to bytes.
    fn serialize(&self, serializer: &mut Serializer<impl Write>) -> Result<(), Error>;
}

impl Serialize for () {
    fn serialize(&self, _: &mut Serializer<impl Write>) -> Result<(), Error> {
        Ok(())
    }
}

macro_rules! serialize_primitive_le {
    ($T:ty) => {
        impl Serialize for $T {
            fn serialize(&self, serializer: &mut Serializer<impl Write>) -> Result<(), Error> {
                serializer.write_bytes(&self.to_le_bytes())
            }
        }
    };
}

serialize_primitive_le!(u8);
serialize_primitive_le!(u16);
serialize_primitive_le!(u32);
serialize_primitive_le!(u64);

macro_rules! serialize_nonzero_primitive_le {
    ($NonZero:ty) => {
        impl Serialize for $NonZero {
            fn serialize(&self, serializer: &mut Serializer<impl Write>) -> Result<(), Error> {
                self.get().serialize(serializer)
            }
        }
    };
}

serialize_nonzero_primitive_le!(NonZeroU32);

/// `Vec<T>` is serialized as a `u32` size followed by the vector's elements.
impl<T> Serialize for Vec<T>
where
    T: Serialize,
{
    fn serialize(&self, serializer: &mut Serializer<impl Write>) -> Result<(), Error> {
        let len = u32::try_from(self.len()).map_err(|_| {
            ErrorKind::Serialize.make(format!(
                "array of length {} does not fit in a u32 length prefix",
                self.len()
            ))
        })?;
        len.serialize(serializer)
            .context("cannot serialize length of array")?;
        for (i, element) in self.iter().enumerate() {
            element
                .serialize(serializer)
                .with_context(|| format!("cannot serialize array element at index {i}"))?;
        }
        Ok(())
    }
}

/// Convenience function that serializes a value into a fresh buffer.
pub fn serialize(value: &impl Serialize) -> Result<Vec<u8>, Error> {
    let mut buffer = vec![];
    value.serialize(&mut Serializer::new(Cursor::new(&mut buffer)))?;
    Ok(buffer)
}
