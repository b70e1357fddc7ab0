use std::{
    io::{Read, Write},
    ops::Deref,
};

use super::{
    Deserialize, Deserializer, Error, ErrorKind, ResultContextExt, Serialize, Serializer,
};

/// Opaque byte buffer, serialized as a `u32` length followed by the raw bytes.
///
/// Unlike `Vec<u8>`, the bytes are read and written in bulk rather than one element at a time.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Blob(pub Vec<u8>);

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl Deref for Blob {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Debug for Blob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Blob({} bytes)", self.0.len())
    }
}

impl Serialize for Blob {
    fn serialize(&self, serializer: &mut Serializer<impl Write>) -> Result<(), Error> {
        let len = u32::try_from(self.0.len()).map_err(|_| {
            ErrorKind::Serialize.make(format!(
                "blob of {} bytes does not fit in a u32 length prefix",
                self.0.len()
            ))
        })?;
        len.serialize(serializer)
            .context("cannot serialize blob length")?;
        serializer.write_bytes(&self.0)
    }
}

impl Deserialize for Blob {
    fn deserialize(deserializer: &mut Deserializer<impl Read>) -> Result<Self, Error> {
        let len = deserializer
            .deserialize::<u32>()
            .context("cannot read blob length")? as usize;
        if len > deserializer.remaining_hint() {
            return Err(ErrorKind::Deserialize.make(format!(
                "blob length {len} exceeds the {} bytes left in the stream",
                deserializer.remaining_hint()
            )));
        }
        let mut buffer = vec![0; len];
        deserializer
            .read_bytes(&mut buffer)
            .with_context(|| format!("cannot read blob of {len} bytes"))?;
        Ok(Self(buffer))
    }
}

#[cfg(test)]
mod tests {
    use crate::binary::{deserialize, serialize};

    use super::Blob;

    #[test]
    fn blob_is_length_prefixed_raw_bytes() {
        let blob = Blob(vec![0xde, 0xad, 0xbe, 0xef]);
        let bytes = serialize(&blob).unwrap();
        assert_eq!(bytes, [4, 0, 0, 0, 0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(deserialize::<Blob>(&bytes).unwrap(), blob);
    }

    #[test]
    fn oversized_length_is_rejected_before_allocating() {
        let error = deserialize::<Blob>(&[0xff, 0xff, 0xff, 0xff, 1, 2]).unwrap_err();
        assert!(error.root_cause().contains("exceeds"));
    }
}
