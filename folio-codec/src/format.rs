//! On-disk form of an [`EncodedContent`] envelope.
//!
//! ```text
//! magic               u32   FORMAT_MAGIC
//! format_version      u16   FORMAT_VERSION
//! compression         u32
//! chunk_size_bytes    u32   non-zero
//! original_size_bytes u64
//! chunks              u32 count, then per chunk:
//!     index           u32
//!     original_size   u32
//!     compressed_size u32
//!     data            u32 length + bytes
//! ```
//!
//! All integers are little-endian.

use std::io::Cursor;

use folio_core::{
    binary::{self, Error, ResultContextExt, Serialize as _, Serializer},
    primitive::{ConstU16, ConstU32},
    Deserialize, Serialize,
};

use crate::EncodedContent;

pub const FORMAT_MAGIC: u32 = 0x464C494F;
pub const FORMAT_VERSION: u16 = 1;

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct EnvelopeHeader {
    pub magic: ConstU32<FORMAT_MAGIC>,
    pub format_version: ConstU16<FORMAT_VERSION>,
}

#[derive(Debug, Clone, Deserialize)]
struct StoredEnvelope {
    // Only checked while deserializing.
    #[allow(dead_code)]
    header: EnvelopeHeader,
    content: EncodedContent,
}

impl EncodedContent {
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut buffer = Vec::with_capacity(64 + self.compressed_size_bytes() as usize);
        let mut serializer = Serializer::new(Cursor::new(&mut buffer));
        EnvelopeHeader::default()
            .serialize(&mut serializer)
            .context("cannot serialize envelope header")?;
        self.serialize(&mut serializer)
            .context("cannot serialize content envelope")?;
        Ok(buffer)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        binary::deserialize::<StoredEnvelope>(bytes)
            .map(|stored| stored.content)
            .context("cannot deserialize content envelope")
    }
}
