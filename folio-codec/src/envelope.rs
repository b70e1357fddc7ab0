use std::{
    fmt,
    io::{Read, Write},
    num::NonZeroU32,
    str::FromStr,
};

use folio_core::{
    binary::{Blob, Deserialize, Deserializer, Error, ResultContextExt, Serialize, Serializer},
    Deserialize, Serialize,
};

/// Identifies the algorithm a stored envelope was compressed with.
///
/// Unknown values are kept as-is rather than rejected, so that a record written by some other
/// version of the codec can still be loaded and then degrade gracefully on decode.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressionKind(pub u32);

impl CompressionKind {
    pub const GZIP: Self = Self(1);

    pub fn is_supported(self) -> bool {
        self == Self::GZIP
    }
}

impl Default for CompressionKind {
    fn default() -> Self {
        Self::GZIP
    }
}

impl fmt::Debug for CompressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for CompressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::GZIP => f.write_str("gzip"),
            Self(other) => write!(f, "unknown({other})"),
        }
    }
}

impl FromStr for CompressionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gzip" => Ok(Self::GZIP),
            _ => Err(format!("unknown compression kind {s:?}")),
        }
    }
}

impl Serialize for CompressionKind {
    fn serialize(&self, serializer: &mut Serializer<impl Write>) -> Result<(), Error> {
        self.0.serialize(serializer)
    }
}

impl Deserialize for CompressionKind {
    fn deserialize(deserializer: &mut Deserializer<impl Read>) -> Result<Self, Error> {
        deserializer
            .deserialize::<u32>()
            .map(Self)
            .context("cannot deserialize compression kind")
    }
}

/// One independently compressed segment of an article body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContentChunk {
    /// Zero-based position of the segment within the body. Authoritative for reassembly order.
    pub index: u32,
    /// Length of the segment before compression.
    pub original_size: u32,
    /// Length of `data`.
    pub compressed_size: u32,
    pub data: Blob,
}

/// Everything needed to put an article body back together.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EncodedContent {
    pub compression: CompressionKind,
    /// Plaintext bytes per chunk; only the last chunk may be shorter.
    pub chunk_size_bytes: NonZeroU32,
    pub original_size_bytes: u64,
    pub chunks: Vec<ContentChunk>,
}

impl EncodedContent {
    /// Envelope for an empty body.
    pub fn empty(chunk_size_bytes: NonZeroU32) -> Self {
        Self {
            compression: CompressionKind::GZIP,
            chunk_size_bytes,
            original_size_bytes: 0,
            chunks: vec![],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn compressed_size_bytes(&self) -> u64 {
        self.chunks.iter().map(|chunk| chunk.data.len() as u64).sum()
    }

    pub fn stats(&self) -> EnvelopeStats {
        let compressed_size_bytes = self.compressed_size_bytes();
        EnvelopeStats {
            chunk_count: self.chunks.len(),
            original_size_bytes: self.original_size_bytes,
            compressed_size_bytes,
            ratio: if self.original_size_bytes > 0 {
                compressed_size_bytes as f64 / self.original_size_bytes as f64
            } else {
                1.0
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeStats {
    pub chunk_count: usize,
    pub original_size_bytes: u64,
    pub compressed_size_bytes: u64,
    /// Compressed size over original size; 1.0 for empty content.
    pub ratio: f64,
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use folio_core::binary::{deserialize, serialize, Blob};

    use super::{CompressionKind, ContentChunk, EncodedContent};

    #[test]
    fn compression_kind_display() {
        assert_eq!(CompressionKind::GZIP.to_string(), "gzip");
        assert_eq!(CompressionKind(7).to_string(), "unknown(7)");
        assert_eq!("gzip".parse::<CompressionKind>(), Ok(CompressionKind::GZIP));
        assert!("lzo".parse::<CompressionKind>().is_err());
    }

    #[test]
    fn unknown_compression_kind_survives_serialization() {
        let envelope = EncodedContent {
            compression: CompressionKind(42),
            chunk_size_bytes: NonZeroU32::new(4).unwrap(),
            original_size_bytes: 3,
            chunks: vec![ContentChunk {
                index: 0,
                original_size: 3,
                compressed_size: 2,
                data: Blob(vec![1, 2]),
            }],
        };
        let bytes = serialize(&envelope).unwrap();
        assert_eq!(deserialize::<EncodedContent>(&bytes).unwrap(), envelope);
    }

    #[test]
    fn chunk_field_layout() {
        let chunk = ContentChunk {
            index: 1,
            original_size: 2,
            compressed_size: 3,
            data: Blob(vec![9, 9, 9]),
        };
        assert_eq!(
            serialize(&chunk).unwrap(),
            [1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0, 3, 0, 0, 0, 9, 9, 9]
        );
    }

    #[test]
    fn stats_of_empty_envelope() {
        let stats = EncodedContent::empty(NonZeroU32::new(16).unwrap()).stats();
        assert_eq!(stats.chunk_count, 0);
        assert_eq!(stats.compressed_size_bytes, 0);
        assert_eq!(stats.ratio, 1.0);
    }
}
