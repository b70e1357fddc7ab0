use thiserror::Error;

use crate::CompressionKind;

/// Failure on the write path. Never partially recoverable: the whole encode is discarded.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("cannot compress chunk {index}")]
    Compression {
        index: u32,
        #[source]
        source: std::io::Error,
    },
    #[error("{len} bytes split into chunks of {chunk_size} bytes would need more than u32::MAX chunks")]
    TooManyChunks { len: usize, chunk_size: u32 },
    #[error("compressed form of chunk {index} is {size} bytes, which does not fit in a u32")]
    CompressedChunkTooLarge { index: u32, size: usize },
}

/// Failure on the read path. Callers on the response path treat all of these as soft.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unsupported compression kind {0}")]
    UnsupportedCompression(CompressionKind),
    #[error("chunk {index} does not decompress cleanly")]
    CorruptChunk {
        index: u32,
        #[source]
        source: std::io::Error,
    },
    #[error("chunk {index} records {original_size} bytes, more than the chunk size of {chunk_size}")]
    ChunkTooLarge {
        index: u32,
        original_size: u32,
        chunk_size: u32,
    },
    #[error("chunk {index} decompressed to {actual} bytes, but {expected} were recorded")]
    ChunkSizeMismatch {
        index: u32,
        expected: u32,
        actual: u64,
    },
    #[error("content decompressed to {actual} bytes, but {expected} were recorded")]
    TotalSizeMismatch { expected: u64, actual: u64 },
    #[error("decoded content is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Structural problem found by [`EncodedContent::validate`](crate::EncodedContent::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unsupported compression kind {0}")]
    UnsupportedCompression(CompressionKind),
    #[error("chunk {index} records {recorded} compressed bytes but holds {actual}")]
    CompressedSizeMismatch {
        index: u32,
        recorded: u32,
        actual: usize,
    },
    #[error("chunk {index} holds {original_size} bytes, more than the chunk size of {chunk_size}")]
    ChunkTooLarge {
        index: u32,
        original_size: u32,
        chunk_size: u32,
    },
    #[error("chunk {index} is short ({original_size} of {chunk_size} bytes) but is not the last chunk")]
    ShortInnerChunk {
        index: u32,
        original_size: u32,
        chunk_size: u32,
    },
    #[error("chunk {index} is empty")]
    EmptyChunk { index: u32 },
    #[error("expected chunk index {expected}, found {found}")]
    NonContiguousIndex { expected: u32, found: u32 },
    #[error("chunk sizes add up to {actual} bytes, but the envelope records {recorded}")]
    OriginalSizeMismatch { recorded: u64, actual: u64 },
}
