//! Chunked, independently gzip-compressed storage for article bodies.
//!
//! [`encode`] splits a body into fixed-size byte chunks and compresses each one on its own,
//! producing an [`EncodedContent`] envelope. [`decode`] puts the body back together, degrading to
//! empty output (with a warning) instead of failing when the stored envelope is damaged.

pub mod compression;
pub mod envelope;
pub mod error;
pub mod format;
pub mod validate;

pub use compression::{
    decode, decode_chunk, decode_text, encode, try_decode, try_decode_text, DEFAULT_CHUNK_SIZE,
};
pub use envelope::{CompressionKind, ContentChunk, EncodedContent, EnvelopeStats};
pub use error::{DecodeError, EncodeError, ValidationError};
