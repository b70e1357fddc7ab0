use std::{
    io::{Read, Write},
    num::NonZeroU32,
};

use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use folio_core::binary::Blob;
use tracing::{debug, trace, warn};

use crate::{CompressionKind, ContentChunk, DecodeError, EncodeError, EncodedContent};

/// Chunk size used by the persistence layer: 32 KiB.
pub const DEFAULT_CHUNK_SIZE: NonZeroU32 = match NonZeroU32::new(32 * 1024) {
    Some(size) => size,
    None => panic!("default chunk size must be non-zero"),
};

/// Upper bound on output buffer space reserved up front from recorded sizes, which may be damaged.
/// Anything beyond this grows with the data actually inflated.
const MAX_PREALLOCATION: u64 = 64 * 1024 * 1024;

fn capacity_hint(recorded: u64) -> usize {
    recorded.min(MAX_PREALLOCATION) as usize
}

/// Splits `plaintext` into `chunk_size` byte segments and gzip-compresses each one separately.
///
/// Either every chunk is produced or an error is returned; a partial chunk set never escapes.
pub fn encode(plaintext: &[u8], chunk_size: NonZeroU32) -> Result<EncodedContent, EncodeError> {
    let chunk_len = chunk_size.get() as usize;
    let chunk_count = plaintext.len().div_ceil(chunk_len);
    if u32::try_from(chunk_count).is_err() {
        return Err(EncodeError::TooManyChunks {
            len: plaintext.len(),
            chunk_size: chunk_size.get(),
        });
    }

    debug!(
        "Encoding {} bytes into {chunk_count} chunks of up to {chunk_len} bytes",
        plaintext.len()
    );
    let chunks = plaintext
        .chunks(chunk_len)
        .enumerate()
        .map(|(i, segment)| encode_segment(i as u32, segment))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(EncodedContent {
        compression: CompressionKind::GZIP,
        chunk_size_bytes: chunk_size,
        original_size_bytes: plaintext.len() as u64,
        chunks,
    })
}

fn encode_segment(index: u32, segment: &[u8]) -> Result<ContentChunk, EncodeError> {
    let compress = || -> std::io::Result<Vec<u8>> {
        let mut encoder = GzEncoder::new(Vec::with_capacity(segment.len() / 2), Compression::best());
        encoder.write_all(segment)?;
        encoder.finish()
    };
    let data = compress().map_err(|source| EncodeError::Compression { index, source })?;
    let compressed_size = u32::try_from(data.len()).map_err(|_| {
        EncodeError::CompressedChunkTooLarge {
            index,
            size: data.len(),
        }
    })?;
    trace!(
        index,
        original_size = segment.len(),
        compressed_size,
        "Compressed chunk"
    );
    Ok(ContentChunk {
        index,
        // Segments are at most `chunk_size` long, which is a u32.
        original_size: segment.len() as u32,
        compressed_size,
        data: Blob(data),
    })
}

/// Decompresses a single chunk without looking at any of its neighbours.
pub fn decode_chunk(
    compression: CompressionKind,
    chunk: &ContentChunk,
) -> Result<Vec<u8>, DecodeError> {
    if !compression.is_supported() {
        return Err(DecodeError::UnsupportedCompression(compression));
    }
    let mut output = Vec::with_capacity(capacity_hint(u64::from(chunk.original_size)));
    decompress_into(chunk, &mut output)?;
    Ok(output)
}

fn decompress_into(chunk: &ContentChunk, output: &mut Vec<u8>) -> Result<(), DecodeError> {
    let start = output.len();
    // Read one byte past the recorded size so that an oversized chunk is detected without
    // inflating all of it.
    GzDecoder::new(&chunk.data[..])
        .take(u64::from(chunk.original_size) + 1)
        .read_to_end(output)
        .map_err(|source| DecodeError::CorruptChunk {
            index: chunk.index,
            source,
        })?;
    let actual = (output.len() - start) as u64;
    if actual != u64::from(chunk.original_size) {
        return Err(DecodeError::ChunkSizeMismatch {
            index: chunk.index,
            expected: chunk.original_size,
            actual,
        });
    }
    Ok(())
}

/// Chunks sorted by index. For duplicated indices the chunk stored first wins.
fn ordered_chunks(chunks: &[ContentChunk]) -> Vec<&ContentChunk> {
    let mut ordered: Vec<&ContentChunk> = chunks.iter().collect();
    // Stable, so storage order is kept among equal indices.
    ordered.sort_by_key(|chunk| chunk.index);
    ordered.dedup_by(|later, earlier| {
        let duplicate = later.index == earlier.index;
        if duplicate {
            warn!(index = later.index, "Dropping chunk with duplicate index");
        }
        duplicate
    });

    let mut expected = 0;
    for chunk in &ordered {
        if chunk.index != expected {
            warn!(
                expected,
                found = chunk.index,
                "Chunk indices are not contiguous"
            );
        }
        expected = chunk.index.saturating_add(1);
    }

    ordered
}

/// Reassembles the original bytes, reporting precisely what went wrong if that is not possible.
pub fn try_decode(encoded: &EncodedContent) -> Result<Vec<u8>, DecodeError> {
    if encoded.chunks.is_empty() {
        if encoded.original_size_bytes != 0 {
            debug!(
                original_size_bytes = encoded.original_size_bytes,
                "Envelope has no chunks but records a non-zero size"
            );
        }
        return Ok(vec![]);
    }
    if !encoded.compression.is_supported() {
        return Err(DecodeError::UnsupportedCompression(encoded.compression));
    }

    let chunk_size = encoded.chunk_size_bytes.get();
    if let Some(chunk) = encoded
        .chunks
        .iter()
        .find(|chunk| chunk.original_size > chunk_size)
    {
        return Err(DecodeError::ChunkTooLarge {
            index: chunk.index,
            original_size: chunk.original_size,
            chunk_size,
        });
    }

    let ordered = ordered_chunks(&encoded.chunks);
    let recorded: u64 = ordered
        .iter()
        .map(|chunk| u64::from(chunk.original_size))
        .sum();
    let mut output = Vec::with_capacity(capacity_hint(recorded.min(encoded.original_size_bytes)));
    for chunk in ordered {
        decompress_into(chunk, &mut output)?;
    }

    let actual = output.len() as u64;
    if actual != encoded.original_size_bytes {
        return Err(DecodeError::TotalSizeMismatch {
            expected: encoded.original_size_bytes,
            actual,
        });
    }
    trace!(
        size = actual,
        chunks = encoded.chunks.len(),
        "Decoded content"
    );
    Ok(output)
}

/// Reassembles the original bytes. A damaged envelope yields empty output and a warning.
pub fn decode(encoded: &EncodedContent) -> Vec<u8> {
    match try_decode(encoded) {
        Ok(bytes) => bytes,
        Err(error) => {
            warn!(%error, "Cannot decode content; falling back to empty content");
            vec![]
        }
    }
}

pub fn try_decode_text(encoded: &EncodedContent) -> Result<String, DecodeError> {
    Ok(String::from_utf8(try_decode(encoded)?)?)
}

/// Like [`decode`], but for text. Invalid UTF-8 also degrades to an empty string.
pub fn decode_text(encoded: &EncodedContent) -> String {
    match try_decode_text(encoded) {
        Ok(text) => text,
        Err(error) => {
            warn!(%error, "Cannot decode content as text; falling back to empty content");
            String::new()
        }
    }
}
