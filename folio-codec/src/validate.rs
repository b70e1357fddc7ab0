use crate::{EncodedContent, ValidationError};

impl EncodedContent {
    /// Checks the envelope's bookkeeping without decompressing anything.
    ///
    /// The decoder is deliberately more lenient than this; validation is for tooling and for
    /// catching bad records before they are written.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.compression.is_supported() {
            return Err(ValidationError::UnsupportedCompression(self.compression));
        }

        let chunk_size = self.chunk_size_bytes.get();
        let last = self.chunks.len().saturating_sub(1);
        let mut total = 0_u64;
        for (position, chunk) in self.chunks.iter().enumerate() {
            let index = chunk.index;
            if index as usize != position {
                return Err(ValidationError::NonContiguousIndex {
                    expected: position as u32,
                    found: index,
                });
            }
            if chunk.compressed_size as usize != chunk.data.len() {
                return Err(ValidationError::CompressedSizeMismatch {
                    index,
                    recorded: chunk.compressed_size,
                    actual: chunk.data.len(),
                });
            }
            if chunk.original_size == 0 {
                return Err(ValidationError::EmptyChunk { index });
            }
            if chunk.original_size > chunk_size {
                return Err(ValidationError::ChunkTooLarge {
                    index,
                    original_size: chunk.original_size,
                    chunk_size,
                });
            }
            if chunk.original_size < chunk_size && position != last {
                return Err(ValidationError::ShortInnerChunk {
                    index,
                    original_size: chunk.original_size,
                    chunk_size,
                });
            }
            total += u64::from(chunk.original_size);
        }

        if total != self.original_size_bytes {
            return Err(ValidationError::OriginalSizeMismatch {
                recorded: self.original_size_bytes,
                actual: total,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use folio_core::binary::Blob;

    use crate::{encode, CompressionKind, EncodedContent, ValidationError};

    fn sample() -> EncodedContent {
        encode(b"validation sample text", NonZeroU32::new(5).unwrap()).unwrap()
    }

    #[test]
    fn fresh_encodes_are_valid() {
        assert_eq!(sample().validate(), Ok(()));
        assert_eq!(
            EncodedContent::empty(NonZeroU32::new(5).unwrap()).validate(),
            Ok(())
        );
    }

    #[test]
    fn storage_order_must_match_index_order() {
        let mut envelope = sample();
        envelope.chunks.swap(0, 1);
        assert_eq!(
            envelope.validate(),
            Err(ValidationError::NonContiguousIndex {
                expected: 0,
                found: 1
            })
        );
    }

    #[test]
    fn compressed_size_must_match_data() {
        let mut envelope = sample();
        envelope.chunks[2].data = Blob(vec![1, 2, 3]);
        assert!(matches!(
            envelope.validate(),
            Err(ValidationError::CompressedSizeMismatch { index: 2, .. })
        ));
    }

    #[test]
    fn only_last_chunk_may_be_short() {
        let mut envelope = sample();
        envelope.chunks[1].original_size = 4;
        assert!(matches!(
            envelope.validate(),
            Err(ValidationError::ShortInnerChunk { index: 1, .. })
        ));
    }

    #[test]
    fn totals_must_add_up() {
        let mut envelope = sample();
        envelope.original_size_bytes += 1;
        assert!(matches!(
            envelope.validate(),
            Err(ValidationError::OriginalSizeMismatch { .. })
        ));

        let mut empty = EncodedContent::empty(NonZeroU32::new(5).unwrap());
        empty.original_size_bytes = 10;
        assert!(empty.validate().is_err());
    }

    #[test]
    fn unsupported_compression_is_invalid() {
        let mut envelope = sample();
        envelope.compression = CompressionKind(0);
        assert_eq!(
            envelope.validate(),
            Err(ValidationError::UnsupportedCompression(CompressionKind(0)))
        );
    }
}
