use std::num::NonZeroU32;

use folio_codec::{encode, EncodeError, EncodedContent};
use tracing::debug;

use crate::ArticleRecord;

/// Encodes a new body. Nothing is stored yet; see [`replace_content`].
pub fn encode_content(text: &str, chunk_size: NonZeroU32) -> Result<EncodedContent, EncodeError> {
    encode(text.as_bytes(), chunk_size)
}

/// Replaces the previous chunk set and any legacy body wholesale.
pub fn replace_content(record: &mut ArticleRecord, encoded: EncodedContent) {
    debug!(
        id = %record.id,
        chunks = encoded.chunks.len(),
        original_size_bytes = encoded.original_size_bytes,
        "Stored article content"
    );
    record.content = Some(encoded);
    record.legacy_content = None;
}

/// Stores `text` as the record's body.
///
/// Encoding happens before the record is touched, so on error the record keeps its previous
/// content.
pub fn apply_content(
    record: &mut ArticleRecord,
    text: &str,
    chunk_size: NonZeroU32,
) -> Result<(), EncodeError> {
    let encoded = encode_content(text, chunk_size)?;
    replace_content(record, encoded);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use folio_codec::{decode_text, DEFAULT_CHUNK_SIZE};

    use crate::ArticleRecord;

    use super::apply_content;

    #[test]
    fn new_content_replaces_legacy_body() {
        let mut record = ArticleRecord::legacy("Old", "old plain body");
        apply_content(&mut record, "fresh body", DEFAULT_CHUNK_SIZE).unwrap();

        assert_eq!(record.legacy_content, None);
        assert_eq!(decode_text(record.content.as_ref().unwrap()), "fresh body");
    }

    #[test]
    fn rewrite_replaces_whole_chunk_set() {
        let mut record = ArticleRecord::new("Title");
        let size = NonZeroU32::new(4).unwrap();
        apply_content(&mut record, "a long first version of the body", size).unwrap();
        apply_content(&mut record, "short", size).unwrap();

        let content = record.content.as_ref().unwrap();
        assert_eq!(content.chunks.len(), 2);
        assert_eq!(content.original_size_bytes, 5);
        assert_eq!(decode_text(content), "short");
    }
}
