use folio_codec::decode_text;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::ArticleRecord;

/// An article as exposed to API consumers. Storage details such as chunk bytes and compression
/// metadata are never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    pub id: Uuid,
    pub title: String,
    /// The body as plaintext segments; empty when the article has no body.
    pub content: Vec<String>,
}

/// Picks the body to show for a record: decoded chunks first, then the legacy plain-text body,
/// then nothing. Never fails.
pub fn resolve_body(record: &ArticleRecord) -> String {
    let decoded = record
        .content
        .as_ref()
        .map(decode_text)
        .unwrap_or_default();
    if !decoded.is_empty() {
        return decoded;
    }

    match &record.legacy_content {
        Some(legacy) if !legacy.is_empty() => {
            debug!(id = %record.id, "Serving legacy plain-text content");
            legacy.clone()
        }
        _ => String::new(),
    }
}

impl From<&ArticleRecord> for ArticleResponse {
    fn from(record: &ArticleRecord) -> Self {
        let body = resolve_body(record);
        Self {
            id: record.id,
            title: record.title.clone(),
            content: if body.is_empty() { vec![] } else { vec![body] },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use folio_codec::{encode, CompressionKind, DEFAULT_CHUNK_SIZE};

    use crate::{write::apply_content, ArticleRecord};

    use super::{resolve_body, ArticleResponse};

    #[test]
    fn chunked_content_wins() {
        let mut record = ArticleRecord::new("Title");
        apply_content(&mut record, "chunked body", DEFAULT_CHUNK_SIZE).unwrap();
        record.legacy_content = Some("stale legacy body".into());
        assert_eq!(resolve_body(&record), "chunked body");
    }

    #[test]
    fn legacy_content_is_used_when_no_chunks() {
        let mut record = ArticleRecord::legacy("Title", "legacy body");
        assert_eq!(resolve_body(&record), "legacy body");

        record.content = Some(encode(b"", DEFAULT_CHUNK_SIZE).unwrap());
        assert_eq!(resolve_body(&record), "legacy body");
    }

    #[test]
    fn undecodable_content_falls_back_to_legacy() {
        let mut record = ArticleRecord::legacy("Title", "legacy body");
        let mut content = encode(b"chunked body", NonZeroU32::new(4).unwrap()).unwrap();
        content.compression = CompressionKind(5);
        record.content = Some(content);
        assert_eq!(resolve_body(&record), "legacy body");
    }

    #[test]
    fn no_body_at_all_is_empty() {
        let record = ArticleRecord::new("Title");
        assert_eq!(resolve_body(&record), "");
        assert!(ArticleResponse::from(&record).content.is_empty());

        let record = ArticleRecord::legacy("Title", "");
        assert_eq!(resolve_body(&record), "");
    }

    #[test]
    fn response_json_hides_storage_details() {
        let mut record = ArticleRecord::new("Budget approved");
        apply_content(&mut record, "The council voted.", DEFAULT_CHUNK_SIZE).unwrap();

        let json = serde_json::to_value(ArticleResponse::from(&record)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": record.id.to_string(),
                "title": "Budget approved",
                "content": ["The council voted."],
            })
        );
    }
}
