use folio_codec::EncodedContent;
use serde::Deserialize;
use uuid::Uuid;

/// An article as it is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleRecord {
    pub id: Uuid,
    pub title: String,
    /// Plain-text body from before content was stored in chunks. Cleared as soon as the article
    /// receives new content.
    pub legacy_content: Option<String>,
    pub content: Option<EncodedContent>,
}

impl ArticleRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            legacy_content: None,
            content: None,
        }
    }

    /// A record written before chunked storage existed.
    pub fn legacy(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            legacy_content: Some(body.into()),
            ..Self::new(title)
        }
    }
}

/// Incoming create/update request. `content` is transient: it is encoded into the record and
/// never stored as-is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl ArticleDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: Some(content.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ArticleDraft, ArticleRecord};

    #[test]
    fn draft_content_is_optional() {
        let draft: ArticleDraft = serde_json::from_str(r#"{ "title": "Only a title" }"#).unwrap();
        assert_eq!(draft.title, "Only a title");
        assert_eq!(draft.content, None);

        let draft: ArticleDraft =
            serde_json::from_str(r#"{ "title": "T", "content": "Body" }"#).unwrap();
        assert_eq!(draft.content.as_deref(), Some("Body"));
    }

    #[test]
    fn legacy_records_have_no_chunks() {
        let record = ArticleRecord::legacy("Old", "plain body");
        assert_eq!(record.legacy_content.as_deref(), Some("plain body"));
        assert!(record.content.is_none());
        assert_ne!(record.id, ArticleRecord::new("Old").id);
    }
}
