use std::num::NonZeroU32;

use dashmap::DashMap;
use folio_codec::DEFAULT_CHUNK_SIZE;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    write::{apply_content, encode_content, replace_content},
    ArticleDraft, ArticleError, ArticleRecord, ArticleResponse,
};

/// In-memory article storage.
///
/// Concurrent writes to the same article are last-write-wins. Every write that carries content
/// is fully encoded before it is stored, so the stored chunk set is always complete.
pub struct ArticleStore {
    articles: DashMap<Uuid, ArticleRecord>,
    chunk_size: NonZeroU32,
}

impl ArticleStore {
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(chunk_size: NonZeroU32) -> Self {
        Self {
            articles: DashMap::new(),
            chunk_size,
        }
    }

    pub fn chunk_size(&self) -> NonZeroU32 {
        self.chunk_size
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn create(&self, draft: ArticleDraft) -> Result<ArticleRecord, ArticleError> {
        let mut record = ArticleRecord::new(draft.title);
        if let Some(text) = &draft.content {
            apply_content(&mut record, text, self.chunk_size)?;
        }
        info!(id = %record.id, "Created article");
        self.articles.insert(record.id, record.clone());
        Ok(record)
    }

    /// Replaces the title, and the body if the draft carries one.
    ///
    /// The record is edited in place, so an article deleted concurrently stays deleted.
    pub fn update(&self, id: Uuid, draft: ArticleDraft) -> Result<ArticleRecord, ArticleError> {
        // Encode outside the shard lock.
        let encoded = draft
            .content
            .as_deref()
            .map(|text| encode_content(text, self.chunk_size))
            .transpose()?;

        let mut entry = self
            .articles
            .get_mut(&id)
            .ok_or(ArticleError::NotFound(id))?;
        let record = entry.value_mut();
        record.title = draft.title;
        if let Some(encoded) = encoded {
            replace_content(record, encoded);
        }
        debug!(id = %id, "Updated article");
        Ok(record.clone())
    }

    /// Stores a record as-is. Used for importing records written before chunked storage.
    pub fn insert_legacy(&self, record: ArticleRecord) {
        debug!(id = %record.id, "Imported article record");
        self.articles.insert(record.id, record);
    }

    pub fn get(&self, id: Uuid) -> Result<ArticleRecord, ArticleError> {
        self.articles
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(ArticleError::NotFound(id))
    }

    pub fn delete(&self, id: Uuid) -> Result<ArticleRecord, ArticleError> {
        let (_, record) = self
            .articles
            .remove(&id)
            .ok_or(ArticleError::NotFound(id))?;
        info!(id = %id, "Deleted article");
        Ok(record)
    }

    /// All records, in no particular order.
    pub fn list(&self) -> Vec<ArticleRecord> {
        self.articles
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    // Both shape from cloned records so that no shard lock is held while decompressing.

    pub fn get_response(&self, id: Uuid) -> Result<ArticleResponse, ArticleError> {
        self.get(id).map(|record| ArticleResponse::from(&record))
    }

    /// Responses for every article. A damaged article only loses its own body.
    pub fn list_responses(&self) -> Vec<ArticleResponse> {
        self.list().iter().map(ArticleResponse::from).collect()
    }
}

impl Default for ArticleStore {
    fn default() -> Self {
        Self::new()
    }
}
