//! Article records and the two places they meet the content codec: the write path, which
//! encodes new bodies, and the read path, which shapes records into API responses.

use thiserror::Error;
use uuid::Uuid;

pub mod record;
pub mod response;
pub mod store;
pub mod write;

pub use record::{ArticleDraft, ArticleRecord};
pub use response::ArticleResponse;
pub use store::ArticleStore;

#[derive(Debug, Error)]
pub enum ArticleError {
    #[error("article {0} not found")]
    NotFound(Uuid),
    #[error("cannot encode article content")]
    Encode(#[from] folio_codec::EncodeError),
}
