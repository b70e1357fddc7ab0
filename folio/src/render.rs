use std::{fs, path::Path};

use anyhow::Context;
use folio_article::{ArticleRecord, ArticleResponse};
use tracing::{debug, warn};

use crate::transcode::read_envelope;

/// Shapes an article the same way the read path does and prints it as JSON.
///
/// An unreadable envelope is not an error here; like a damaged record, it just means there is no
/// chunked content to show.
pub fn render(input: &Path, legacy: Option<&Path>, title: String) -> anyhow::Result<()> {
    let mut record = ArticleRecord::new(title);

    record.content = match read_envelope(input) {
        Ok(envelope) => Some(envelope),
        Err(error) => {
            warn!("ignoring envelope: {error:#}");
            None
        }
    };
    if let Some(legacy) = legacy {
        debug!(?legacy, "Reading legacy content");
        record.legacy_content =
            Some(fs::read_to_string(legacy).with_context(|| format!("cannot read {legacy:?}"))?);
    }

    let response = ArticleResponse::from(&record);
    let json = serde_json::to_string_pretty(&response).context("cannot serialize response")?;
    println!("{json}");
    Ok(())
}
