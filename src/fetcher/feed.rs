use std::sync::Arc;

use crate::app::Result;
use crate::domain::Entry;
use crate::fetcher::{FeedConfig, Fetcher};

/// Read-only client for the story index and item endpoints.
pub struct FeedClient {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    config: FeedConfig,
}

impl FeedClient {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, config: FeedConfig) -> Self {
        Self { fetcher, config }
    }

    /// Fetch the index, then every listed entry one after another in index order.
    ///
    /// The first failed request or undecodable item aborts the whole batch.
    /// Items whose body is JSON `null` are skipped.
    pub async fn fetch_top_entries(&self) -> Result<Vec<Entry>> {
        let index_url = self.config.index_url();
        let body = self.fetcher.fetch_raw(&index_url).await?;

        let mut ids: Vec<u64> = serde_json::from_slice(&body)?;
        ids.truncate(self.config.limit);
        tracing::debug!("Index lists {} entries", ids.len());

        let mut entries = Vec::with_capacity(ids.len());
        for id in ids {
            let body = self.fetcher.fetch_raw(&self.config.item_url(id)).await?;
            match decode_entry(&body)? {
                Some(entry) => entries.push(entry),
                None => tracing::warn!("Item {} came back empty, skipping", id),
            }
        }

        tracing::info!("Fetched {} entries from {}", entries.len(), index_url);
        Ok(entries)
    }
}

/// Decode one item body. `null` yields `None`; malformed JSON is an error.
pub fn decode_entry(body: &[u8]) -> Result<Option<Entry>> {
    Ok(serde_json::from_slice::<Option<Entry>>(body)?)
}
