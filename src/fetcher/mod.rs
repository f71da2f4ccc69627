pub mod config;
pub mod feed;
pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;

pub use config::FeedConfig;

/// Retrieves the raw body behind a URL.
///
/// Implementations surface an empty URL, a non-success status and an empty
/// body as errors rather than handing back nothing.
#[async_trait]
pub trait Fetcher {
    async fn fetch_raw(&self, url: &str) -> Result<Vec<u8>>;
}
