use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Config;
use crate::converter::TextConverter;
use crate::fetcher::feed::FeedClient;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;

pub struct AppContext {
    pub feed: FeedClient,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub converter: TextConverter,
}

impl AppContext {
    pub fn new(config: &Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.feed)?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Wire the context around an existing fetcher, used by tests to avoid the network.
    pub fn with_fetcher(config: &Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        let feed = FeedClient::new(fetcher.clone(), config.feed.clone());
        let converter = TextConverter::new(config.reader.wrap_width);

        Self {
            feed,
            fetcher,
            converter,
        }
    }
}
