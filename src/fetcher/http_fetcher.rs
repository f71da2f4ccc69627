use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::app::{GazetteError, Result};
use crate::fetcher::{FeedConfig, Fetcher};

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }
}

fn request_error(url: &str, err: reqwest::Error) -> GazetteError {
    if err.is_timeout() {
        GazetteError::Timeout(url.to_string())
    } else {
        GazetteError::Http(err)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_raw(&self, url: &str) -> Result<Vec<u8>> {
        let url = url.trim();
        if url.is_empty() {
            return Err(GazetteError::MissingUrl);
        }
        let parsed = Url::parse(url)?;

        tracing::debug!("GET {}", parsed);
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        response.error_for_status_ref()?;

        let body = response
            .bytes()
            .await
            .map_err(|e| request_error(url, e))?
            .to_vec();

        if body.is_empty() {
            return Err(GazetteError::EmptyResponse(url.to_string()));
        }

        Ok(body)
    }
}
