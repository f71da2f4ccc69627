use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum GazetteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {0} timed out")]
    Timeout(String),

    #[error("Empty response from {0}")]
    EmptyResponse(String),

    #[error("Entry has no URL to fetch")]
    MissingUrl,

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to decode feed data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to convert content: {0}")]
    Conversion(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl GazetteError {
    /// True for failures caused by the network rather than the payload.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            GazetteError::Http(_)
                | GazetteError::Timeout(_)
                | GazetteError::EmptyResponse(_)
                | GazetteError::MissingUrl
                | GazetteError::InvalidUrl(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GazetteError>;
