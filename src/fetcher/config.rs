use serde::Deserialize;
use std::time::Duration;

/// Where the feed lives and how hard to try reaching it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// API root without trailing slash (default: the Hacker News Firebase API)
    pub base_url: String,

    /// Which story list to show, e.g. "topstories", "newstories", "beststories"
    pub story_list: String,

    /// Number of entries fetched per run (default: 30)
    pub limit: usize,

    /// Per-request timeout in seconds (default: 10)
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://hacker-news.firebaseio.com/v0".to_string(),
            story_list: "topstories".to_string(),
            limit: 30,
            timeout_secs: 10,
            user_agent: concat!("gazette/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FeedConfig {
    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// URL of the index document listing entry ids in key order.
    pub fn index_url(&self) -> String {
        format!(
            "{}/{}.json?print=pretty&limitToFirst={}&orderBy=%22$key%22",
            self.base(),
            self.story_list,
            self.limit
        )
    }

    /// URL of a single entry's detail record.
    pub fn item_url(&self, id: u64) -> String {
        format!("{}/item/{}.json", self.base(), id)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Human readable name of the configured story list.
    pub fn list_title(&self) -> String {
        match self.story_list.as_str() {
            "topstories" => "Top Stories".to_string(),
            "newstories" => "New Stories".to_string(),
            "beststories" => "Best Stories".to_string(),
            "askstories" => "Ask HN".to_string(),
            "showstories" => "Show HN".to_string(),
            "jobstories" => "Jobs".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_index_url() {
        let config = FeedConfig::default();
        assert_eq!(
            config.index_url(),
            "https://hacker-news.firebaseio.com/v0/topstories.json?print=pretty&limitToFirst=30&orderBy=%22$key%22"
        );
    }

    #[test]
    fn test_item_url_ignores_trailing_slash() {
        let config = FeedConfig {
            base_url: "http://localhost:8080/v0/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.item_url(42), "http://localhost:8080/v0/item/42.json");
    }

    #[test]
    fn test_list_title() {
        assert_eq!(FeedConfig::default().list_title(), "Top Stories");
        let custom = FeedConfig {
            story_list: "custom".to_string(),
            ..Default::default()
        };
        assert_eq!(custom.list_title(), "custom");
    }

    #[test]
    fn test_timeout_duration() {
        let config = FeedConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }
}
