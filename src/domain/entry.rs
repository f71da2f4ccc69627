use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::Url;

/// One story from the feed, as returned by the item endpoint.
///
/// Missing fields decode to their zero values; deleted and dead items come
/// back with most fields absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Entry {
    pub id: u64,
    pub title: String,
    pub score: u64,
    pub url: String,
    pub by: String,
    pub descendants: u64,
    pub kids: Vec<u64>,
    pub time: i64,
    #[serde(rename = "type")]
    pub kind: String,
    /// Inline HTML body, present on self posts that link nowhere.
    pub text: String,
}

impl Entry {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    pub fn has_link(&self) -> bool {
        !self.url.trim().is_empty()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }

    /// Host of the external link with any leading `www.` removed.
    pub fn domain(&self) -> Option<String> {
        let parsed = Url::parse(self.url.trim()).ok()?;
        let host = parsed.host_str()?;
        Some(host.strip_prefix("www.").unwrap_or(host).to_string())
    }

    /// Text the list filter matches against.
    pub fn filter_value(&self) -> &str {
        &self.title
    }

    /// Secondary line shown under the title in the list.
    pub fn summary_line(&self) -> String {
        let mut parts = vec![format!("{} points", self.score)];
        if !self.by.is_empty() {
            parts.push(format!("by {}", self.by));
        }
        if let Some(created) = self.created_at().filter(|_| self.time > 0) {
            parts.push(created.format("%Y-%m-%d %H:%M").to_string());
        }
        parts.push(format!("{} comments", self.descendants));
        if let Some(domain) = self.domain() {
            parts.push(format!("({})", domain));
        }
        parts.join(" | ")
    }
}
