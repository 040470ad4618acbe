use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};

/// One entry as reported by a feed source, before any interpretation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub author: String,
    pub title: String,
    /// Publish date text, expected in the `Mon, 2 Jan 2006 15:04:05 -0700` layout.
    pub published: String,
    /// HTML description carrying the commit list.
    pub description: String,
}

/// A dashboard entry with its commit list extracted.
///
/// Built once through [`FeedEntry::from_raw`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedEntry {
    pub(crate) author: String,
    pub(crate) title: String,
    #[serde(serialize_with = "serialize_rfc3339")]
    pub(crate) published_at: Option<DateTime<FixedOffset>>,
    pub(crate) commits: Vec<String>,
}

impl FeedEntry {
    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// `None` when the feed's date text did not match the expected layout.
    pub fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        self.published_at
    }

    /// Commit summaries in the order they appear in the description.
    pub fn commits(&self) -> &[String] {
        &self.commits
    }
}

fn serialize_rfc3339<S: Serializer>(
    value: &Option<DateTime<FixedOffset>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    /// Minimum minutes between two fetches of the same feed.
    pub cache_timeout_minutes: u64,
    /// Use the channel `<ttl>` instead when it asks for a longer pause.
    pub respect_ttl: bool,
    pub max_feed_size_mb: usize,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "hgfeed/0.1".to_string(),
            timeout_seconds: 30,
            cache_timeout_minutes: 1,
            respect_ttl: true,
            max_feed_size_mb: 10,
            max_redirects: 5,
        }
    }
}

#[derive(Debug)]
pub struct FetchResult {
    pub http_status: u16,
    pub etag: Option<String>,
    pub last_modified: Option<String>,
    /// `None` on `304 Not Modified`.
    pub content: Option<String>,
}

#[derive(Debug)]
pub struct ParsedFeed {
    pub title: Option<String>,
    /// Channel time-to-live in minutes.
    pub ttl: Option<u32>,
    pub entries: Vec<RawEntry>,
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {reason}")]
    HttpStatus { status: u16, reason: String },

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unsupported feed URL scheme: {url}")]
    UnsupportedScheme { url: String },

    #[error("Feed size {size_bytes} bytes exceeds limit of {limit_mb}MB")]
    FeedTooLarge { size_bytes: u64, limit_mb: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FeedError>;
