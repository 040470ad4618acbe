use crate::rss_utils;
use crate::traits::FeedSource;
use crate::types::{FetchConfig, RawEntry, Result};
use crate::{FeedParser, Fetcher};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// A feed fetched over HTTP(S).
pub struct HttpFeedSource {
    url: String,
    pub title: Option<String>,
    fetcher: Fetcher,
    parser: FeedParser,
    last_fetch: Option<Instant>,
    last_etag: Option<String>,
    last_modified: Option<String>,
    ttl_minutes: Option<u32>,
}

impl HttpFeedSource {
    pub fn new(url: String, fetch_config: FetchConfig) -> Result<Self> {
        rss_utils::url::validate_feed_url(&url)?;
        let fetcher = Fetcher::new(fetch_config)?;

        Ok(Self {
            url,
            title: None,
            fetcher,
            parser: FeedParser::new(),
            last_fetch: None,
            last_etag: None,
            last_modified: None,
            ttl_minutes: None,
        })
    }

    /// Pause between two fetches: the cache timeout, or the channel TTL when
    /// that is longer and TTLs are respected.
    pub fn update_interval(&self) -> Duration {
        let config = self.fetcher.config();
        let mut minutes = config.cache_timeout_minutes;
        if config.respect_ttl {
            if let Some(ttl) = self.ttl_minutes {
                minutes = minutes.max(u64::from(ttl));
            }
        }
        Duration::from_secs(minutes.saturating_mul(60))
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn pull(&mut self) -> Result<Vec<RawEntry>> {
        let fetch_result = self
            .fetcher
            .fetch_feed(
                &self.url,
                self.last_etag.as_deref(),
                self.last_modified.as_deref(),
            )
            .await?;

        self.last_fetch = Some(Instant::now());
        self.last_etag = fetch_result.etag;
        self.last_modified = fetch_result.last_modified;

        let Some(content) = fetch_result.content else {
            debug!("No new content for {} (HTTP {})", self.url, fetch_result.http_status);
            return Ok(Vec::new());
        };

        let parsed = self.parser.parse_feed(&content)?;

        if self.title.is_none() {
            self.title = parsed.title;
        }
        self.ttl_minutes = parsed.ttl;

        info!(
            "Pulled {} new entries from {} ({} known)",
            parsed.entries.len(),
            self.url,
            self.parser.seen_count()
        );
        Ok(parsed.entries)
    }

    fn seconds_till_update(&self) -> u64 {
        let elapsed = self
            .last_fetch
            .map(|at| at.elapsed())
            .unwrap_or_default();
        self.update_interval().saturating_sub(elapsed).as_secs()
    }
}
