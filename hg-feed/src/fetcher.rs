use crate::types::{FeedError, FetchConfig, FetchResult, Result};
use reqwest::header::{ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED};
use reqwest::{Client, Response, StatusCode};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetch `url` once, sending the validators from the previous response.
    pub async fn fetch_feed(
        &self,
        url: &str,
        etag: Option<&str>,
        last_modified: Option<&str>,
    ) -> Result<FetchResult> {
        let start_time = Instant::now();
        debug!("Fetching feed: {}", url);

        let response = self.fetch_with_conditional_headers(url, etag, last_modified).await?;
        let status = response.status();

        if status == StatusCode::NOT_MODIFIED {
            debug!("Feed not modified: {}", url);
            return Ok(FetchResult {
                http_status: status.as_u16(),
                etag: etag.map(|s| s.to_string()),
                last_modified: last_modified.map(|s| s.to_string()),
                content: None,
            });
        }

        if !status.is_success() {
            return Err(FeedError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let new_etag = header_value(&response, ETAG);
        let new_last_modified = header_value(&response, LAST_MODIFIED);

        if let Some(content_length) = response.content_length() {
            let limit = (self.config.max_feed_size_mb as u64).saturating_mul(1024 * 1024);
            if content_length > limit {
                return Err(FeedError::FeedTooLarge {
                    size_bytes: content_length,
                    limit_mb: self.config.max_feed_size_mb,
                });
            }
        }

        let content = response.text().await?;
        info!(
            "Fetched feed: {} ({} bytes in {}ms)",
            url,
            content.len(),
            start_time.elapsed().as_millis()
        );

        Ok(FetchResult {
            http_status: status.as_u16(),
            etag: new_etag,
            last_modified: new_last_modified,
            content: Some(content),
        })
    }

    async fn fetch_with_conditional_headers(
        &self,
        url: &str,
        etag: Option<&str>,
        last_modified: Option<&str>,
    ) -> Result<Response> {
        let mut request = self.client.get(url);

        if let Some(etag) = etag {
            request = request.header(IF_NONE_MATCH, etag);
        }

        if let Some(last_modified) = last_modified {
            request = request.header(IF_MODIFIED_SINCE, last_modified);
        }

        let response = request.send().await?;
        Ok(response)
    }
}

fn header_value(response: &Response, name: reqwest::header::HeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}
