/// Feed URL checks
pub mod url {
    use crate::types::{FeedError, Result};
    use url::Url;

    /// Accept only absolute http(s) URLs.
    pub fn validate_feed_url(url_str: &str) -> Result<Url> {
        let url = Url::parse(url_str)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(FeedError::UnsupportedScheme {
                url: url_str.to_string(),
            }),
        }
    }
}
