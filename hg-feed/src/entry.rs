use crate::markup::{commit_summary, extract_commits};
use crate::types::{FeedEntry, RawEntry};
use chrono::{DateTime, FixedOffset, Weekday};
use tracing::warn;

/// Layout of `<pubDate>` on the dashboard after the weekday, e.g.
/// `2 Jan 2006 15:04:05 -0700` in `Mon, 2 Jan 2006 15:04:05 -0700`.
pub const PUBLISHED_FORMAT: &str = "%d %b %Y %H:%M:%S %z";

/// Parse a publish date in the `Mon, ` + [`PUBLISHED_FORMAT`] layout.
///
/// The weekday must be a weekday name but need not match the date.
pub fn parse_published(raw: &str) -> Option<DateTime<FixedOffset>> {
    let (weekday, rest) = raw.trim().split_once(", ")?;
    weekday.parse::<Weekday>().ok()?;
    DateTime::parse_from_str(rest, PUBLISHED_FORMAT).ok()
}

impl FeedEntry {
    pub fn from_raw(raw: RawEntry) -> Self {
        let published_at = parse_published(&raw.published);
        if published_at.is_none() {
            warn!(
                "Unrecognised publish date {:?} on \"{}\", leaving it unset",
                raw.published, raw.title
            );
        }

        let commits = extract_commits(&raw.description)
            .iter()
            .map(|line| commit_summary(line).to_string())
            .collect();

        Self {
            author: raw.author,
            title: raw.title,
            published_at,
            commits,
        }
    }
}

/// Order entries oldest first. Entries without a date come first and
/// otherwise keep their relative order.
pub fn sort_oldest_first(entries: &mut [FeedEntry]) {
    entries.sort_by_key(|entry| entry.published_at);
}
