use crate::types::{FeedError, ParsedFeed, RawEntry, Result};
use feed_rs::parser;
use std::collections::HashSet;
use tracing::{debug, info};

/// Parses feed documents and remembers which entries were already reported.
#[derive(Default)]
pub struct FeedParser {
    seen_ids: HashSet<String>,
}

impl FeedParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `content`, keeping only entries not returned by an earlier call.
    ///
    /// Entries stay in the order the feed lists them.
    pub fn parse_feed(&mut self, content: &str) -> Result<ParsedFeed> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content.as_bytes())
            .map_err(|e| FeedError::Parse(format!("Failed to parse feed: {}", e)))?;

        let title = feed.title.map(|t| t.content);
        let total = feed.entries.len();
        let pub_dates = item_pub_dates(content, total);

        let entries: Vec<RawEntry> = feed
            .entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let pub_date = pub_dates.as_ref().and_then(|dates| dates[index].clone());
                self.parse_entry(entry, pub_date)
            })
            .collect();

        info!("Parsed feed with {} entries ({} new)", total, entries.len());

        Ok(ParsedFeed {
            title,
            ttl: feed.ttl,
            entries,
        })
    }

    fn parse_entry(
        &mut self,
        entry: feed_rs::model::Entry,
        pub_date: Option<String>,
    ) -> Option<RawEntry> {
        if !self.seen_ids.insert(entry.id.clone()) {
            debug!("Skipping already seen entry: {}", entry.id);
            return None;
        }

        let title = entry.title.map(|t| t.content).unwrap_or_default();
        let author = entry
            .authors
            .into_iter()
            .next()
            .map(author_name)
            .unwrap_or_default();

        // feed-rs converts dates to UTC, so it is only used when the document
        // has no <pubDate> text of its own (Atom, RSS 1.0).
        let published = pub_date
            .or_else(|| entry.published.or(entry.updated).map(|dt| dt.to_rfc2822()))
            .unwrap_or_default();

        let description = entry
            .summary
            .map(|s| s.content)
            .or_else(|| entry.content.and_then(|c| c.body))
            .unwrap_or_default();

        Some(RawEntry {
            author,
            title,
            published,
            description,
        })
    }

    pub fn seen_count(&self) -> usize {
        self.seen_ids.len()
    }
}

/// feed-rs names RSS `<author>` contacts after their role and keeps the
/// element text as the email.
fn author_name(person: feed_rs::model::Person) -> String {
    match person.email {
        Some(email) if person.name.is_empty() || person.name == "author" => email,
        _ => person.name,
    }
}

/// The `<pubDate>` text of every `<item>`, in document order.
///
/// `None` when the document is not plain XML or lists a different number of
/// items than feed-rs found.
fn item_pub_dates(content: &str, expected: usize) -> Option<Vec<Option<String>>> {
    let doc = roxmltree::Document::parse(content)
        .map_err(|e| debug!("Raw publish dates unavailable: {}", e))
        .ok()?;

    let dates: Vec<Option<String>> = doc
        .descendants()
        .filter(|node| node.has_tag_name("item"))
        .map(|item| {
            item.children()
                .find(|child| child.has_tag_name("pubDate"))
                .and_then(|child| child.text())
                .map(|text| text.trim().to_string())
        })
        .collect();

    (dates.len() == expected).then_some(dates)
}
