use crate::types::{FeedEntry, RawEntry, Result};
use async_trait::async_trait;

/// A feed that can be polled repeatedly for new entries.
#[async_trait]
pub trait FeedSource: Send {
    /// Where the feed lives, used in diagnostics.
    fn location(&self) -> &str;

    /// Fetch the feed and return the entries not reported by earlier pulls,
    /// in the order the feed lists them.
    async fn pull(&mut self) -> Result<Vec<RawEntry>>;

    /// Seconds the source asks to wait before the next pull.
    fn seconds_till_update(&self) -> u64;
}

/// Receives entries in display order.
pub trait EntrySink {
    fn emit(&mut self, entry: &FeedEntry) -> Result<()>;
}
