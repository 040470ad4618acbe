pub mod types;
pub mod markup;
pub mod entry;
pub mod fetcher;
pub mod parser;
pub mod traits;
pub mod sources;
pub mod sink;
pub mod poller;
pub mod rss_utils;

pub use types::*;
pub use fetcher::Fetcher;
pub use parser::FeedParser;
pub use traits::{EntrySink, FeedSource};
pub use sources::HttpFeedSource;
pub use sink::{JsonSink, TerminalSink};
pub use poller::{poll_feed, run_poll_loop, PollCycle};
