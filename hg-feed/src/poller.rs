//! The fetch / print / wait loop.
//!
//! The first successful fetch is a backlog: its entries are collected and
//! printed oldest first once the whole feed has been read. After that every
//! new entry is printed as soon as it is seen, in feed order.

use crate::entry::sort_oldest_first;
use crate::sources::HttpFeedSource;
use crate::traits::{EntrySink, FeedSource};
use crate::types::{FeedEntry, FetchConfig, RawEntry, Result};
use std::time::Duration;
use tracing::{debug, error, info};

/// Per-loop state separating the initial backlog from live updates.
#[derive(Debug)]
pub struct PollCycle {
    first_cycle: bool,
    buffer: Vec<FeedEntry>,
}

impl Default for PollCycle {
    fn default() -> Self {
        Self {
            first_cycle: true,
            buffer: Vec::new(),
        }
    }
}

impl PollCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_first_cycle(&self) -> bool {
        self.first_cycle
    }

    /// Buffer `entry` during the first cycle, emit it right away afterwards.
    pub fn accept<K: EntrySink>(&mut self, entry: FeedEntry, sink: &mut K) -> Result<()> {
        if self.first_cycle {
            self.buffer.push(entry);
            Ok(())
        } else {
            sink.emit(&entry)
        }
    }

    /// Called once all entries of a fetch were accepted. Ends the first
    /// cycle by emitting the backlog oldest first.
    pub fn finish_fetch<K: EntrySink>(&mut self, sink: &mut K) -> Result<()> {
        if !self.first_cycle {
            return Ok(());
        }

        let mut backlog = std::mem::take(&mut self.buffer);
        sort_oldest_first(&mut backlog);
        info!("Initial load: {} entries", backlog.len());

        for entry in &backlog {
            sink.emit(entry)?;
        }

        self.first_cycle = false;
        Ok(())
    }

    /// Feed one fetch's new entries through the cycle.
    pub fn process<K: EntrySink>(
        &mut self,
        raw_entries: Vec<RawEntry>,
        sink: &mut K,
    ) -> Result<()> {
        for raw in raw_entries {
            self.accept(FeedEntry::from_raw(raw), sink)?;
        }
        self.finish_fetch(sink)
    }
}

/// Poll `source` until a fetch fails, sending entries to `sink`.
///
/// Only returns on error. The failure is logged once with the feed
/// location before being returned; it is never retried.
pub async fn run_poll_loop<S, K>(source: &mut S, sink: &mut K) -> Result<()>
where
    S: FeedSource,
    K: EntrySink,
{
    let mut cycle = PollCycle::new();

    loop {
        let raw_entries = match source.pull().await {
            Ok(entries) => entries,
            Err(e) => {
                error!("[e] {}: {}", source.location(), e);
                return Err(e);
            }
        };

        debug!(
            "Fetched {} new entries (first cycle: {})",
            raw_entries.len(),
            cycle.is_first_cycle()
        );
        if let Err(e) = cycle.process(raw_entries, sink) {
            error!("[e] failed to write entries from {}: {}", source.location(), e);
            return Err(e);
        }

        let wait = Duration::from_secs(source.seconds_till_update());
        debug!("Next fetch of {} in {:?}", source.location(), wait);
        tokio::time::sleep(wait).await;
    }
}

/// Follow the feed at `location` over HTTP, sending entries to `sink`.
pub async fn poll_feed<K: EntrySink>(
    location: &str,
    config: FetchConfig,
    sink: &mut K,
) -> Result<()> {
    let mut source = HttpFeedSource::new(location.to_string(), config).map_err(|e| {
        error!("[e] {}: {}", location, e);
        e
    })?;
    info!("Following {}", location);
    run_poll_loop(&mut source, sink).await
}
