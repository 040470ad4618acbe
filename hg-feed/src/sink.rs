use crate::traits::EntrySink;
use crate::types::{FeedEntry, Result};
use std::io::Write;

const AUTHOR: &str = "\x1b[36;1m";
const DATE: &str = "\x1b[30;1m";
const TITLE: &str = "\x1b[32;1m";
const ARROW: &str = "\x1b[35;1m";
const RESET: &str = "\x1b[0m";

/// Display layout for publish dates.
pub const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y %H:%M";

/// Human-readable activity stream.
///
/// ```text
/// alice -> Mar 5, 2019 10:00 -> pushed to default
///      -> fixed null pointer
/// ```
pub struct TerminalSink<W> {
    out: W,
    color: bool,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, code: &'static str) -> &'static str {
        if self.color {
            code
        } else {
            ""
        }
    }
}

impl<W: Write> EntrySink for TerminalSink<W> {
    fn emit(&mut self, entry: &FeedEntry) -> Result<()> {
        let date = entry
            .published_at()
            .map(|dt| dt.format(DISPLAY_DATE_FORMAT).to_string())
            .unwrap_or_else(|| "unknown date".to_string());

        writeln!(
            self.out,
            "{}{} -> {}{} -> {}{}{}",
            self.paint(AUTHOR),
            entry.author(),
            self.paint(DATE),
            date,
            self.paint(TITLE),
            entry.title(),
            self.paint(RESET),
        )?;

        for commit in entry.commits() {
            writeln!(
                self.out,
                "\t {}->{} {}",
                self.paint(ARROW),
                self.paint(RESET),
                commit
            )?;
        }

        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// One JSON object per line.
pub struct JsonSink<W> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EntrySink for JsonSink<W> {
    fn emit(&mut self, entry: &FeedEntry) -> Result<()> {
        serde_json::to_writer(&mut self.out, entry)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
