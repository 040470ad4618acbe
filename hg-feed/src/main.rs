use anyhow::Context;
use clap::{Parser, ValueEnum};
use hg_feed::{poll_feed, FetchConfig, JsonSink, TerminalSink};
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Follow a source-control changes dashboard feed.
#[derive(Debug, Parser)]
#[command(name = "hgfeed", version, about)]
struct Cli {
    /// URL of the dashboard feed
    #[arg(env = "HGFEED_URL")]
    url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Minimum minutes between two fetches
    #[arg(long = "cache-minutes", default_value_t = 1)]
    cache_minutes: u64,

    /// Ignore the channel <ttl> when scheduling fetches
    #[arg(long)]
    ignore_ttl: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable ANSI colours in text output
    #[arg(long)]
    no_color: bool,

    /// Log debug output to stderr
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            timeout_seconds: self.timeout,
            cache_timeout_minutes: self.cache_minutes,
            respect_ttl: !self.ignore_ttl,
            ..FetchConfig::default()
        }
    }

    fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::ERROR
        } else {
            Level::WARN
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialise logging")?;

    info!("Starting hgfeed for {}", cli.url);

    let config = cli.fetch_config();
    let result = match cli.format {
        OutputFormat::Text => {
            let mut sink = TerminalSink::new(std::io::stdout(), !cli.no_color);
            poll_feed(&cli.url, config, &mut sink).await
        }
        OutputFormat::Json => {
            let mut sink = JsonSink::new(std::io::stdout());
            poll_feed(&cli.url, config, &mut sink).await
        }
    };

    // poll_feed has already logged the failure.
    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
