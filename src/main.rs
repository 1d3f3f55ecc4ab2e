//! Newsline main entry point
//!
//! This is the command-line interface for the Newsline listing crawler and
//! article extractor. JSON goes to stdout; logs go to stderr.

use anyhow::Context;
use clap::{Parser, Subcommand};
use newsline_crawler::config::{load_or_default, Config, ProviderKind};
use newsline_crawler::crawler::{ExtractionCoordinator, ListCrawler};
use newsline_crawler::output::{
    print_bench_report, render_list, BatchTiming, BenchReport, ListEnvelope, ListTiming,
};
use newsline_crawler::provider::{build_provider, DocumentProvider};
use newsline_crawler::ArticleRecord;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Newsline: recent news discovery and article extraction
///
/// Newsline scrolls a news-listing page, keeps the article links published
/// inside a time window, and extracts the cleaned text of articles across a
/// small pool of isolated sessions.
#[derive(Parser, Debug)]
#[command(name = "newsline")]
#[command(version)]
#[command(about = "Recent news discovery and article extraction", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Load pages in headless Chromium instead of plain HTTP
    #[arg(long, global = true)]
    browser: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List recent articles from the listing page
    List {
        /// Time window in hours (defaults to the configured window)
        #[arg(long)]
        hours: Option<u32>,

        /// Listing page to crawl instead of the configured one
        #[arg(long)]
        url: Option<String>,

        /// Print the legacy brace-wrapped document instead of a JSON array
        #[arg(long)]
        legacy_envelope: bool,
    },

    /// Extract article content, one JSON record per line
    Extract {
        /// Article URLs
        #[arg(required = true, value_name = "URL")]
        urls: Vec<String>,

        /// Concurrent workers, 1 to 5
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        workers: Option<u8>,

        /// Use a single session and keep input order
        #[arg(long, conflicts_with = "workers")]
        sequential: bool,
    },

    /// Time listing crawls and compare concurrent with sequential extraction
    Bench {
        /// Windows to time, in hours
        #[arg(long, value_delimiter = ',', default_values_t = [2u32, 6, 12, 24])]
        hours: Vec<u32>,

        /// Article URLs to extract; defaults to the first three listed
        #[arg(value_name = "URL")]
        urls: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_or_default(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to build default configuration".to_string(),
    })?;
    if cli.browser {
        config.provider.kind = ProviderKind::Browser;
    }

    let provider = build_provider(&config.provider).context("Failed to set up document provider")?;
    tracing::info!("Using {} provider", provider.name());

    match cli.command {
        Command::List {
            hours,
            url,
            legacy_envelope,
        } => {
            if let Some(url) = url {
                config.listing.url = url;
            }
            if legacy_envelope {
                config.listing.legacy_envelope = true;
            }
            handle_list(provider, &config, hours).await
        }
        Command::Extract {
            urls,
            workers,
            sequential,
        } => {
            if let Some(workers) = workers {
                config.extraction.max_workers = usize::from(workers);
            }
            handle_extract(provider, &config, &urls, sequential).await
        }
        Command::Bench { hours, urls } => handle_bench(provider, &config, &hours, urls).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("newsline_crawler=info,newsline=info,warn"),
            1 => EnvFilter::new("newsline_crawler=debug,newsline=debug,info"),
            2 => EnvFilter::new("newsline_crawler=trace,newsline=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles `list`: crawls the listing page and prints the entries
async fn handle_list(
    provider: Arc<dyn DocumentProvider>,
    config: &Config,
    hours: Option<u32>,
) -> anyhow::Result<()> {
    let hours = hours.unwrap_or(config.listing.hours_window);
    let crawler = ListCrawler::new(provider, config);
    let entries = crawler
        .crawl(&config.listing.url, hours)
        .await
        .with_context(|| format!("Failed to crawl {}", config.listing.url))?;

    let envelope = ListEnvelope::from_legacy_flag(config.listing.legacy_envelope);
    if envelope == ListEnvelope::Legacy {
        tracing::warn!("Rendering the legacy brace-wrapped list; it is not valid JSON");
    }
    println!("{}", render_list(&entries, envelope)?);
    Ok(())
}

/// Handles `extract`: prints one JSON record per line
async fn handle_extract(
    provider: Arc<dyn DocumentProvider>,
    config: &Config,
    urls: &[String],
    sequential: bool,
) -> anyhow::Result<()> {
    let coordinator = ExtractionCoordinator::new(provider, config)?;
    let records = if sequential {
        coordinator.extract_sequential(urls).await?
    } else {
        coordinator
            .extract_many(urls, config.extraction.max_workers)
            .await?
    };

    for record in &records {
        println!("{}", record.to_json()?);
    }

    let failed = records.iter().filter(|r| r.is_error()).count();
    if failed > 0 {
        tracing::warn!("{} of {} articles failed", failed, records.len());
    }
    Ok(())
}

/// Handles `bench`: times listing crawls and both extraction modes
async fn handle_bench(
    provider: Arc<dyn DocumentProvider>,
    config: &Config,
    hours: &[u32],
    mut urls: Vec<String>,
) -> anyhow::Result<()> {
    let crawler = ListCrawler::new(Arc::clone(&provider), config);
    let mut report = BenchReport::default();
    let mut discovered = Vec::new();

    for &window in hours {
        tracing::info!("Timing listing crawl with a {} hour window", window);
        let start = Instant::now();
        let result = crawler.crawl(&config.listing.url, window).await;
        let elapsed = start.elapsed();

        let result = match result {
            Ok(entries) => {
                let count = entries.len();
                if discovered.len() < entries.len() {
                    discovered = entries;
                }
                Ok(count)
            }
            Err(e) => Err(e.to_string()),
        };
        report.listing.push(ListTiming {
            hours: window,
            result,
            elapsed,
        });
    }

    if urls.is_empty() {
        urls = discovered.into_iter().take(3).map(|entry| entry.url).collect();
    }

    if !urls.is_empty() {
        let coordinator = ExtractionCoordinator::new(provider, config)?;

        let start = Instant::now();
        let concurrent = coordinator
            .extract_many(&urls, config.extraction.max_workers)
            .await;
        report.concurrent = Some(batch_timing(urls.len(), concurrent, start));

        let start = Instant::now();
        let sequential = coordinator.extract_sequential(&urls).await;
        report.sequential = Some(batch_timing(urls.len(), sequential, start));
    }
    report.urls = urls;

    print_bench_report(&report);
    Ok(())
}

fn batch_timing(
    total: usize,
    result: newsline_crawler::Result<Vec<ArticleRecord>>,
    start: Instant,
) -> BatchTiming {
    BatchTiming {
        total,
        result: result
            .map(|records| records.iter().filter(|r| !r.is_error()).count())
            .map_err(|e| e.to_string()),
        elapsed: start.elapsed(),
    }
}
