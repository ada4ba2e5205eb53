//! Huntsman main entry point
//!
//! This is the command-line interface for the Huntsman site spider.

use anyhow::{anyhow, Context};
use clap::Parser;
use huntsman::config::{load_config, validate, Config, FetchConfig};
use huntsman::crawler::{Coordinator, CrawlOutcome, Fetcher, RetryFetcher, StaticFetcher};
use huntsman::output::{
    default_export_path, format_header, format_row, matches_filter, print_statistics, write_csv,
    CrawlStatistics,
};
use huntsman::url::parse_seed;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Huntsman: a site spider
///
/// Huntsman starts at a URL and follows every link on the same host,
/// listing each page, stylesheet, script, and image it finds along with
/// its status, type, and size.
#[derive(Parser, Debug)]
#[command(name = "huntsman")]
#[command(version)]
#[command(about = "Spiders a website and lists every resource it finds", long_about = None)]
struct Cli {
    /// URL to start from; `https://` is assumed when no scheme is given
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of parallel workers
    #[arg(short = 'c', long, value_name = "N")]
    concurrency: Option<usize>,

    /// Retries per failed fetch
    #[arg(long, value_name = "R")]
    retries: Option<u32>,

    /// Base wait between retries, in milliseconds
    #[arg(long, value_name = "MS")]
    backoff_ms: Option<u64>,

    /// Per-request timeout, in seconds
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Only show resources whose URL contains this text (case-insensitive)
    #[arg(long, value_name = "TEXT")]
    filter: Option<String>,

    /// Write the shown resources to CSV; defaults to the Downloads folder
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    export: Option<Option<PathBuf>>,

    /// Print statistics when the crawl ends
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };
    apply_overrides(&mut config, &cli);
    validate(&config).context("Invalid configuration")?;

    let seed = parse_seed(&cli.url).with_context(|| format!("Invalid URL '{}'", cli.url))?;
    let fetcher = build_fetcher(&config.fetch)?;

    handle_crawl(&cli, &config, seed, fetcher).await
}

/// Sets up logging based on verbosity level
///
/// Logs go to stderr; stdout carries only result rows.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("huntsman=info,warn"),
            1 => EnvFilter::new("huntsman=debug,info"),
            2 => EnvFilter::new("huntsman=trace,debug"),
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

/// Applies command-line flags on top of file configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(concurrency) = cli.concurrency {
        config.crawler.concurrency = concurrency;
    }
    if let Some(retries) = cli.retries {
        config.fetch.retries = retries;
    }
    if let Some(backoff_ms) = cli.backoff_ms {
        config.fetch.backoff_ms = backoff_ms;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.fetch.timeout_secs = timeout_secs;
    }
}

/// Builds the HTTP fetcher, wrapped in retries when configured
fn build_fetcher(config: &FetchConfig) -> anyhow::Result<Arc<dyn Fetcher>> {
    let fetcher = StaticFetcher::new(config).context("Failed to build HTTP client")?;

    if config.retries > 0 {
        tracing::debug!(
            "Retrying failed fetches up to {} times (backoff {:?})",
            config.retries,
            config.backoff()
        );
        Ok(Arc::new(RetryFetcher::new(
            fetcher,
            config.retries,
            config.backoff(),
        )))
    } else {
        Ok(Arc::new(fetcher))
    }
}

/// Handles the main crawl operation
async fn handle_crawl(
    cli: &Cli,
    config: &Config,
    seed: url::Url,
    fetcher: Arc<dyn Fetcher>,
) -> anyhow::Result<()> {
    let coordinator = Arc::new(Coordinator::new(fetcher, &config.crawler));
    let mut results = coordinator
        .results()
        .ok_or_else(|| anyhow!("Result stream already taken"))?;

    let session = {
        let coordinator = Arc::clone(&coordinator);
        let seed = seed.to_string();
        tokio::spawn(async move {
            coordinator
                .start(&CancellationToken::new(), &seed)
                .await
        })
    };

    let interrupt = {
        let coordinator = Arc::clone(&coordinator);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                coordinator.stop();
            }
        })
    };

    let filter = cli.filter.as_deref().unwrap_or("");
    let mut shown = Vec::new();
    let mut stats = CrawlStatistics::new();

    println!("{}", format_header());
    while let Some(resource) = results.recv().await {
        stats.record(&resource);
        if matches_filter(&resource, filter) {
            println!("{}", format_row(&resource));
            shown.push(resource);
        }
    }

    let outcome = session.await.context("Crawl task failed")??;
    interrupt.abort();

    match outcome {
        CrawlOutcome::Completed => tracing::info!("Crawl finished: {} resources", stats.total_resources),
        CrawlOutcome::Cancelled => tracing::info!(
            "Crawl interrupted: {} resources before stopping",
            stats.total_resources
        ),
    }

    if let Some(export) = &cli.export {
        let path = match export {
            Some(path) => path.clone(),
            None => default_export_path(config.output.export_dir.as_deref(), &seed),
        };
        match write_csv(&path, &shown) {
            Ok(()) => println!("\nExported {} rows to {}", shown.len(), path.display()),
            Err(e) => tracing::error!("Export to {} failed: {}", path.display(), e),
        }
    }

    if cli.stats {
        println!();
        print_statistics(&stats);
    }

    Ok(())
}
