//! Recipe-Scout main entry point
//!
//! This is the command-line interface for the Recipe-Scout crawler.

use anyhow::Context;
use clap::Parser;
use recipe_scout::config::{load_config_with_hash, validate_options, Config};
use recipe_scout::output::{
    format_table, print_statistics, sorted_for_display, CrawlStatistics, CsvExporter,
    JsonExporter, RecipeListExporter, ResultExporter,
};
use recipe_scout::{Crawler, PageResult, RunContext};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Recipe-Scout: find recipe pages on a website
///
/// Recipe-Scout walks a site breadth-first from the given URL, collects links
/// that look like recipe pages, and confirms them by checking for schema.org
/// Recipe structured data.
#[derive(Parser, Debug)]
#[command(name = "recipe-scout")]
#[command(version)]
#[command(about = "Find recipe pages on a website", long_about = None)]
struct Cli {
    /// Start URL; https is assumed when no scheme is given
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages fetched during discovery
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Maximum number of candidate URLs collected
    #[arg(long, value_name = "N")]
    max_candidates: Option<usize>,

    /// Follow links to other domains
    #[arg(long)]
    all_domains: bool,

    /// Pause after each discovery fetch, in seconds
    #[arg(long, value_name = "SECS")]
    delay: Option<f64>,

    /// Per-request timeout, in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Report candidates without fetching them
    #[arg(long)]
    no_verify: bool,

    /// Maximum number of queued URLs
    #[arg(long, value_name = "N")]
    max_frontier: Option<usize>,

    /// Apply the delay to verification fetches too
    #[arg(long)]
    throttle_verification: bool,

    /// Verification fetches in flight
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Write all results as CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Write recipe URLs, one per line
    #[arg(long, value_name = "FILE")]
    txt: Option<PathBuf>,

    /// Write all results as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    let crawler = Crawler::from_config(&config).context("Failed to set up crawler")?;

    let ctx = RunContext::new();
    let token = ctx.token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, finishing with partial results");
            token.cancel();
        }
    });

    let results = match crawler.crawl_with_context(&cli.url, &ctx).await {
        Ok(results) => {
            tracing::info!("Crawl completed with {} result rows", results.len());
            results
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    // Exports keep crawl order; only the terminal view is reordered
    write_exports(&cli, &results)?;

    if !cli.quiet {
        print!("{}", format_table(&sorted_for_display(&results)));
        println!();
        print_statistics(&CrawlStatistics::from_results(&results, &ctx));
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("recipe_scout=info,warn"),
            1 => EnvFilter::new("recipe_scout=debug,info"),
            2 => EnvFilter::new("recipe_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file, if any, and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let options = &mut config.crawler;
    if let Some(max_pages) = cli.max_pages {
        options.max_pages = max_pages;
    }
    if let Some(max_candidates) = cli.max_candidates {
        options.max_candidates = max_candidates;
    }
    if cli.all_domains {
        options.same_domain_only = false;
    }
    if let Some(delay) = cli.delay {
        options.delay_seconds = delay;
    }
    if let Some(timeout) = cli.timeout {
        options.timeout_seconds = timeout;
    }
    if cli.no_verify {
        options.verify_recipes = false;
    }
    if let Some(max_frontier) = cli.max_frontier {
        options.max_frontier = Some(max_frontier);
    }
    if cli.throttle_verification {
        options.throttle_verification = true;
    }
    if let Some(concurrency) = cli.concurrency {
        options.verify_concurrency = concurrency;
    }

    validate_options(options).context("Invalid crawl options")?;
    Ok(config)
}

/// Writes every requested export file
fn write_exports(cli: &Cli, results: &[PageResult]) -> anyhow::Result<()> {
    let targets: [(&Option<PathBuf>, &dyn ResultExporter); 3] = [
        (&cli.csv, &CsvExporter),
        (&cli.txt, &RecipeListExporter),
        (&cli.json, &JsonExporter),
    ];

    for (path, exporter) in targets {
        if let Some(path) = path {
            export(exporter, results, path)?;
        }
    }

    Ok(())
}

fn export(exporter: &dyn ResultExporter, results: &[PageResult], path: &Path) -> anyhow::Result<()> {
    exporter
        .export_to_file(results, path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("✓ {} written to: {}", exporter.format_name(), path.display());
    Ok(())
}
