//! Crawler module for recipe discovery
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with content-type gating
//! - HTML parsing and link extraction
//! - Recipe classification (URL heuristic and structured data)
//! - Frontier, candidate and rate management
//! - Overall crawl coordination

mod classifier;
mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use classifier::{contains_recipe, is_recipe_page, looks_like_recipe_url, parse_json_ld};
pub use coordinator::Crawler;
pub use fetcher::{
    build_http_client, fetch_url, is_error_status, is_html_content_type, FetchError, FetchResult,
    HttpFetcher, PageFetcher,
};
pub use frontier::{CandidateList, Frontier, FrontierEntry, RateGate};
pub use parser::{extract_links, parse_html, ParsedPage};

use crate::config::{Config, CrawlOptions};
use crate::state::PageResult;
use crate::ScoutError;

/// Runs a complete crawl over HTTP with the default user agent
///
/// This is the main entry point for one-off crawls. It will:
/// 1. Build the HTTP client
/// 2. Discover candidates breadth-first from `start_url`
/// 3. Verify each candidate (unless disabled)
///
/// # Arguments
///
/// * `start_url` - Where to start; `https` is assumed if no scheme is given
/// * `options` - Limits and behavior for this run
///
/// # Returns
///
/// * `Ok(Vec<PageResult>)` - Discovery failures, then one row per candidate
/// * `Err(ScoutError)` - Invalid options or start URL, or client construction failed
///
/// # Example
///
/// ```no_run
/// use recipe_scout::config::CrawlOptions;
/// use recipe_scout::crawler::crawl;
///
/// # async fn example() -> Result<(), recipe_scout::ScoutError> {
/// let results = crawl("example.com", CrawlOptions::default()).await?;
/// for page in results.iter().filter(|r| r.is_recipe) {
///     println!("{}", page.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn crawl(start_url: &str, options: CrawlOptions) -> Result<Vec<PageResult>, ScoutError> {
    let config = Config {
        crawler: options,
        ..Config::default()
    };
    let crawler = Crawler::from_config(&config)?;
    Ok(crawler.crawl(start_url).await?)
}
