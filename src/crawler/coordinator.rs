//! Crawler coordinator - main crawl orchestration logic
//!
//! A crawl runs in two strictly sequential phases:
//!
//! 1. **Discovery** walks the site breadth-first from the start URL, growing
//!    the frontier from each fetched page and collecting candidate URLs whose
//!    text looks like a recipe page. It stops at `max_pages` fetches,
//!    `max_candidates` candidates, an empty frontier, or cancellation.
//! 2. **Verification** fetches each candidate and classifies its markup.
//!
//! Discovery fetch failures become result rows; every candidate becomes one
//! result row whether or not it was verified.

use crate::config::{validate, Config, CrawlOptions};
use crate::crawler::classifier::{is_recipe_page, looks_like_recipe_url};
use crate::crawler::fetcher::{FetchResult, HttpFetcher, PageFetcher};
use crate::crawler::frontier::{CandidateList, Frontier, RateGate};
use crate::crawler::parser::extract_links;
use crate::state::{PageResult, RunContext};
use crate::url::{normalize, parse_http_url, registrable_domain, with_default_scheme};
use crate::{ScoutError, UrlError};
use futures::stream::{self, StreamExt};
use std::time::{Duration, Instant};

/// Output of the discovery phase
#[derive(Debug, Default)]
struct Discovery {
    failures: Vec<PageResult>,
    candidates: Vec<String>,
    pages_fetched: usize,
}

/// The crawl engine
///
/// A `Crawler` holds only immutable configuration and a fetcher. Each call to
/// [`Crawler::crawl`] builds its own frontier, visited set and candidate list
/// and returns a fresh result sequence.
pub struct Crawler<F = HttpFetcher> {
    options: CrawlOptions,
    fetcher: F,
}

impl Crawler<HttpFetcher> {
    /// Creates a crawler that fetches over HTTP with the configured identity
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Configuration is valid and the HTTP client was built
    /// * `Err(ScoutError)` - Invalid configuration or client construction failure
    pub fn from_config(config: &Config) -> Result<Self, ScoutError> {
        validate(config)?;
        let fetcher = HttpFetcher::new(&config.user_agent, config.crawler.timeout())?;
        Ok(Self::new(config.crawler.clone(), fetcher))
    }
}

impl<F: PageFetcher> Crawler<F> {
    /// Creates a crawler from options and any fetcher
    pub fn new(options: CrawlOptions, fetcher: F) -> Self {
        Self { options, fetcher }
    }

    /// Returns the options this crawler runs with
    pub fn options(&self) -> &CrawlOptions {
        &self.options
    }

    /// Crawls from `start_url` and returns the result rows
    ///
    /// The start URL may omit its scheme, in which case `https` is assumed.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<PageResult>)` - Discovery failures first, then one row per candidate
    /// * `Err(UrlError)` - The start URL is not a crawlable http(s) URL
    pub async fn crawl(&self, start_url: &str) -> Result<Vec<PageResult>, UrlError> {
        self.crawl_with_context(start_url, &RunContext::new()).await
    }

    /// Crawls from `start_url`, stopping early if the context is cancelled
    ///
    /// Cancellation is observed at the top of each frontier iteration and
    /// before each verification fetch. Candidates left unverified by a
    /// cancellation are still returned, with `is_recipe` false.
    pub async fn crawl_with_context(
        &self,
        start_url: &str,
        ctx: &RunContext,
    ) -> Result<Vec<PageResult>, UrlError> {
        let start = parse_http_url(&with_default_scheme(start_url))?.to_string();
        tracing::info!("Starting crawl at {}", start);

        let discovery = self.discover(&start, ctx).await;
        tracing::info!(
            "Discovery finished: {} pages fetched, {} failures, {} candidates",
            discovery.pages_fetched,
            discovery.failures.len(),
            discovery.candidates.len()
        );

        let mut results = discovery.failures;
        results.extend(self.verify(&start, discovery.candidates, ctx).await);

        Ok(results)
    }

    /// Runs the discovery phase
    async fn discover(&self, start: &str, ctx: &RunContext) -> Discovery {
        let base_domain = registrable_domain(start);
        let delay = self.options.delay();
        let started = Instant::now();

        let mut frontier = Frontier::new(start, self.options.frontier_cap());
        let mut candidates = CandidateList::new(self.options.max_candidates);
        let mut failures = Vec::new();
        let mut pages_fetched = 0;

        while pages_fetched < self.options.max_pages && !candidates.is_full() {
            if ctx.is_cancelled() {
                tracing::info!("Crawl cancelled during discovery");
                break;
            }

            let Some(entry) = frontier.pop() else {
                tracing::debug!("Frontier is empty");
                break;
            };

            let url = normalize(&entry.url);
            if !frontier.mark_visited(&url) {
                continue;
            }

            if !self.in_scope(&url, &base_domain) {
                tracing::debug!("Skipping out-of-domain URL: {}", url);
                continue;
            }

            tracing::debug!("Fetching {} (depth {})", url, entry.depth);
            let fetched = self.fetcher.fetch(&url).await;
            pages_fetched += 1;
            pause(delay).await;

            match fetched {
                FetchResult::Success {
                    final_url, body, ..
                } => {
                    if final_url != url {
                        tracing::debug!("{} redirected to {}", url, final_url);
                    }

                    for link in extract_links(&url, &body) {
                        if !self.in_scope(&link, &base_domain) {
                            continue;
                        }

                        frontier.push(link.as_str(), entry.depth + 1);

                        if looks_like_recipe_url(&link) {
                            candidates.push(&link);
                            if candidates.is_full() {
                                break;
                            }
                        }
                    }

                    if looks_like_recipe_url(&url) && !candidates.contains(&url) {
                        candidates.push(&url);
                    }
                }
                FetchResult::Failure { status_code, error } => {
                    tracing::warn!("Failed to fetch {}: {}", url, error);
                    failures.push(PageResult::discovery_failure(
                        url,
                        status_code,
                        error.to_string(),
                    ));
                }
            }

            if pages_fetched % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages fetched, {} in frontier, {} candidates, {:.2} pages/sec",
                    pages_fetched,
                    frontier.len(),
                    candidates.len(),
                    pages_fetched as f64 / started.elapsed().as_secs_f64()
                );
            }
        }

        Discovery {
            failures,
            candidates: candidates.into_vec(),
            pages_fetched,
        }
    }

    /// Runs the verification phase, returning one row per candidate in order
    async fn verify(
        &self,
        start: &str,
        candidates: Vec<String>,
        ctx: &RunContext,
    ) -> Vec<PageResult> {
        if !self.options.verify_recipes {
            tracing::info!("Verification disabled, reporting candidates unverified");
            return candidates
                .into_iter()
                .map(|url| PageResult::candidate(url, start))
                .collect();
        }

        tracing::info!("Verifying {} candidates", candidates.len());

        let interval = if self.options.throttle_verification {
            self.options.delay()
        } else {
            Duration::ZERO
        };
        let gate = RateGate::new(interval);

        let results: Vec<PageResult> = stream::iter(candidates)
            .map(|url| self.verify_candidate(url, start, &gate, ctx))
            .buffered(self.options.verify_concurrency.max(1))
            .collect()
            .await;

        let recipes = results.iter().filter(|r| r.is_recipe).count();
        tracing::info!(
            "Verification finished: {} of {} candidates are recipes",
            recipes,
            results.len()
        );

        results
    }

    async fn verify_candidate(
        &self,
        url: String,
        start: &str,
        gate: &RateGate,
        ctx: &RunContext,
    ) -> PageResult {
        let row = PageResult::candidate(url.as_str(), start);
        if ctx.is_cancelled() {
            return row;
        }

        gate.wait().await;

        match self.fetcher.fetch(&url).await {
            FetchResult::Success {
                status_code, body, ..
            } => {
                let (is_recipe, title) = is_recipe_page(&body);
                tracing::debug!("Verified {}: recipe={}", url, is_recipe);
                row.with_fetch_status(Some(status_code), None)
                    .with_classification(is_recipe, title)
            }
            FetchResult::Failure { status_code, error } => {
                tracing::warn!("Failed to verify {}: {}", url, error);
                row.with_fetch_status(status_code, Some(error.to_string()))
            }
        }
    }

    fn in_scope(&self, url: &str, base_domain: &str) -> bool {
        !self.options.same_domain_only || registrable_domain(url) == base_domain
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
