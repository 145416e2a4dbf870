use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Frontier cap used when `max-frontier` is not set, as a multiple of `max-pages`
pub const DEFAULT_FRONTIER_MULTIPLIER: usize = 20;

/// Main configuration structure for Recipe-Scout
///
/// Every table and key is optional; missing values fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlOptions,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

/// Crawl behavior for a single run
///
/// The numeric bounds are hard ceilings on the engine's counters.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CrawlOptions {
    /// Maximum number of pages fetched during discovery
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Maximum number of candidate URLs collected (and verified)
    #[serde(rename = "max-candidates")]
    pub max_candidates: usize,

    /// Only follow links within the start URL's registrable domain
    #[serde(rename = "same-domain-only")]
    pub same_domain_only: bool,

    /// Courtesy delay after each discovery fetch, in seconds
    #[serde(rename = "delay-seconds")]
    pub delay_seconds: f64,

    /// Per-request timeout, in seconds
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,

    /// Fetch and classify each candidate after discovery
    #[serde(rename = "verify-recipes")]
    pub verify_recipes: bool,

    /// Maximum frontier length; defaults to `max_pages * 20`
    #[serde(rename = "max-frontier")]
    pub max_frontier: Option<usize>,

    /// Apply the courtesy delay to verification fetches as well
    #[serde(rename = "throttle-verification")]
    pub throttle_verification: bool,

    /// Maximum verification fetches in flight at once
    #[serde(rename = "verify-concurrency")]
    pub verify_concurrency: usize,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_pages: 25,
            max_candidates: 300,
            same_domain_only: true,
            delay_seconds: 0.4,
            timeout_seconds: 15,
            verify_recipes: true,
            max_frontier: None,
            throttle_verification: false,
            verify_concurrency: 1,
        }
    }
}

impl CrawlOptions {
    /// Returns the frontier length ceiling in effect for this run
    pub fn frontier_cap(&self) -> usize {
        self.max_frontier
            .unwrap_or_else(|| self.max_pages.saturating_mul(DEFAULT_FRONTIER_MULTIPLIER))
    }

    /// Returns the courtesy delay as a duration
    ///
    /// Values that are not positive or do not fit in a `Duration` yield zero;
    /// validation rejects the latter before a crawl starts.
    pub fn delay(&self) -> Duration {
        if self.delay_seconds > 0.0 {
            Duration::try_from_secs_f64(self.delay_seconds).unwrap_or(Duration::ZERO)
        } else {
            Duration::ZERO
        }
    }

    /// Returns the per-request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "RecipeScout".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/bot".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the user agent header value
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}
