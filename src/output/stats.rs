//! Run statistics computed from a finished result batch

use crate::state::{PageResult, RunContext};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Key used in the error summary for failures without an HTTP status
const TRANSPORT_ERROR_KEY: &str = "transport";

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlStatistics {
    /// Total number of result rows
    pub total_rows: u64,

    /// Discovery fetches that failed
    pub discovery_failures: u64,

    /// Candidate rows
    pub candidates: u64,

    /// Candidates a verification fetch was attempted for
    pub candidates_fetched: u64,

    /// Candidates confirmed as recipe pages
    pub recipes: u64,

    /// Error counts keyed by HTTP status, or "transport" when there was none
    pub error_summary: HashMap<String, u64>,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Wall-clock run time in seconds
    pub duration_seconds: f64,
}

impl CrawlStatistics {
    /// Computes statistics for a result batch produced under `ctx`
    pub fn from_results(results: &[PageResult], ctx: &RunContext) -> Self {
        let mut stats = Self {
            total_rows: results.len() as u64,
            discovery_failures: 0,
            candidates: 0,
            candidates_fetched: 0,
            recipes: 0,
            error_summary: HashMap::new(),
            started_at: ctx.started_at(),
            duration_seconds: ctx.elapsed().num_milliseconds() as f64 / 1000.0,
        };

        for result in results {
            if result.is_candidate {
                stats.candidates += 1;
                if result.http_status.is_some() || result.error.is_some() {
                    stats.candidates_fetched += 1;
                }
            } else {
                stats.discovery_failures += 1;
            }

            if result.is_recipe {
                stats.recipes += 1;
            }

            if result.is_error() {
                let key = result
                    .http_status
                    .map(|status| status.to_string())
                    .unwrap_or_else(|| TRANSPORT_ERROR_KEY.to_string());
                *stats.error_summary.entry(key).or_insert(0) += 1;
            }
        }

        stats
    }

    /// Total number of rows carrying an error
    pub fn total_errors(&self) -> u64 {
        self.error_summary.values().sum()
    }

    /// Percentage of fetched candidates that turned out to be recipes
    pub fn recipe_rate(&self) -> f64 {
        if self.candidates_fetched == 0 {
            return 0.0;
        }
        (self.recipes as f64 / self.candidates_fetched as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    println!("  Duration: {:.1} seconds", stats.duration_seconds);
    println!("  Result rows: {}", stats.total_rows);
    println!("  Discovery failures: {}", stats.discovery_failures);
    println!("  Candidates: {}", stats.candidates);
    println!("  Candidates fetched: {}", stats.candidates_fetched);
    println!("  Recipes: {}", stats.recipes);
    println!();

    if !stats.error_summary.is_empty() {
        println!("Error Summary:");
        let mut error_counts: Vec<_> = stats.error_summary.iter().collect();
        error_counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        for (kind, count) in error_counts {
            println!("  {}: {}", kind, count);
        }
        println!();
    }

    println!(
        "Recipe Rate: {:.1}% ({} / {} candidates fetched)",
        stats.recipe_rate(),
        stats.recipes,
        stats.candidates_fetched
    );
}
