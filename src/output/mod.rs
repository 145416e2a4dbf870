//! Output module for presenting and exporting crawl results
//!
//! This module handles:
//! - Ordering results for display
//! - Exporting results as CSV, a recipe URL list, or JSON
//! - Computing and printing run statistics

mod csv;
pub mod stats;
mod text;
mod traits;

pub use csv::CsvExporter;
pub use stats::{print_statistics, CrawlStatistics};
pub use text::{format_table, JsonExporter, RecipeListExporter};
pub use traits::{OutputError, OutputResult, ResultExporter};

use crate::state::PageResult;
use std::cmp::Reverse;

/// Sorts results for display: recipes first, then other candidates, then
/// discovery failures
///
/// The sort is stable, so rows with equal flags keep their crawl order.
pub fn sort_for_display(results: &mut [PageResult]) {
    results.sort_by_key(|r| (Reverse(r.is_recipe), Reverse(r.is_candidate)));
}

/// Returns a display-ordered copy, leaving `results` in crawl order
pub fn sorted_for_display(results: &[PageResult]) -> Vec<PageResult> {
    let mut sorted = results.to_vec();
    sort_for_display(&mut sorted);
    sorted
}
