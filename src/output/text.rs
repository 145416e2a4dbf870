//! Plain-text outputs: the recipe URL list and the terminal table

use crate::output::traits::{OutputResult, ResultExporter};
use crate::state::PageResult;
use std::io::Write;

/// Exports the URLs of verified recipe pages, one per line
#[derive(Debug, Clone, Copy, Default)]
pub struct RecipeListExporter;

impl ResultExporter for RecipeListExporter {
    fn format_name(&self) -> &'static str {
        "recipe list"
    }

    fn export(&self, results: &[PageResult], writer: &mut dyn Write) -> OutputResult<()> {
        let urls: Vec<&str> = results
            .iter()
            .filter(|r| r.is_recipe)
            .map(|r| r.url.as_str())
            .collect();
        writer.write_all(urls.join("\n").as_bytes())?;
        Ok(())
    }
}

/// Exports all rows as a pretty-printed JSON array
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl ResultExporter for JsonExporter {
    fn format_name(&self) -> &'static str {
        "JSON"
    }

    fn export(&self, results: &[PageResult], writer: &mut dyn Write) -> OutputResult<()> {
        serde_json::to_writer_pretty(&mut *writer, results)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Formats results as a fixed-width table for the terminal
///
/// Rows are printed in the order given; call
/// [`sort_for_display`](crate::output::sort_for_display) first for the usual
/// recipes-first ordering.
pub fn format_table(results: &[PageResult]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<6} {:<9} {:<6} {:<60} {}\n",
        "RECIPE", "CANDIDATE", "STATUS", "URL", "TITLE / ERROR"
    ));

    for result in results {
        let status = result
            .http_status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let detail = result
            .error
            .as_deref()
            .or(result.title.as_deref())
            .unwrap_or("");

        out.push_str(&format!(
            "{:<6} {:<9} {:<6} {:<60} {}\n",
            yes_no(result.is_recipe),
            yes_no(result.is_candidate),
            status,
            result.url,
            detail
        ));
    }

    out
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
