//! CSV export of all result rows
//!
//! Columns follow the `PageResult` field order:
//! `url,source_page,is_candidate,is_recipe,title,http_status,error`.
//! Missing values are empty fields and records end in CRLF.

use crate::output::traits::{OutputResult, ResultExporter};
use crate::state::PageResult;
use std::io::Write;

/// Exports every result row as CSV
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl ResultExporter for CsvExporter {
    fn format_name(&self) -> &'static str {
        "CSV"
    }

    fn export(&self, results: &[PageResult], writer: &mut dyn Write) -> OutputResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(writer);

        if results.is_empty() {
            // serialize() only emits the header alongside the first record
            csv_writer.write_record([
                "url",
                "source_page",
                "is_candidate",
                "is_recipe",
                "title",
                "http_status",
                "error",
            ])?;
        }

        for result in results {
            csv_writer.serialize(result)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
