//! Output exporter trait and error types

use crate::state::PageResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for result exporters
///
/// Exporters serialize a finished result batch to any writer. They hold no
/// state between calls.
pub trait ResultExporter {
    /// Short format name used in log messages
    fn format_name(&self) -> &'static str;

    /// Writes the results to `writer`
    fn export(&self, results: &[PageResult], writer: &mut dyn Write) -> OutputResult<()>;

    /// Writes the results to a file, replacing any existing content
    fn export_to_file(&self, results: &[PageResult], path: &Path) -> OutputResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.export(results, &mut writer)?;
        writer.flush()?;
        tracing::info!("Wrote {} export to {}", self.format_name(), path.display());
        Ok(())
    }
}
