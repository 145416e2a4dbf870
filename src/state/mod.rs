//! Run state for a single crawl
//!
//! # Components
//!
//! - `PageResult`: the record emitted for each failed discovery fetch and each candidate
//! - `RunContext`: caller-owned cancellation and timing for one run

mod page_result;
mod run_context;

pub use page_result::PageResult;
pub use run_context::RunContext;
