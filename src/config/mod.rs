//! Configuration module for Recipe-Scout
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every key is optional, so an empty file yields the default options.
//!
//! # Example
//!
//! ```no_run
//! use recipe_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scout.toml")).unwrap();
//! println!("Crawler will fetch at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{Config, CrawlOptions, UserAgentConfig, DEFAULT_FRONTIER_MULTIPLIER};

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::{validate, validate_options};
