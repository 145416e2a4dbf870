//! URL handling module for Recipe-Scout
//!
//! This module provides URL normalization and registrable-domain scoping.
//! URL identity throughout the crawler is the normalized string, and scoping
//! compares registrable domains rather than exact hosts so subdomains of the
//! start site stay in scope.

mod domain;
mod normalize;

pub use domain::{extract_domain, registrable_domain, same_registrable_domain};
pub use normalize::{is_non_navigable, normalize, parse_http_url, with_default_scheme};
