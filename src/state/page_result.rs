//! Per-URL result records produced by a crawl
//!
//! A crawl emits one record per failed discovery fetch and one per candidate,
//! whether or not the candidate was verified.

use serde::{Deserialize, Serialize};

/// Outcome of processing a single URL
///
/// Records are built once and never modified after they are appended to the
/// result sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    /// The URL this record describes
    pub url: String,

    /// The page that led to this URL (the start URL for candidates)
    pub source_page: Option<String>,

    /// URL matched the recipe URL heuristic
    pub is_candidate: bool,

    /// Page markup carried recipe structured data
    pub is_recipe: bool,

    /// Document title, when the page was fetched and had one
    pub title: Option<String>,

    /// HTTP status code of the fetch, if a response was received
    pub http_status: Option<u16>,

    /// Error description for failed fetches
    pub error: Option<String>,
}

impl PageResult {
    /// Builds the record for a discovery fetch that did not yield HTML
    pub fn discovery_failure(
        url: impl Into<String>,
        http_status: Option<u16>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            source_page: None,
            is_candidate: false,
            is_recipe: false,
            title: None,
            http_status,
            error: Some(error.into()),
        }
    }

    /// Builds an unverified candidate record
    ///
    /// Verification fills in the remaining fields through the `with_*` methods.
    pub fn candidate(url: impl Into<String>, source_page: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source_page: Some(source_page.into()),
            is_candidate: true,
            is_recipe: false,
            title: None,
            http_status: None,
            error: None,
        }
    }

    /// Sets the classification outcome
    pub fn with_classification(mut self, is_recipe: bool, title: Option<String>) -> Self {
        self.is_recipe = is_recipe;
        self.title = title;
        self
    }

    /// Sets the HTTP status and error of the verification fetch
    pub fn with_fetch_status(mut self, http_status: Option<u16>, error: Option<String>) -> Self {
        self.http_status = http_status;
        self.error = error;
        self
    }

    /// Returns true if the record carries an error
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_failure() {
        let result = PageResult::discovery_failure("https://example.com/x", Some(404), "HTTP 404");
        assert_eq!(result.url, "https://example.com/x");
        assert!(!result.is_candidate);
        assert!(!result.is_recipe);
        assert_eq!(result.http_status, Some(404));
        assert_eq!(result.error.as_deref(), Some("HTTP 404"));
        assert!(result.source_page.is_none());
        assert!(result.is_error());
    }

    #[test]
    fn test_candidate_defaults() {
        let result = PageResult::candidate("https://example.com/recipes/a", "https://example.com/");
        assert!(result.is_candidate);
        assert!(!result.is_recipe);
        assert_eq!(result.source_page.as_deref(), Some("https://example.com/"));
        assert!(!result.is_error());
    }

    #[test]
    fn test_verified_candidate() {
        let result = PageResult::candidate("https://example.com/recipes/a", "https://example.com/")
            .with_fetch_status(Some(200), None)
            .with_classification(true, Some("Soup".to_string()));
        assert!(result.is_recipe);
        assert_eq!(result.title.as_deref(), Some("Soup"));
        assert_eq!(result.http_status, Some(200));
    }
}
