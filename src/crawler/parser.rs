//! HTML parser for extracting links and the page title
//!
//! Links come only from `<a href>` anchors. They are resolved against the
//! page URL, stripped of fragments, and de-duplicated in first-seen order.

use crate::url::{is_non_navigable, normalize};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// All links found on the page (absolute, fragment-free, unique)
    pub links: Vec<String>,
}

/// Parses HTML content and extracts links and the title
///
/// # Link Extraction Rules
///
/// - every `<a>` with an `href` attribute is considered
/// - `mailto:`, `tel:` and `javascript:` hrefs are skipped
/// - relative hrefs are resolved against `base_url`
/// - fragments are stripped, so `/a#x` and `/a#y` are the same link
/// - only http(s) results are kept
/// - each link appears once, at the position of its first occurrence
///
/// # Example
///
/// ```
/// use recipe_scout::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.links, vec!["https://example.com/page".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        links: collect_links(&document, base_url),
    }
}

/// Extracts the ordered, de-duplicated links of a page
///
/// Returns an empty list when `page_url` cannot be parsed.
pub fn extract_links(page_url: &str, html: &str) -> Vec<String> {
    match Url::parse(page_url) {
        Ok(base_url) => parse_html(html, &base_url).links,
        Err(e) => {
            tracing::debug!("Cannot resolve links against {}: {}", page_url, e);
            Vec::new()
        }
    }
}

/// Extracts the page title from the HTML document
pub(crate) fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn collect_links(document: &Html, base_url: &Url) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if let Some(absolute_url) = resolve_link(href, base_url) {
            if seen.insert(absolute_url.clone()) {
                links.push(absolute_url);
            }
        }
    }

    links
}

/// Resolves a link href to an absolute, fragment-free URL
///
/// Returns None if the link should be excluded:
/// - empty hrefs
/// - javascript:, mailto:, tel: schemes
/// - hrefs that do not resolve
/// - non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || is_non_navigable(href) {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }

    absolute_url.set_fragment(None);
    Some(normalize(absolute_url.as_str()))
}
