use crate::UrlError;
use url::Url;

/// Schemes that never point at a fetchable page
const NON_NAVIGABLE_SCHEMES: &[&str] = &["mailto:", "tel:", "javascript:"];

/// Normalizes a URL string for identity comparisons
///
/// Normalization is deliberately light: surrounding whitespace is trimmed and
/// the fragment (everything from the first `#`) is dropped. Nothing else about
/// the URL changes, so two links that differ only by an in-page anchor compare
/// equal while query strings stay significant.
///
/// The function is pure and idempotent.
///
/// # Examples
///
/// ```
/// use recipe_scout::url::normalize;
///
/// assert_eq!(normalize("  https://example.com/page#steps "), "https://example.com/page");
/// assert_eq!(normalize("https://example.com/?q=1"), "https://example.com/?q=1");
/// ```
pub fn normalize(url: &str) -> String {
    let trimmed = url.trim();
    match trimmed.find('#') {
        Some(idx) => trimmed[..idx].to_string(),
        None => trimmed.to_string(),
    }
}

/// Normalizes a URL and prefixes `https://` when it carries no scheme
///
/// Protocol-relative input (`//host/path`) gets `https:` prepended.
///
/// # Examples
///
/// ```
/// use recipe_scout::url::with_default_scheme;
///
/// assert_eq!(with_default_scheme("example.com/recipes"), "https://example.com/recipes");
/// assert_eq!(with_default_scheme("http://example.com/"), "http://example.com/");
/// ```
pub fn with_default_scheme(url: &str) -> String {
    let normalized = normalize(url);
    if normalized.contains("://") {
        normalized
    } else if let Some(rest) = normalized.strip_prefix("//") {
        format!("https://{}", rest)
    } else {
        format!("https://{}", normalized)
    }
}

/// Parses a URL and checks that it is something the crawler can fetch
///
/// # Returns
///
/// * `Ok(Url)` - An http(s) URL with a host
/// * `Err(UrlError)` - The URL is malformed, uses another scheme, or has no host
pub fn parse_http_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

/// Returns true if an href uses a scheme that cannot be crawled
pub fn is_non_navigable(href: &str) -> bool {
    let href = href.trim_start();
    NON_NAVIGABLE_SCHEMES.iter().any(|scheme| {
        href.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
