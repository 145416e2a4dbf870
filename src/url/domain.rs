use url::{Host, Url};

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use recipe_scout::url::extract_domain;
///
/// let url = Url::parse("https://Blog.Example.com/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("blog.example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the registrable domain of a URL
///
/// The registrable domain is the public suffix plus one label, looked up in
/// the public suffix list: `sub.example.co.uk` yields `example.co.uk`.
///
/// * IP hosts return the address itself.
/// * Hosts with no label beyond a public suffix (such as `localhost`) return
///   the host.
/// * URLs that do not parse or have no host return an empty string.
///
/// # Examples
///
/// ```
/// use recipe_scout::url::registrable_domain;
///
/// assert_eq!(registrable_domain("https://a.b.example.co.uk/x"), "example.co.uk");
/// assert_eq!(registrable_domain("https://www.example.com/"), "example.com");
/// assert_eq!(registrable_domain("mailto:cook@example.com"), "");
/// ```
pub fn registrable_domain(url: &str) -> String {
    let Ok(parsed) = Url::parse(url.trim()) else {
        return String::new();
    };

    match parsed.host() {
        Some(Host::Domain(_)) => {
            let host = extract_domain(&parsed).unwrap_or_default();
            let host = host.trim_end_matches('.');
            psl::domain_str(host).unwrap_or(host).to_string()
        }
        Some(Host::Ipv4(addr)) => addr.to_string(),
        Some(Host::Ipv6(addr)) => addr.to_string(),
        None => String::new(),
    }
}

/// Returns true if both URLs belong to the same registrable domain
///
/// Subdomains of a site compare equal to the site itself. URLs without a
/// registrable domain never match anything.
pub fn same_registrable_domain(a: &str, b: &str) -> bool {
    let domain_a = registrable_domain(a);
    !domain_a.is_empty() && domain_a == registrable_domain(b)
}
