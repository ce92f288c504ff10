use url::Url;

/// Extracts the normalized domain from a URL
///
/// The host is lowercased and a leading `www.` prefix is stripped, so
/// `https://www.Example.COM/x` and `https://example.com/y` belong to the same
/// domain.
///
/// # Arguments
///
/// * `url` - The URL to extract the domain from
///
/// # Returns
///
/// * `Some(String)` - The normalized domain
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use prowl::url::extract_domain;
///
/// let url = Url::parse("https://www.example.com/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(normalize_host)
}

/// Normalizes a raw host string: lowercase, leading `www.` removed
pub fn normalize_host(host: &str) -> String {
    let lower = host.to_lowercase();
    match lower.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => lower,
    }
}
