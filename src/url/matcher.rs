use url::Url;

/// Matches URLs against the configured product-page patterns
///
/// A URL is a product page when any configured pattern appears as a
/// substring of the full URL, e.g. `/p/` for `https://shop.example/p/42`.
#[derive(Debug, Clone)]
pub struct ProductMatcher {
    patterns: Vec<String>,
}

impl ProductMatcher {
    /// Creates a matcher from the configured pattern list
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    /// Returns true if the URL matches any product pattern
    pub fn is_product(&self, url: &Url) -> bool {
        let url_str = url.as_str();
        self.patterns.iter().any(|p| url_str.contains(p.as_str()))
    }
}

/// Returns true if the URL contains any blocked keyword substring
///
/// Used by fetchers to skip ad and tracking endpoints.
pub fn contains_blocked_keyword(url: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| url.contains(k.as_str()))
}
