use crate::UrlError;
use url::Url;

/// Parses an absolute seed URL and strips its fragment
///
/// Only HTTP(S) URLs are accepted. Fragments are removed because two URLs
/// that differ only in their fragment address the same page.
///
/// # Arguments
///
/// * `url_str` - The absolute URL string
///
/// # Returns
///
/// * `Ok(Url)` - Parsed, fragment-free URL
/// * `Err(UrlError)` - Malformed URL, unsupported scheme, or missing host
pub fn normalize_seed(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    url.set_fragment(None);
    Ok(url)
}

/// Resolves a discovered link against the page it was found on
///
/// Relative references are joined against `base`; the fragment is stripped
/// from the result. Equality of stored URLs is exact string match after this
/// normalization.
///
/// # Arguments
///
/// * `base` - The URL of the page the link was extracted from
/// * `raw` - The raw href value, absolute or relative
///
/// # Returns
///
/// * `Ok(Url)` - Absolute, fragment-free URL
/// * `Err(UrlError)` - The reference could not be resolved to an HTTP(S) URL
pub fn resolve_link(base: &Url, raw: &str) -> Result<Url, UrlError> {
    let mut url = base
        .join(raw)
        .map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    url.set_fragment(None);
    Ok(url)
}
