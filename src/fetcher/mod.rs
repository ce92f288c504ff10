//! Page Fetcher collaborator interface
//!
//! The core dispatch loop talks to the fetch mechanism through the
//! [`PageFetcher`] trait only. Implementations own their fetch resources
//! (HTTP sessions, browser contexts) and must surface every internal fault
//! as `success = false` rather than an error: the core never sees a
//! propagating failure from a fetch.

mod http;

pub use http::HttpFetcher;

use async_trait::async_trait;
use url::Url;

/// Outcome of fetching one URL
#[derive(Debug, Clone, Default)]
pub struct CrawlResult {
    /// Raw link references discovered on the page (may be relative)
    pub discovered_links: Vec<String>,

    /// Whether the page was fetched and parsed successfully
    pub success: bool,
}

impl CrawlResult {
    /// A successful fetch with the given discovered links
    pub fn success(discovered_links: Vec<String>) -> Self {
        Self {
            discovered_links,
            success: true,
        }
    }

    /// A failed fetch; carries no links
    pub fn failure() -> Self {
        Self {
            discovered_links: Vec::new(),
            success: false,
        }
    }
}

/// Capability to fetch one page and report the links found on it
///
/// The signature is infallible on purpose: retries, backoff, and resource
/// acquisition happen inside the implementation, and any exhausted retry or
/// internal fault comes back as [`CrawlResult::failure`].
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` and returns the links discovered on the page
    async fn fetch(&self, url: &Url) -> CrawlResult;
}
