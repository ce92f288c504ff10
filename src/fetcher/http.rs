//! HTTP page fetcher
//!
//! Fetches pages with reqwest and extracts `a[href]` links with scraper.
//! A semaphore-backed session pool bounds how many fetches hold a network
//! resource at once; the permit is held for the whole fetch, so cancelling
//! the task (per-URL timeout, domain timeout) releases the session.
//!
//! Retry behavior follows the collaborator contract: up to
//! `max-fetch-retries` attempts with exponential backoff starting at
//! `retry-backoff-base-seconds`, and only an HTTP 200 counts as success.

use crate::config::FetcherConfig;
use crate::fetcher::{CrawlResult, PageFetcher};
use crate::url::contains_blocked_keyword;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use url::Url;

/// Reqwest-based [`PageFetcher`] implementation
pub struct HttpFetcher {
    client: Client,
    sessions: Arc<Semaphore>,
    config: FetcherConfig,
}

impl HttpFetcher {
    /// Creates a fetcher with a session pool of the given capacity
    ///
    /// # Arguments
    ///
    /// * `config` - Fetcher timing, retry, and filtering settings
    /// * `pool_size` - Maximum simultaneous fetches across all domains
    ///
    /// # Returns
    ///
    /// * `Ok(HttpFetcher)` - Ready-to-use fetcher
    /// * `Err(reqwest::Error)` - Failed to build the HTTP client
    pub fn new(config: FetcherConfig, pool_size: usize) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.page_fetch_timeout())
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            sessions: Arc::new(Semaphore::new(pool_size.max(1))),
            config,
        })
    }

    /// Performs one GET attempt; `Ok` only for HTTP 200 with a body
    async fn attempt(&self, url: &Url) -> Result<String, String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if status.as_u16() != 200 {
            return Err(format!("HTTP {}", status));
        }

        response.text().await.map_err(|e| e.to_string())
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> CrawlResult {
        // Session permit is held until this future completes or is dropped.
        let _session = match self.sessions.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                tracing::error!("Fetch session pool closed while fetching {}", url);
                return CrawlResult::failure();
            }
        };

        let mut delay = Duration::from_secs(self.config.retry_backoff_base_seconds);

        for attempt in 1..=self.config.max_fetch_retries {
            tracing::debug!("Attempt {}: fetching {}", attempt, url);

            match self.attempt(url).await {
                Ok(body) => {
                    let links =
                        extract_links(&body, &self.config.blocked_keyword_substrings);
                    tracing::debug!("Extracted {} links from {}", links.len(), url);
                    return CrawlResult::success(links);
                }
                Err(reason) => {
                    tracing::warn!("Attempt {} failed for {}: {}", attempt, url, reason);
                }
            }

            if attempt < self.config.max_fetch_retries {
                tracing::debug!("Retrying {} in {:?}", url, delay);
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
        }

        tracing::warn!(
            "Failed to fetch {} after {} attempts",
            url,
            self.config.max_fetch_retries
        );
        CrawlResult::failure()
    }
}

/// Extracts `a[href]` values from an HTML body, skipping blocked keywords
///
/// Returns raw href strings; resolution against the page URL happens in the
/// frontier.
fn extract_links(body: &str, blocked_keywords: &[String]) -> Vec<String> {
    use scraper::{Html, Selector};

    let document = Html::parse_document(body);
    // The selector literal is valid; parse cannot fail.
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|el| el.value().attr("href"))
        .filter(|href| !contains_blocked_keyword(href, blocked_keywords))
        .map(|href| href.to_string())
        .collect()
}
