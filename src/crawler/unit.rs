//! Domain Crawl Unit
//!
//! One unit fully crawls one domain: it owns that domain's frontier and
//! concurrency controller and runs the dispatch loop until the frontier is
//! drained and no tasks remain in flight. URLs that failed get exactly one
//! more chance in a single retry pass; a URL that fails twice is abandoned
//! and only logged.
//!
//! Completed tasks are tied back to their URL through an explicit
//! task-id → URL map, so outcomes can never be attributed to the wrong URL
//! when several tasks finish close together.

use crate::config::CrawlerConfig;
use crate::crawler::controller::ConcurrencyController;
use crate::crawler::frontier::Frontier;
use crate::fetcher::{CrawlResult, PageFetcher};
use crate::output::{ProductRecord, ProductSink};
use crate::url::ProductMatcher;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use url::Url;

/// How one domain's crawl ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainOutcome {
    /// Frontier drained and retry pass finished
    Completed,

    /// The domain exceeded its wall-clock budget and was cancelled
    TimedOut,
}

/// Summary of one domain's crawl
#[derive(Debug, Clone)]
pub struct DomainReport {
    /// Normalized domain this report covers
    pub domain: String,

    /// How the crawl ended
    pub outcome: DomainOutcome,

    /// Tasks that ran to completion (successes and failures, both passes)
    pub pages_processed: usize,

    /// Product links discovered across the whole crawl
    pub product_links_found: usize,

    /// URLs that failed the initial pass and the retry pass
    pub abandoned_urls: Vec<String>,
}

impl DomainReport {
    /// Report for a domain cancelled by the scheduler's wall-clock timeout,
    /// carrying whatever progress the unit made before cancellation
    pub fn timed_out(domain: String, progress: &CrawlProgress) -> Self {
        Self {
            domain,
            outcome: DomainOutcome::TimedOut,
            pages_processed: progress.pages_processed(),
            product_links_found: progress.product_links_found(),
            abandoned_urls: Vec::new(),
        }
    }
}

/// Live crawl counters, shared between a unit and its scheduler
///
/// The scheduler keeps a handle so a domain cancelled mid-crawl still
/// reports the pages and product links it actually got through; the JSONL
/// records written before cancellation persist either way.
#[derive(Debug, Default)]
pub struct CrawlProgress {
    pages_processed: AtomicUsize,
    product_links_found: AtomicUsize,
}

impl CrawlProgress {
    /// Tasks that ran to completion so far (successes and failures)
    pub fn pages_processed(&self) -> usize {
        self.pages_processed.load(Ordering::Relaxed)
    }

    /// Product links discovered so far
    pub fn product_links_found(&self) -> usize {
        self.product_links_found.load(Ordering::Relaxed)
    }

    fn record_page(&self) {
        self.pages_processed.fetch_add(1, Ordering::Relaxed);
    }

    fn record_products(&self, count: usize) {
        self.product_links_found.fetch_add(count, Ordering::Relaxed);
    }
}

/// Crawls a single domain to exhaustion
pub struct DomainCrawlUnit {
    domain: String,
    frontier: Frontier,
    controller: ConcurrencyController,
    matcher: ProductMatcher,
    fetcher: Arc<dyn PageFetcher>,
    sink: Arc<dyn ProductSink>,
    task_timeout: Duration,
    progress: Arc<CrawlProgress>,
}

impl DomainCrawlUnit {
    /// Creates a unit for `domain` with fresh frontier and controller state
    pub fn new(
        domain: String,
        config: &CrawlerConfig,
        fetcher: Arc<dyn PageFetcher>,
        sink: Arc<dyn ProductSink>,
    ) -> Self {
        Self {
            frontier: Frontier::new(domain.clone()),
            controller: ConcurrencyController::new(config.auto_scale, config.max_concurrency_limit),
            matcher: ProductMatcher::new(config.product_url_patterns.clone()),
            domain,
            fetcher,
            sink,
            task_timeout: config.url_task_timeout(),
            progress: Arc::new(CrawlProgress::default()),
        }
    }

    /// Handle to this unit's live counters, valid across cancellation
    pub fn progress(&self) -> Arc<CrawlProgress> {
        Arc::clone(&self.progress)
    }

    /// Runs the crawl: seed, drain, one retry pass for failures
    pub async fn run(mut self, seeds: Vec<Url>) -> DomainReport {
        tracing::info!("Starting crawl of {} ({} seeds)", self.domain, seeds.len());

        for seed in &seeds {
            self.frontier.enqueue(&[seed.to_string()], seed);
        }

        let failed = self.drain().await;

        let abandoned = if failed.is_empty() {
            Vec::new()
        } else {
            tracing::info!(
                "Retry pass for {}: re-queuing {} failed URLs",
                self.domain,
                failed.len()
            );
            self.frontier.requeue(failed);
            let abandoned = self.drain().await;
            for url in &abandoned {
                tracing::warn!("Abandoning {} after failed retry", url);
            }
            abandoned
        };

        tracing::info!(
            "Finished crawl of {}: {} pages processed, {} product links, {} abandoned",
            self.domain,
            self.progress.pages_processed(),
            self.progress.product_links_found(),
            abandoned.len()
        );

        DomainReport {
            domain: self.domain,
            outcome: DomainOutcome::Completed,
            pages_processed: self.progress.pages_processed(),
            product_links_found: self.progress.product_links_found(),
            abandoned_urls: abandoned.iter().map(|u| u.to_string()).collect(),
        }
    }

    /// The dispatch loop: launch tasks up to the current budget, await one
    /// completion, collect it, repeat until queue and in-flight are empty
    ///
    /// Returns the URLs that failed during this pass.
    async fn drain(&mut self) -> Vec<Url> {
        let mut tasks: JoinSet<(Url, CrawlResult)> = JoinSet::new();
        let mut in_flight: HashMap<tokio::task::Id, Url> = HashMap::new();
        let mut failed: Vec<Url> = Vec::new();

        while !self.frontier.is_empty() || !in_flight.is_empty() {
            // DISPATCH: fill up to the controller's current budget. This
            // loop is the frontier's only consumer, so the emptiness check
            // guarantees dequeue returns without suspending.
            while in_flight.len() < self.controller.current() && !self.frontier.is_empty() {
                let url = self.frontier.dequeue().await;
                let fetcher = Arc::clone(&self.fetcher);
                let task_timeout = self.task_timeout;
                let task_url = url.clone();

                let handle = tasks.spawn(async move {
                    let result =
                        match tokio::time::timeout(task_timeout, fetcher.fetch(&task_url)).await {
                            Ok(result) => result,
                            Err(_) => {
                                tracing::warn!(
                                    "Task timed out after {:?} for {}",
                                    task_timeout,
                                    task_url
                                );
                                CrawlResult::failure()
                            }
                        };
                    (task_url, result)
                });

                in_flight.insert(handle.id(), url);
            }

            // AWAIT: suspend until a task finishes.
            let Some(joined) = tasks.join_next_with_id().await else {
                continue;
            };

            // COLLECT
            match joined {
                Ok((id, (url, result))) => {
                    in_flight.remove(&id);
                    self.collect(url, result, &mut failed);
                }
                Err(join_error) => {
                    // A fault that escaped the task body (panic). Attribute
                    // it through the task-id map and keep the loop alive.
                    let url = in_flight.remove(&join_error.id());
                    self.controller.adjust(false);
                    self.progress.record_page();
                    match url {
                        Some(url) => {
                            tracing::error!("Task for {} failed unexpectedly: {}", url, join_error);
                            failed.push(url);
                        }
                        None => {
                            tracing::error!("Unattributed task failure: {}", join_error);
                        }
                    }
                }
            }
        }

        failed
    }

    /// Processes one completed task's outcome
    fn collect(&mut self, url: Url, result: CrawlResult, failed: &mut Vec<Url>) {
        self.progress.record_page();
        self.controller.adjust(result.success);

        if !result.success {
            tracing::warn!("Fetch failed for {}", url);
            failed.push(url);
            return;
        }

        let accepted = self.frontier.enqueue(&result.discovered_links, &url);

        // Children of zero-product pages are crawled too; the frontier has
        // already accepted them above regardless of product yield.
        let product_links: Vec<String> = accepted
            .iter()
            .filter(|u| self.matcher.is_product(u))
            .map(|u| u.to_string())
            .collect();

        if product_links.is_empty() {
            return;
        }

        self.progress.record_products(product_links.len());
        tracing::info!(
            "Found {} product links on {} (domain total: {})",
            product_links.len(),
            url,
            self.progress.product_links_found()
        );

        let record = ProductRecord {
            domain: self.domain.clone(),
            parent_link: url.to_string(),
            count: product_links.len(),
            product_links,
        };

        if let Err(e) = self.sink.append(&record) {
            tracing::error!("Failed to write record for {}: {}", record.parent_link, e);
        }
    }
}
